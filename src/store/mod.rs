//! Flat CSV record store: one quoted row per paper, read back in full on every query.

use std::{
    collections::HashMap,
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::Context;
use csv::{QuoteStyle, ReaderBuilder, WriterBuilder};
use tracing::{debug, warn};

use crate::{
    date::{self, YearMonth},
    record::{FIELDNAMES, PaperRecord},
    resolver::IdentityIndex,
};

pub mod filter;

pub use filter::{DateRange, SearchFilter};

pub struct RecordStore {
    path: PathBuf,
}

/// Record count and date span of the whole library.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    /// Earliest and latest valid dates, if any record has one.
    pub date_range: Option<(YearMonth, YearMonth)>,
}

impl RecordStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        RecordStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists_on_disk(&self) -> bool {
        self.path.exists()
    }

    /// Read every record. A missing file is an empty store.
    pub fn load_all(&self) -> anyhow::Result<Vec<PaperRecord>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "record store missing, treating as empty");
            return Ok(Vec::new());
        }
        let data = fs::read(&self.path)
            .with_context(|| format!("failed to read {}", self.path.display()))?;

        let mut reader = ReaderBuilder::new().flexible(true).from_reader(data.as_slice());
        let headers = reader
            .headers()
            .with_context(|| format!("failed to read header of {}", self.path.display()))?
            .clone();

        let mut records = Vec::new();
        for (i, row) in reader.records().enumerate() {
            let mut row =
                row.with_context(|| format!("malformed row {} in {}", i + 2, self.path.display()))?;
            // Short legacy rows: missing trailing cells are blank.
            while row.len() < headers.len() {
                row.push_field("");
            }
            let record: PaperRecord = row
                .deserialize(Some(&headers))
                .with_context(|| format!("malformed row {} in {}", i + 2, self.path.display()))?;
            records.push(record);
        }
        debug!(count = records.len(), path = %self.path.display(), "loaded records");
        Ok(records)
    }

    /// Append one record, writing the header first if the store has none yet.
    ///
    /// Cells follow the column order of the existing header, so stores with extra, missing or
    /// reordered columns stay aligned. Columns the header lacks are not written. The row (and
    /// header) are serialised up front and written with a single call, so a failed
    /// serialisation never leaves a partial row behind.
    pub fn append(&self, record: &PaperRecord) -> anyhow::Result<()> {
        let existing = fs::read(&self.path).ok().unwrap_or_default();
        let needs_header = existing.iter().all(|b| b.is_ascii_whitespace());

        let columns: Vec<String> = if needs_header {
            FIELDNAMES.iter().map(|name| name.to_string()).collect()
        } else {
            ReaderBuilder::new()
                .flexible(true)
                .from_reader(existing.as_slice())
                .headers()
                .with_context(|| format!("failed to read header of {}", self.path.display()))?
                .iter()
                .map(str::to_string)
                .collect()
        };
        let dropped: Vec<_> = FIELDNAMES
            .iter()
            .filter(|name| !columns.iter().any(|c| c == *name))
            .filter(|name| record.field(name).is_some_and(|v| !v.is_empty()))
            .collect();
        if !dropped.is_empty() {
            warn!(?dropped, path = %self.path.display(), "store header lacks columns, values not written");
        }

        let mut buf = Vec::new();
        if !needs_header && !existing.ends_with(b"\n") {
            buf.push(b'\n');
        }
        {
            let mut writer = WriterBuilder::new()
                .quote_style(QuoteStyle::Always)
                .has_headers(false)
                .from_writer(&mut buf);
            if needs_header {
                writer.write_record(&columns)?;
            }
            writer.write_record(columns.iter().map(|c| record.field(c).unwrap_or_default()))?;
            writer.flush()?;
        }

        let mut file = if needs_header {
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(&self.path)
        } else {
            OpenOptions::new().append(true).open(&self.path)
        }
        .with_context(|| format!("failed to open {}", self.path.display()))?;
        file.write_all(&buf)
            .with_context(|| format!("failed to write {}", self.path.display()))?;
        debug!(title = %record.title, path = %self.path.display(), "appended record");
        Ok(())
    }

    pub fn search(&self, filter: &SearchFilter) -> anyhow::Result<Vec<PaperRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter(|r| filter.matches(r))
            .collect())
    }

    /// Record count per non-blank topic, most populated first.
    pub fn topics(&self) -> anyhow::Result<Vec<(String, usize)>> {
        let records = self.load_all()?;
        Ok(tally(records.iter().filter_map(PaperRecord::topic_key)))
    }

    /// Occurrences of each individual tag, most frequent first.
    pub fn tags(&self) -> anyhow::Result<Vec<(String, usize)>> {
        let records = self.load_all()?;
        Ok(tally(records.iter().flat_map(PaperRecord::tags)))
    }

    /// Whether `candidate` denotes a paper already in the store.
    pub fn exists(&self, candidate: &str) -> anyhow::Result<bool> {
        if candidate.trim().is_empty() {
            return Ok(false);
        }
        let records = self.load_all()?;
        Ok(IdentityIndex::build(&records).contains(candidate))
    }

    pub fn stats(&self) -> anyhow::Result<Stats> {
        let records = self.load_all()?;
        let mut dates = records.iter().filter_map(|r| date::date_key(&r.date));
        let date_range = dates.next().map(|first| {
            dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d)))
        });
        Ok(Stats {
            total: records.len(),
            date_range,
        })
    }
}

/// Count occurrences, descending by count, ties kept in first-seen order.
fn tally<'a>(items: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut slots: HashMap<&'a str, usize> = HashMap::new();
    for item in items {
        match slots.get(item) {
            Some(&i) => order[i].1 += 1,
            None => {
                slots.insert(item, order.len());
                order.push((item.to_string(), 1));
            }
        }
    }
    // Stable sort keeps first-seen order among equal counts.
    order.sort_by(|a, b| b.1.cmp(&a.1));
    order
}
