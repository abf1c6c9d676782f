use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    date,
    identifier::{
        Identifier,
        arxiv::{self, Arxiv},
    },
    record::PaperRecord,
};

pub const HEADER: &str = "| Source | Title (Link) | Authors | Tag | Subjects | Additional info | Date |\n\
                          |---|---|---|---|---|---|---|\n";

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"20\d{2}").unwrap());
// The `arXiv(v2)` version marker itself is not a venue annotation.
static ARXIV_VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)arxiv\s*\(\s*v?\d*\s*\)").unwrap());

/// How the Source column of a record should be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// The stored source already names arXiv, e.g. `arXiv(v1) 2024`.
    ArxivNative,
    /// A formal venue name whose link still points at the arXiv preprint.
    ArxivViaLink,
    NonArxiv,
}

impl SourceKind {
    pub fn classify(record: &PaperRecord) -> Self {
        if record.source.to_lowercase().contains("arxiv") {
            SourceKind::ArxivNative
        } else if arxiv::is_arxiv_url(&record.link) {
            SourceKind::ArxivViaLink
        } else {
            SourceKind::NonArxiv
        }
    }
}

/// Source cell text: surface arXiv version and year when known, keep any venue citation.
pub fn format_source(record: &PaperRecord) -> String {
    let source = record.source.as_str();
    let journal_ref = record.journal_ref.trim();

    match SourceKind::classify(record) {
        SourceKind::ArxivNative => {
            let has_venue = ARXIV_VERSION_RE.replace_all(source, "").contains('(');
            if has_venue || journal_ref.is_empty() {
                source.to_string()
            } else {
                format!("{source} ({journal_ref})")
            }
        }
        SourceKind::ArxivViaLink => {
            let version = Arxiv::parse(&record.link)
                .map(|a| a.version_label())
                .unwrap_or_else(|| "v1".to_string());
            let mut out = format!("arXiv({version})");
            if let Some(year) = YEAR_RE.find(source) {
                out.push(' ');
                out.push_str(year.as_str());
            }
            if !source.trim().is_empty() {
                out.push_str(&format!(" ({source})"));
            }
            out
        }
        SourceKind::NonArxiv if journal_ref.is_empty() => source.to_string(),
        SourceKind::NonArxiv if source.trim().is_empty() => format!("({journal_ref})"),
        SourceKind::NonArxiv => format!("{source} ({journal_ref})"),
    }
}

/// `first author, et al.` for any non-empty author list.
///
/// Upstream fetchers already cut the list down before it is stored, so even a single author is
/// shown with the suffix.
pub fn format_authors(authors: &str) -> String {
    if authors.trim().is_empty() {
        return String::new();
    }
    let first = authors.split(',').next().unwrap_or_default();
    format!("{first}, et al.")
}

/// Keep cell content on one physical line and inside its own cell.
pub fn escape_cell(text: &str) -> String {
    text.replace("\r\n", "\n")
        .replace('\r', "\n")
        .replace('\n', "<br>")
        .replace('|', "\\|")
}

fn title_cell(record: &PaperRecord) -> String {
    let title = escape_cell(&record.title);
    let link = record.link.trim();
    if link.is_empty() {
        title
    } else {
        format!("[{title}]({})", escape_cell(link))
    }
}

fn row(record: &PaperRecord) -> String {
    let cells = [
        escape_cell(&format_source(record)),
        title_cell(record),
        escape_cell(&format_authors(&record.authors)),
        escape_cell(&record.tag),
        escape_cell(&record.subjects),
        escape_cell(&record.additional_info),
        escape_cell(&record.date),
    ];
    format!("| {} |\n", cells.join(" | "))
}

/// Newest first, undated last, then by title. Stable, so equal keys keep their store order.
pub fn sort_for_display(records: &mut [&PaperRecord]) {
    records.sort_by(|a, b| {
        date::newest_first(date::date_key(&a.date), date::date_key(&b.date))
            .then_with(|| a.title.cmp(&b.title))
    });
}

/// Render one topic's records as a Markdown table.
pub fn render_table(records: &[&PaperRecord]) -> String {
    let mut sorted = records.to_vec();
    sort_for_display(&mut sorted);

    let mut out = String::from(HEADER);
    for record in sorted {
        out.push_str(&row(record));
    }
    out
}

/// One rendered table per non-blank topic, keyed by trimmed topic name.
pub fn tables_by_topic(records: &[PaperRecord]) -> BTreeMap<String, String> {
    let mut groups: BTreeMap<&str, Vec<&PaperRecord>> = BTreeMap::new();
    for record in records {
        if let Some(topic) = record.topic_key() {
            groups.entry(topic).or_default().push(record);
        }
    }
    groups
        .into_iter()
        .map(|(topic, group)| (topic.to_string(), render_table(&group)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_source(source: &str, link: &str, journal_ref: &str) -> PaperRecord {
        PaperRecord {
            source: source.into(),
            link: link.into(),
            journal_ref: journal_ref.into(),
            ..Default::default()
        }
    }

    #[test]
    fn non_arxiv_source() {
        let r = with_source("ICLR 2024", "https://openreview.net/forum?id=x", "");
        assert_eq!(SourceKind::classify(&r), SourceKind::NonArxiv);
        assert_eq!(format_source(&r), "ICLR 2024");

        let r = with_source("ICLR 2024", "https://openreview.net/forum?id=x", "Vol 3 Issue 2");
        assert_eq!(format_source(&r), "ICLR 2024 (Vol 3 Issue 2)");
    }

    #[test]
    fn arxiv_native_source() {
        let r = with_source("arXiv(v1) 2024", "https://arxiv.org/abs/2401.00001v1", "");
        assert_eq!(SourceKind::classify(&r), SourceKind::ArxivNative);
        assert_eq!(format_source(&r), "arXiv(v1) 2024");

        let r = with_source("arXiv(v1) 2024", "https://arxiv.org/abs/2401.00001v1", "ICLR 2024");
        assert_eq!(format_source(&r), "arXiv(v1) 2024 (ICLR 2024)");

        // A venue was already merged in; do not append twice.
        let r = with_source("arXiv(v1) 2024 (ICLR)", "", "ICLR 2024");
        assert_eq!(format_source(&r), "arXiv(v1) 2024 (ICLR)");
    }

    #[test]
    fn arxiv_via_link_source() {
        let r = with_source("CHI 2023", "https://arxiv.org/abs/2304.03442v2", "");
        assert_eq!(SourceKind::classify(&r), SourceKind::ArxivViaLink);
        assert_eq!(format_source(&r), "arXiv(v2) 2023 (CHI 2023)");

        let r = with_source("UIST", "https://arxiv.org/abs/2304.03442", "");
        assert_eq!(format_source(&r), "arXiv(v1) (UIST)");

        let r = with_source("NeurIPS 2022", "https://arxiv.org/pdf/2206.00001v3.pdf", "");
        assert_eq!(format_source(&r), "arXiv(v3) 2022 (NeurIPS 2022)");
    }

    #[test]
    fn authors_are_compressed() {
        assert_eq!(format_authors("Ada Lovelace, Alan Turing"), "Ada Lovelace, et al.");
        assert_eq!(format_authors("Grace Hopper"), "Grace Hopper, et al.");
        assert_eq!(format_authors(""), "");
        assert_eq!(format_authors("   "), "");
    }

    #[test]
    fn cells_are_escaped() {
        assert_eq!(escape_cell("A | B"), "A \\| B");
        assert_eq!(escape_cell("one\ntwo\r\nthree"), "one<br>two<br>three");
    }

    #[test]
    fn pipe_in_title_keeps_one_row_per_record() {
        let a = PaperRecord {
            title: "Tables | Pipes".into(),
            link: "https://example.com/a".into(),
            additional_info: "multi\nline".into(),
            topic: "T".into(),
            ..Default::default()
        };
        let b = PaperRecord {
            title: "Plain".into(),
            topic: "T".into(),
            ..Default::default()
        };
        let table = render_table(&[&a, &b]);
        let lines: Vec<_> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().any(|l| l.contains("[Tables \\| Pipes](https://example.com/a)")));
        assert!(lines.iter().any(|l| l.contains("| Plain |")));
        // Every row has the same number of unescaped separators as the header.
        let separators = |l: &str| l.replace("\\|", "").matches('|').count();
        assert!(lines.iter().all(|l| separators(l) == 8));
    }

    #[test]
    fn rows_sorted_newest_first_then_title() {
        let mk = |title: &str, date: &str| PaperRecord {
            title: title.into(),
            date: date.into(),
            topic: "T".into(),
            ..Default::default()
        };
        let records = [
            mk("Zeta", ""),
            mk("Beta", "2023.01"),
            mk("Alpha", "2024.12"),
            mk("Aardvark", "2023.01"),
        ];
        let refs: Vec<_> = records.iter().collect();
        let table = render_table(&refs);
        let order: Vec<_> = ["Alpha", "Aardvark", "Beta", "Zeta"]
            .iter()
            .map(|t| table.find(&format!("| {t} |")).unwrap())
            .collect();
        assert!(order.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn rendering_is_idempotent() {
        let records = vec![
            PaperRecord {
                title: "x".into(),
                topic: "Memory".into(),
                date: "2024.01".into(),
                ..Default::default()
            },
            PaperRecord {
                title: "y".into(),
                topic: "Memory".into(),
                ..Default::default()
            },
        ];
        assert_eq!(tables_by_topic(&records), tables_by_topic(&records));
    }

    #[test]
    fn blank_topics_are_not_grouped() {
        let records = vec![
            PaperRecord {
                title: "blank".into(),
                topic: "   ".into(),
                ..Default::default()
            },
            PaperRecord {
                title: "valid".into(),
                topic: " Memory".into(),
                ..Default::default()
            },
        ];
        let tables = tables_by_topic(&records);
        assert_eq!(tables.keys().collect::<Vec<_>>(), vec!["Memory"]);
        assert!(tables["Memory"].contains("| valid |"));
        assert!(!tables["Memory"].contains("blank"));
    }

    #[test]
    fn blank_fields_render_as_empty_cells() {
        let r = PaperRecord::default();
        assert_eq!(row(&r), "|  |  |  |  |  |  |  |\n");
    }
}
