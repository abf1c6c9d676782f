use crate::{date, record::PaperRecord};

/// Produces a record for a reference string (URL, DOI, arXiv ID).
///
/// Network-backed metadata sources plug in here; the crate itself only ships manual entry.
pub trait Fetcher {
    fn fetch(&self, reference: &str) -> anyhow::Result<PaperRecord>;
}

/// Metadata typed in by the user.
#[derive(Debug, Clone, Default)]
pub struct ManualEntry {
    pub title: Option<String>,
    pub authors: Option<String>,
    pub source: Option<String>,
    pub date: Option<String>,
    pub doi: Option<String>,
    pub journal_ref: Option<String>,
    pub subjects: Option<String>,
}

impl Fetcher for ManualEntry {
    fn fetch(&self, reference: &str) -> anyhow::Result<PaperRecord> {
        let field = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().to_string();
        let date = self
            .date
            .as_deref()
            .map(|d| date::normalize(d).unwrap_or_else(|| d.trim().to_string()))
            .unwrap_or_default();

        Ok(PaperRecord {
            source: field(&self.source),
            title: field(&self.title),
            authors: field(&self.authors),
            doi: field(&self.doi),
            journal_ref: field(&self.journal_ref),
            link: reference.trim().to_string(),
            subjects: field(&self.subjects),
            date,
            ..Default::default()
        })
    }
}
