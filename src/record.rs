use serde::{Deserialize, Serialize};

/// Column names of the record store, in on-disk order.
pub const FIELDNAMES: [&str; 11] = [
    "Source",
    "Title",
    "Authors",
    "DOI",
    "Journal_Ref",
    "Link",
    "Tag",
    "Subjects",
    "Additional_Info",
    "Date",
    "Topic",
];

/// One cataloged paper. Every field is kept as the raw text found in the store; blank means
/// blank, and nothing is validated on the way in or out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperRecord {
    /// Venue or version label, e.g. `CHI 2023` or `arXiv(v1) 2024`.
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "Title")]
    pub title: String,
    /// Comma-joined author names.
    #[serde(rename = "Authors")]
    pub authors: String,
    #[serde(rename = "DOI")]
    pub doi: String,
    #[serde(rename = "Journal_Ref")]
    pub journal_ref: String,
    /// Canonical URL or identifier of the paper.
    #[serde(rename = "Link")]
    pub link: String,
    /// Comma-separated user labels.
    #[serde(rename = "Tag")]
    pub tag: String,
    /// Comma-separated classification codes.
    #[serde(rename = "Subjects")]
    pub subjects: String,
    /// Free text; may span several lines.
    #[serde(rename = "Additional_Info")]
    pub additional_info: String,
    /// Nominally `YYYY.MM`.
    #[serde(rename = "Date")]
    pub date: String,
    /// Grouping key for document sections. Blank means "no topic".
    #[serde(rename = "Topic")]
    pub topic: String,
}

impl PaperRecord {
    /// Trimmed topic, or `None` when the record has none.
    pub fn topic_key(&self) -> Option<&str> {
        let t = self.topic.trim();
        (!t.is_empty()).then_some(t)
    }

    /// Case-insensitive keyword match over title, tag, authors and subjects.
    pub fn matches_query(&self, query: &str) -> bool {
        let q = query.to_lowercase();
        [&self.title, &self.tag, &self.authors, &self.subjects]
            .iter()
            .any(|field| field.to_lowercase().contains(&q))
    }

    /// Value of the store column `name`, or `None` for a column this record does not carry.
    pub fn field(&self, name: &str) -> Option<&str> {
        let value = match name {
            "Source" => &self.source,
            "Title" => &self.title,
            "Authors" => &self.authors,
            "DOI" => &self.doi,
            "Journal_Ref" => &self.journal_ref,
            "Link" => &self.link,
            "Tag" => &self.tag,
            "Subjects" => &self.subjects,
            "Additional_Info" => &self.additional_info,
            "Date" => &self.date,
            "Topic" => &self.topic,
            _ => return None,
        };
        Some(value)
    }

    /// Individual tags, trimmed, blanks dropped.
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.tag.split(',').map(str::trim).filter(|t| !t.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_store_column_maps_to_a_field() {
        let record = PaperRecord {
            journal_ref: "CHI 2024".into(),
            additional_info: "note".into(),
            ..Default::default()
        };
        for name in FIELDNAMES {
            assert!(record.field(name).is_some(), "{name}");
        }
        assert_eq!(record.field("Journal_Ref"), Some("CHI 2024"));
        assert_eq!(record.field("Additional_Info"), Some("note"));
        assert_eq!(record.field("Extra"), None);
    }

    #[test]
    fn blank_topic_has_no_key() {
        let r = PaperRecord {
            topic: "   ".into(),
            ..Default::default()
        };
        assert!(r.topic_key().is_none());

        let r = PaperRecord {
            topic: " Memory ".into(),
            ..Default::default()
        };
        assert_eq!(r.topic_key(), Some("Memory"));
    }

    #[test]
    fn query_matches_any_searchable_field() {
        let r = PaperRecord {
            title: "Generative Agents".into(),
            tag: "LLM, Simulation".into(),
            authors: "Joon Sung Park".into(),
            subjects: "cs.HC".into(),
            doi: "10.1145/3586183.3606763".into(),
            ..Default::default()
        };
        assert!(r.matches_query("generative"));
        assert!(r.matches_query("SIMULATION"));
        assert!(r.matches_query("park"));
        assert!(r.matches_query("cs.hc"));
        assert!(!r.matches_query("3586183"));
    }

    #[test]
    fn tags_are_split_and_trimmed() {
        let r = PaperRecord {
            tag: " LLM, ,Agents ,".into(),
            ..Default::default()
        };
        assert_eq!(r.tags().collect::<Vec<_>>(), vec!["LLM", "Agents"]);
    }
}
