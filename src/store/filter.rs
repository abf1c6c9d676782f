use crate::{
    date::{self, YearMonth},
    error::ValidationError,
    record::PaperRecord,
};

/// Inclusive month range for filtering. Either end may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    from: Option<YearMonth>,
    to: Option<YearMonth>,
}

impl DateRange {
    /// Build a range from user input, which must be strict `YYYY.MM` on both ends.
    pub fn parse(from: Option<&str>, to: Option<&str>) -> Result<Self, ValidationError> {
        let strict = |flag: &'static str, value: Option<&str>| {
            value
                .map(|v| {
                    YearMonth::parse_strict(v).ok_or_else(|| ValidationError::InvalidDate {
                        flag,
                        value: v.to_string(),
                    })
                })
                .transpose()
        };
        let range = DateRange {
            from: strict("--from", from)?,
            to: strict("--to", to)?,
        };
        if let (Some(from), Some(to)) = (range.from, range.to)
            && from > to
        {
            return Err(ValidationError::InvertedRange {
                from: from.to_string(),
                to: to.to_string(),
            });
        }
        Ok(range)
    }

    pub fn is_open(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    /// Whether a stored date falls inside the range. A record without a valid date is excluded
    /// whenever either bound is set, since its position cannot be known.
    pub fn contains(&self, value: &str) -> bool {
        if self.is_open() {
            return true;
        }
        let Some(key) = date::date_key(value) else {
            return false;
        };
        self.from.is_none_or(|from| key >= from) && self.to.is_none_or(|to| key <= to)
    }
}

/// Conjunctive search predicates. Unset fields match everything.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    /// Keyword over title, tag, authors and subjects.
    pub query: Option<String>,
    pub tag: Option<String>,
    pub author: Option<String>,
    /// Case-insensitive exact topic.
    pub topic: Option<String>,
    pub dates: DateRange,
}

impl SearchFilter {
    pub fn matches(&self, record: &PaperRecord) -> bool {
        fn contains_ci(haystack: &str, needle: &str) -> bool {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        }

        if let Some(q) = self.query.as_deref().filter(|q| !q.is_empty())
            && !record.matches_query(q)
        {
            return false;
        }
        if let Some(tag) = self.tag.as_deref().filter(|t| !t.is_empty())
            && !contains_ci(&record.tag, tag)
        {
            return false;
        }
        if let Some(author) = self.author.as_deref().filter(|a| !a.is_empty())
            && !contains_ci(&record.authors, author)
        {
            return false;
        }
        if let Some(topic) = self.topic.as_deref().filter(|t| !t.trim().is_empty())
            && topic.trim().to_lowercase() != record.topic.trim().to_lowercase()
        {
            return false;
        }
        self.dates.contains(&record.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dated(date: &str) -> PaperRecord {
        PaperRecord {
            title: format!("paper {date}"),
            date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn range_rejects_loose_input() {
        assert_eq!(
            DateRange::parse(Some("2024-01"), None),
            Err(ValidationError::InvalidDate {
                flag: "--from",
                value: "2024-01".into()
            })
        );
        assert!(DateRange::parse(None, Some("arXiv 2024.01")).is_err());
        assert!(DateRange::parse(Some("2024.13"), None).is_err());
    }

    #[test]
    fn range_rejects_inversion() {
        assert!(matches!(
            DateRange::parse(Some("2024.12"), Some("2024.01")),
            Err(ValidationError::InvertedRange { .. })
        ));
        assert!(DateRange::parse(Some("2024.01"), Some("2024.01")).is_ok());
    }

    #[test]
    fn range_is_inclusive_and_excludes_undated() {
        let range = DateRange::parse(Some("2023.06"), Some("2024.01")).unwrap();
        assert!(range.contains("2023.06"));
        assert!(range.contains("2024.01"));
        assert!(range.contains("arXiv(v1) 2023.09"));
        assert!(!range.contains("2023.05"));
        assert!(!range.contains("2024.02"));
        assert!(!range.contains(""));

        let open = DateRange::default();
        assert!(open.contains(""));
    }

    #[test]
    fn half_open_ranges() {
        let from = DateRange::parse(Some("2024.01"), None).unwrap();
        assert!(from.contains("2030.01"));
        assert!(!from.contains("2023.12"));
        assert!(!from.contains("undated"));
    }

    #[test]
    fn predicates_are_conjunctive() {
        let record = PaperRecord {
            title: "A-MEM: Agentic Memory".into(),
            authors: "Wujiang Xu, Zujie Liang".into(),
            tag: "Memory, Agents".into(),
            topic: "Memory".into(),
            date: "2025.02".into(),
            ..Default::default()
        };

        let filter = SearchFilter {
            query: Some("agentic".into()),
            tag: Some("agents".into()),
            author: Some("LIANG".into()),
            topic: Some("memory".into()),
            dates: DateRange::parse(Some("2025.01"), None).unwrap(),
        };
        assert!(filter.matches(&record));

        let wrong_topic = SearchFilter {
            topic: Some("Mem".into()),
            ..filter.clone()
        };
        assert!(!wrong_topic.matches(&record));

        let wrong_date = SearchFilter {
            dates: DateRange::parse(None, Some("2024.12")).unwrap(),
            ..filter
        };
        assert!(!wrong_date.matches(&record));
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = SearchFilter::default();
        assert!(filter.matches(&dated("")));
        assert!(filter.matches(&dated("2024.01")));
    }
}
