use std::collections::BTreeMap;

pub mod section;
pub mod sync;
pub mod table;

pub use sync::{SyncPlan, plan};
pub use table::tables_by_topic;

/// Markdown preview of one topic's table, or of every table when `topic` is `None`.
///
/// Returns `None` when the requested topic has no table.
pub fn preview(tables: &BTreeMap<String, String>, topic: Option<&str>) -> Option<String> {
    match topic {
        Some(topic) => tables
            .get(topic.trim())
            .map(|table| format!("# {}\n\n{table}", topic.trim())),
        None if tables.is_empty() => None,
        None => Some(
            tables
                .iter()
                .map(|(topic, table)| format!("# {topic}\n\n{table}"))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_single_and_all() {
        let tables: BTreeMap<String, String> = [
            ("A".to_string(), "ta\n".to_string()),
            ("B".to_string(), "tb\n".to_string()),
        ]
        .into_iter()
        .collect();

        assert_eq!(preview(&tables, Some("A")).as_deref(), Some("# A\n\nta\n"));
        assert_eq!(preview(&tables, None).as_deref(), Some("# A\n\nta\n\n# B\n\ntb\n"));
        assert!(preview(&tables, Some("C")).is_none());
        assert!(preview(&BTreeMap::new(), None).is_none());
    }
}
