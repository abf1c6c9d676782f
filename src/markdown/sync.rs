use std::{collections::BTreeMap, fmt};

use tracing::debug;

use crate::markdown::section::{Document, Section};

/// Starting point when the destination document does not exist yet.
pub const BOOTSTRAP_DOCUMENT: &str = "# Paper Collection\n\n";

/// One line of the change summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    New { topic: String, rows: usize },
    Changed { topic: String, before: usize, after: usize },
    Removed { topic: String },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::New { topic, rows } => write!(f, "{topic}: NEW ({rows} rows)"),
            Change::Changed {
                topic,
                before,
                after,
            } => write!(f, "{topic}: {before} -> {after} rows"),
            Change::Removed { topic } => write!(f, "{topic}: REMOVED"),
        }
    }
}

/// Result of reconciling a document with freshly rendered tables.
#[derive(Debug, Clone)]
pub struct SyncPlan {
    pub changes: Vec<Change>,
    /// Full document text after the sync.
    pub content: String,
    /// The document did not exist and will be created.
    pub created: bool,
}

impl SyncPlan {
    pub fn is_noop(&self) -> bool {
        !self.created && self.changes.is_empty()
    }

    /// Human-readable change summary.
    pub fn summary(&self) -> String {
        if self.is_noop() {
            return "No changes detected.".to_string();
        }
        let mut out = String::new();
        if self.created {
            out.push_str("Document does not exist. Will be created.\n");
        }
        if !self.changes.is_empty() {
            out.push_str("Changes:");
            for change in &self.changes {
                out.push_str("\n  ");
                out.push_str(&change.to_string());
            }
        }
        out.trim_end().to_string()
    }
}

fn line_count(table: &str) -> usize {
    table.trim().split('\n').count()
}

/// Reconcile `existing` (or a fresh document when `None`) with `tables`, keyed by topic.
///
/// Sections for topics in `tables` get their content fully replaced, or are appended with a
/// heading when missing. Sections for topics absent from `tables` are removed with their heading.
/// A section whose trimmed content is unchanged is reported as no change.
pub fn plan(existing: Option<&str>, tables: &BTreeMap<String, String>) -> SyncPlan {
    let created = existing.is_none();
    let mut doc = Document::parse(existing.unwrap_or(BOOTSTRAP_DOCUMENT));
    let mut changes = Vec::new();

    for (topic, table) in tables {
        match doc.body(topic) {
            Some(old) => {
                let (old, new) = (old.trim(), table.trim());
                if old != new {
                    changes.push(Change::Changed {
                        topic: topic.clone(),
                        before: line_count(old),
                        after: line_count(new),
                    });
                }
                for section in doc.sections_mut().filter(|s| &s.topic == topic) {
                    section.set_table(table);
                }
            }
            None => {
                changes.push(Change::New {
                    topic: topic.clone(),
                    rows: line_count(table),
                });
                doc.push_text("\n");
                doc.push_section(Section::new(topic, table));
            }
        }
    }

    for stale in doc.topics().into_iter().filter(|t| !tables.contains_key(t)) {
        doc.remove(&stale);
        changes.push(Change::Removed { topic: stale });
    }

    debug!(changes = changes.len(), created, "planned document sync");
    SyncPlan {
        changes,
        content: doc.render(),
        created,
    }
}
