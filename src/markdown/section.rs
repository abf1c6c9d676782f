//! Marker-delimited sections of the destination document.
//!
//! A document is parsed into an ordered list of fragments: free text, which is never touched,
//! and sections, which are owned by the sync engine. Writing the document back is a plain
//! concatenation of the fragments, so edits to one section cannot spill into its neighbours.

use std::collections::{BTreeSet, HashMap};

use once_cell::sync::Lazy;
use regex::Regex;

// Topics are free text and may span lines.
static START_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--[ \t]*TABLE_START:[ \t]*(.*?)[ \t]*-->").unwrap());

pub fn start_marker(topic: &str) -> String {
    format!("<!-- TABLE_START: {topic} -->")
}

pub fn end_marker(topic: &str) -> String {
    format!("<!-- TABLE_END: {topic} -->")
}

/// End-marker and attached-heading patterns for one topic.
struct TopicPatterns {
    end: Regex,
    heading: Regex,
}

impl TopicPatterns {
    fn new(topic: &str) -> Self {
        let topic = regex::escape(topic);
        TopicPatterns {
            end: Regex::new(&format!(r"<!--[ \t]*TABLE_END:[ \t]*{topic}[ \t]*-->\n?")).unwrap(),
            heading: Regex::new(&format!(r"(?:^|\n)(#+[ \t]+{topic}[ \t]*\n(?:[ \t]*\n)*)\z"))
                .unwrap(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub topic: String,
    /// Heading line directly attached to the start marker, e.g. `# Memory\n`.
    pub heading: Option<String>,
    /// Start marker exactly as written in the document.
    pub start: String,
    /// Everything strictly between the markers.
    pub body: String,
    /// End marker as written, including its line break if it had one.
    pub end: String,
}

impl Section {
    pub fn new(topic: &str, table: &str) -> Self {
        Section {
            topic: topic.to_string(),
            heading: Some(format!("# {topic}\n")),
            start: start_marker(topic),
            body: format!("\n{table}"),
            end: format!("{}\n", end_marker(topic)),
        }
    }

    /// Replace the generated content, keeping markers and heading as they are.
    pub fn set_table(&mut self, table: &str) {
        self.body = format!("\n{table}");
    }

    fn write_to(&self, out: &mut String) {
        if let Some(heading) = &self.heading {
            out.push_str(heading);
        }
        out.push_str(&self.start);
        out.push_str(&self.body);
        out.push_str(&self.end);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragment {
    Text(String),
    Section(Section),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    fragments: Vec<Fragment>,
}

impl Document {
    pub fn parse(text: &str) -> Self {
        let mut fragments = Vec::new();
        let mut patterns: HashMap<String, TopicPatterns> = HashMap::new();
        let mut text_start = 0;
        let mut cursor = 0;

        while let Some(caps) = START_RE.captures_at(text, cursor) {
            let (Some(start), Some(topic)) = (caps.get(0), caps.get(1)) else {
                break;
            };
            let topic = topic.as_str().trim();
            if topic.is_empty() {
                cursor = start.end();
                continue;
            }

            let pats = patterns
                .entry(topic.to_string())
                .or_insert_with(|| TopicPatterns::new(topic));
            let Some(end) = pats.end.find_at(text, start.end()) else {
                cursor = start.end();
                continue;
            };
            // A second start marker for the same topic before the end means this one is orphaned.
            let orphaned = START_RE
                .captures_iter(&text[start.end()..end.start()])
                .any(|c| c.get(1).is_some_and(|t| t.as_str().trim() == topic));
            if orphaned {
                cursor = start.end();
                continue;
            }

            let mut preceding = &text[text_start..start.start()];
            let mut heading = None;
            if let Some(h) = pats.heading.captures(preceding).and_then(|c| c.get(1)) {
                heading = Some(h.as_str().to_string());
                preceding = &preceding[..h.start()];
            }
            if !preceding.is_empty() {
                fragments.push(Fragment::Text(preceding.to_string()));
            }
            fragments.push(Fragment::Section(Section {
                topic: topic.to_string(),
                heading,
                start: start.as_str().to_string(),
                body: text[start.end()..end.start()].to_string(),
                end: end.as_str().to_string(),
            }));

            cursor = end.end();
            text_start = end.end();
        }

        if text_start < text.len() {
            fragments.push(Fragment::Text(text[text_start..].to_string()));
        }
        Document { fragments }
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.fragments.iter().filter_map(|f| match f {
            Fragment::Section(s) => Some(s),
            Fragment::Text(_) => None,
        })
    }

    pub fn sections_mut(&mut self) -> impl Iterator<Item = &mut Section> {
        self.fragments.iter_mut().filter_map(|f| match f {
            Fragment::Section(s) => Some(s),
            Fragment::Text(_) => None,
        })
    }

    /// Topics with at least one complete marker pair.
    pub fn topics(&self) -> BTreeSet<String> {
        self.sections().map(|s| s.topic.clone()).collect()
    }

    /// Content of the first section for `topic`.
    pub fn body(&self, topic: &str) -> Option<&str> {
        self.sections()
            .find(|s| s.topic == topic)
            .map(|s| s.body.as_str())
    }

    /// Drop every section for `topic`, heading included.
    pub fn remove(&mut self, topic: &str) {
        self.fragments
            .retain(|f| !matches!(f, Fragment::Section(s) if s.topic == topic));
    }

    pub fn push_text(&mut self, text: &str) {
        self.fragments.push(Fragment::Text(text.to_string()));
    }

    pub fn push_section(&mut self, section: Section) {
        self.fragments.push(Fragment::Section(section));
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        for fragment in &self.fragments {
            match fragment {
                Fragment::Text(t) => out.push_str(t),
                Fragment::Section(s) => s.write_to(&mut out),
            }
        }
        out
    }
}
