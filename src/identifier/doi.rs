use once_cell::sync::Lazy;
use regex::Regex;

use crate::identifier::Identifier;

/// A DOI found anywhere in a reference: bare, in a `doi.org` link, or inside a vendor landing
/// page URL such as `https://dl.acm.org/doi/pdf/10.1145/3631424`.
pub struct Doi<'a> {
    prefix: &'a str,
    suffix: &'a str,
}

static DOI_ANYWHERE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)10\.\d{4,9}/\S+").unwrap());

impl<'a> Identifier<'a> for Doi<'a> {
    fn parse(reference: &'a str) -> Option<Self> {
        let mut s = DOI_ANYWHERE_RE.find(reference)?.as_str();

        // Vendor URLs append query strings and fragments directly after the DOI.
        if let Some(idx) = s.find(['&', '#', '?']) {
            s = &s[..idx];
        }

        s = s.trim_start_matches(['(', '<', '[', '{', '"', '\'']);
        s = s.trim_end_matches(['.', ',', ';', ':', ')', ']', '}', '>', '"', '\'']);

        let (prefix, suffix) = s.split_once('/')?;
        if suffix.is_empty() {
            return None;
        }
        Some(Doi { prefix, suffix })
    }

    fn canonical(&self) -> String {
        format!("{}/{}", self.prefix, self.suffix).to_lowercase()
    }
}
