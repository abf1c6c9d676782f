use once_cell::sync::Lazy;
use regex::Regex;

use crate::identifier::Identifier;

/// An arXiv identifier, normalised to its canonical ID with the version split off.
pub struct Arxiv<'a> {
    /// Canonical ID without version, e.g. `2502.12110` or `astro-ph/0603274`.
    canonical_id: &'a str,
    /// Version number when the reference carries one, e.g. `Some("2")`.
    version: Option<&'a str>,
}

static NEWSTYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?P<core>\d{4}\.\d{4,5})(?:v(?P<v>\d+))?").unwrap());
static NEWSTYLE_BARE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^\d{4}\.\d{4,5}(?:v\d+)?$").unwrap());
// archive(.SUBJECT)?/NNNNNNN, e.g. hep-th/9901001 or math.GT/0309136
static LEGACY_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?P<core>[a-z-]+(?:\.[A-Z]{2})?/\d{7})(?:v(?P<v>\d+))?").unwrap()
});

/// Whether `reference` should be read as an arXiv reference at all.
///
/// The numeric tail of many ACM/IEEE DOIs (`10.1145/3706598.3713728`) has the same digit-dot
/// shape as a new-style arXiv ID, so extraction is only attempted on references that carry an
/// arXiv domain, an `arXiv:` prefix, or that are a bare ID in their entirety.
pub fn looks_like_arxiv(reference: &str) -> bool {
    let s = reference.trim();
    let lowered = s.to_ascii_lowercase();
    lowered.contains("arxiv.org") || lowered.starts_with("arxiv:") || NEWSTYLE_BARE_RE.is_match(s)
}

/// Whether `link` points at arxiv.org.
pub fn is_arxiv_url(link: &str) -> bool {
    link.to_ascii_lowercase().contains("arxiv.org")
}

impl<'a> Identifier<'a> for Arxiv<'a> {
    fn parse(reference: &'a str) -> Option<Self> {
        if !looks_like_arxiv(reference) {
            return None;
        }
        let s = reference.trim();

        let caps = NEWSTYLE_RE
            .captures(s)
            .or_else(|| LEGACY_RE.captures(s))?;
        Some(Arxiv {
            canonical_id: caps.name("core")?.as_str(),
            version: caps.name("v").map(|m| m.as_str()),
        })
    }

    fn canonical(&self) -> String {
        self.canonical_id.to_string()
    }
}

impl Arxiv<'_> {
    /// Version label such as `v2`, defaulting to `v1` when the reference names no version.
    pub fn version_label(&self) -> String {
        format!("v{}", self.version.unwrap_or("1"))
    }
}
