use url::Url;

use crate::identifier::Identifier;

/// Any other link, compared after light normalisation: scheme and host lower-cased and a single
/// trailing slash dropped from the path. Query and fragment are left untouched.
///
/// References that are not absolute URLs with a host are compared as trimmed text.
pub struct Link<'a> {
    raw: &'a str,
    url: Option<Url>,
}

impl<'a> Identifier<'a> for Link<'a> {
    fn parse(reference: &'a str) -> Option<Self> {
        let raw = reference.trim();
        if raw.is_empty() {
            return None;
        }
        let url = Url::parse(raw).ok().filter(|u| u.has_host());
        Some(Link { raw, url })
    }

    fn canonical(&self) -> String {
        let Some(url) = &self.url else {
            return self.raw.to_string();
        };

        let mut out = format!("{}://", url.scheme());
        if !url.username().is_empty() {
            out.push_str(url.username());
            if let Some(password) = url.password() {
                out.push(':');
                out.push_str(password);
            }
            out.push('@');
        }
        // `Url` already lower-cases the scheme and the host of special schemes.
        out.push_str(&url.host_str().unwrap_or_default().to_ascii_lowercase());
        if let Some(port) = url.port() {
            out.push_str(&format!(":{port}"));
        }
        let path = url.path();
        out.push_str(path.strip_suffix('/').unwrap_or(path));
        if let Some(query) = url.query() {
            out.push('?');
            out.push_str(query);
        }
        if let Some(fragment) = url.fragment() {
            out.push('#');
            out.push_str(fragment);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(s: &str) -> Option<String> {
        Link::parse(s).map(|l| l.canonical())
    }

    #[test]
    fn lowercases_scheme_and_host_only() {
        assert_eq!(
            norm("HTTPS://Example.COM/Paper/ABC/").as_deref(),
            Some("https://example.com/Paper/ABC")
        );
    }

    #[test]
    fn keeps_query_and_fragment() {
        assert_eq!(
            norm("https://example.com/paper/?id=7#Intro").as_deref(),
            Some("https://example.com/paper?id=7#Intro")
        );
        assert_eq!(
            norm("https://ieeexplore.ieee.org/document/9878378/").as_deref(),
            Some("https://ieeexplore.ieee.org/document/9878378")
        );
    }

    #[test]
    fn trailing_slash_forms_agree() {
        assert_eq!(norm("https://example.com/"), norm("https://example.com"));
        assert_eq!(norm("https://example.com/a/"), norm("https://example.com/a"));
    }

    #[test]
    fn non_urls_are_compared_as_trimmed_text() {
        assert_eq!(norm("  10.1145/3631424 ").as_deref(), Some("10.1145/3631424"));
        assert_eq!(norm("arXiv:2502.12110").as_deref(), Some("arXiv:2502.12110"));
        assert!(norm("   ").is_none());
    }
}
