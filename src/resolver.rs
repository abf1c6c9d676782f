use std::collections::HashSet;

use tracing::trace;

use crate::{
    identifier::{Identifier, arxiv::Arxiv, doi::Doi, link::Link},
    record::PaperRecord,
};

/// Identity tokens derived from one reference string.
///
/// Any single kind matching is conclusive, so there is no precedence between them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fingerprint {
    pub doi: Option<String>,
    pub arxiv: Option<String>,
    pub link: Option<String>,
}

impl Fingerprint {
    pub fn of(reference: &str) -> Self {
        Fingerprint {
            doi: canonical::<Doi>(reference),
            arxiv: canonical::<Arxiv>(reference),
            link: canonical::<Link>(reference),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.doi.is_none() && self.arxiv.is_none() && self.link.is_none()
    }
}

fn canonical<'a, I: Identifier<'a>>(reference: &'a str) -> Option<String> {
    I::parse(reference).map(|id| id.canonical())
}

/// Identity tokens of every stored record, built from each record's `doi` and `link` fields.
#[derive(Debug, Default)]
pub struct IdentityIndex {
    dois: HashSet<String>,
    arxiv_ids: HashSet<String>,
    links: HashSet<String>,
}

impl IdentityIndex {
    pub fn build<'r>(records: impl IntoIterator<Item = &'r PaperRecord>) -> Self {
        let mut index = IdentityIndex::default();
        for record in records {
            for field in [&record.doi, &record.link] {
                index.insert(Fingerprint::of(field));
            }
        }
        index
    }

    fn insert(&mut self, fp: Fingerprint) {
        if let Some(doi) = fp.doi {
            self.dois.insert(doi);
        }
        if let Some(id) = fp.arxiv {
            self.arxiv_ids.insert(id);
        }
        if let Some(link) = fp.link {
            self.links.insert(link);
        }
    }

    /// Whether `reference` denotes a paper already in the index. A blank reference never does.
    pub fn contains(&self, reference: &str) -> bool {
        let fp = Fingerprint::of(reference);
        trace!(reference, ?fp, "identity lookup");
        if fp.is_empty() {
            return false;
        }

        fp.doi.is_some_and(|d| self.dois.contains(&d))
            || fp.arxiv.is_some_and(|a| self.arxiv_ids.contains(&a))
            || fp.link.is_some_and(|l| self.links.contains(&l))
    }
}
