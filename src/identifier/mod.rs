pub mod arxiv;
pub mod doi;
pub mod link;

/// A reference format that can be recognised in free text and reduced to a comparable token.
pub trait Identifier<'a>: Sized + 'a {
    fn parse(reference: &'a str) -> Option<Self>;
    /// Token used for identity comparison. Two references denote the same paper when their
    /// canonical tokens of the same kind are equal.
    fn canonical(&self) -> String;
}
