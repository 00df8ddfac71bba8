use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Marker that opens every routable block's header.
pub const FUNCTION_MARKER: &str = "///@function";

///
/// SnippetKind
///

#[derive(
    Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
pub enum SnippetKind {
    Create,
    Serialize,
    Deserialize,
    Destroy,
    Getters,
    Setters,
    Labels,
}

///
/// CodeBlock
///
/// One generated unit of text. `target` is the script asset the block
/// replaces; blocks without one are informational and never written.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeBlock {
    target: Option<String>,
    text: String,
}

impl CodeBlock {
    #[must_use]
    pub fn routed(target: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            target: Some(target.into()),
            text: text.into(),
        }
    }

    #[must_use]
    pub fn unrouted(text: impl Into<String>) -> Self {
        Self {
            target: None,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The function name declared by the header marker inside the text.
    #[must_use]
    pub fn embedded_target(&self) -> Option<&str> {
        let start = self.text.find(FUNCTION_MARKER)? + FUNCTION_MARKER.len();
        let rest = &self.text[start..];
        let name = rest[..rest.find('(')?].trim();

        (!name.is_empty()).then_some(name)
    }
}

///
/// CodeSnippet
/// A named group of blocks produced by one emitter.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CodeSnippet {
    pub kind: SnippetKind,
    pub blocks: Vec<CodeBlock>,
}

impl CodeSnippet {
    #[must_use]
    pub const fn new(kind: SnippetKind, blocks: Vec<CodeBlock>) -> Self {
        Self { kind, blocks }
    }

    #[must_use]
    pub fn single(kind: SnippetKind, block: CodeBlock) -> Self {
        Self::new(kind, vec![block])
    }

    /// Blocks that carry a destination.
    pub fn routed(&self) -> impl Iterator<Item = &CodeBlock> {
        self.blocks.iter().filter(|b| b.target.is_some())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_target_reads_header_marker() {
        let block = CodeBlock::routed("createMob", "///@function createMob(id, name)\nbody\n");

        assert_eq!(block.embedded_target(), Some("createMob"));
        assert_eq!(block.target(), block.embedded_target());
    }

    #[test]
    fn embedded_target_absent_without_marker() {
        assert_eq!(CodeBlock::unrouted("{}").embedded_target(), None);
        assert_eq!(CodeBlock::unrouted("///@function (x)").embedded_target(), None);
    }

    #[test]
    fn routed_skips_unrouted_blocks() {
        let snippet = CodeSnippet::new(
            SnippetKind::Labels,
            vec![CodeBlock::unrouted("{}"), CodeBlock::routed("a", "")],
        );

        assert_eq!(snippet.routed().count(), 1);
    }
}
