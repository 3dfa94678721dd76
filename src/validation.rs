//! Validation context for reference resolution.
//!
//! [`ValidationContext`] travels down the document walk. It gives `$ref`
//! nodes access to the compiled reference table and counts how many
//! references deep the walk currently is, so recursive schemas cannot loop
//! forever.

use crate::schema::node::{RefTable, SchemaNode};

/// Per-run state threaded through a document walk.
///
/// Contexts are cheap to copy; following a reference produces a new context
/// one level deeper rather than mutating the current one.
#[derive(Clone, Copy)]
pub(crate) struct ValidationContext<'a> {
    refs: &'a RefTable,
    depth: usize,
    max_depth: usize,
}

impl<'a> ValidationContext<'a> {
    pub(crate) fn new(refs: &'a RefTable, max_depth: usize) -> Self {
        Self {
            refs,
            depth: 0,
            max_depth,
        }
    }

    /// Creates a new context with incremented depth.
    pub(crate) fn increment_depth(&self) -> Self {
        Self {
            depth: self.depth + 1,
            ..*self
        }
    }

    /// Returns the current depth of reference traversal.
    pub(crate) fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the maximum allowed depth.
    pub(crate) fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Looks up a compiled reference target.
    pub(crate) fn resolve(&self, reference: &str) -> Option<&'a SchemaNode> {
        self.refs.get(reference).map(|node| node.as_ref())
    }
}
