use std::fmt;

use serde::{Deserialize, Serialize};

use crate::permalink::Permalink;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    pub id: TermId,
    pub taxonomy: String,
    pub name: String,
    pub slug: String,
    pub parent: Option<TermId>,

    /// The archive path, e.g. `/series/the-lord-of-the-rings`.
    pub path: String,
    pub permalink: Permalink,
}
