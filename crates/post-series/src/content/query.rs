use thiserror::Error;

use crate::content::{Post, PostId, PostStatus, PostType, SortBy, SortOrder, Term, TermId};

/// Restricts a [`PostQuery`] to posts carrying a given taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxQuery {
    pub taxonomy: String,
    pub term_slug: String,
}

/// A query over the posts known to a [`ContentSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostQuery {
    pub post_type: PostType,
    pub status: PostStatus,
    pub tax_query: Option<TaxQuery>,
    pub sort_by: SortBy,
    pub order: SortOrder,

    /// The maximum number of posts to return. `None` returns every match.
    pub limit: Option<usize>,
}

impl PostQuery {
    /// Returns a query for all published posts of the given type, oldest first.
    pub fn new(post_type: PostType) -> Self {
        Self {
            post_type,
            status: PostStatus::Publish,
            tax_query: None,
            sort_by: SortBy::Date,
            order: SortOrder::Ascending,
            limit: None,
        }
    }

    pub fn status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn in_term(mut self, taxonomy: impl Into<String>, term_slug: impl Into<String>) -> Self {
        self.tax_query = Some(TaxQuery {
            taxonomy: taxonomy.into(),
            term_slug: term_slug.into(),
        });
        self
    }

    pub fn order(mut self, sort_by: SortBy, order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.order = order;
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns whether the post matches the type and status filters.
    pub(crate) fn admits(&self, post: &Post) -> bool {
        post.meta.post_type == self.post_type && post.meta.status == self.status
    }
}

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("taxonomy not registered: {0}")]
    UnknownTaxonomy(String),

    #[error("post not found: {0}")]
    UnknownPost(PostId),

    #[error("term not found: {0}")]
    UnknownTerm(TermId),

    #[error("post already exists: {0}")]
    DuplicatePost(PostId),

    #[error("taxonomy '{0}' is not hierarchical")]
    NotHierarchical(String),

    #[error("taxonomy '{taxonomy}' is not attachable to {post_type:?} entries")]
    NotAttachable {
        taxonomy: String,
        post_type: PostType,
    },

    #[error("term name '{0}' has no usable slug")]
    EmptySlug(String),

    #[error("invalid term permalink: {0}")]
    Permalink(#[from] url::ParseError),
}

/// The content lookups that content filters rely on.
pub trait ContentSource {
    /// Returns the terms of `taxonomy` associated with the post, in
    /// association order.
    fn post_terms(&self, post: PostId, taxonomy: &str) -> Result<Vec<&Term>, SourceError>;

    /// Returns the posts matching the query, in the query's order.
    fn query_posts(&self, query: &PostQuery) -> Result<Vec<&Post>, SourceError>;
}
