//! The extension points a [`Site`](crate::Site) exposes to plugins.

use std::sync::Arc;

use thiserror::Error;

use crate::content::{ContentSource, Post, SourceError};
use crate::style::{BundledStyle, StyleQueue};
use crate::taxonomy::TaxonomyRegistry;

#[derive(Error, Debug)]
pub enum ContentFilterError {
    #[error("content source error: {0}")]
    Source(#[from] SourceError),

    #[error("failed to render fragment: {0}")]
    Render(String),
}

/// A transform applied to the rendered body of a post before it is placed in
/// the page template.
///
/// The post being rendered is passed explicitly, along with the content
/// source it came from.
pub type ContentFilter = Arc<
    dyn Fn(&str, &Post, &dyn ContentSource) -> Result<String, ContentFilterError> + Send + Sync,
>;

pub trait Plugin: Send + Sync {
    fn name(&self) -> &str;

    /// Called once, when the site is built.
    fn register_taxonomies(&self, _registry: &mut TaxonomyRegistry) {}

    /// Called once for every page that is rendered.
    fn enqueue_styles(&self, _styles: &mut StyleQueue) {}

    fn content_filter(&self) -> Option<ContentFilter> {
        None
    }

    fn bundled_styles(&self) -> Vec<BundledStyle> {
        Vec::new()
    }
}
