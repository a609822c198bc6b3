use std::path::PathBuf;
use std::sync::Arc;

use serde::Deserialize;

use crate::content::{ContentSource, Post, PostType};
use crate::navigation::prepend_series_navigation;
use crate::plugin::{ContentFilter, Plugin};
use crate::style::{BundledStyle, StyleQueue, Stylesheet};
use crate::taxonomy::{Rewrite, TaxonomyDefinition, TaxonomyLabels, TaxonomyRegistry};

/// The name of the series taxonomy.
pub const SERIES_TAXONOMY: &str = "series";

/// The handle of the series navigation stylesheet.
pub const SERIES_STYLE_HANDLE: &str = "series-style";

const SERIES_STYLE_SOURCE: &str = include_str!("../assets/sass/style.scss");

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SeriesConfig {
    /// The path segment series archives live under.
    pub rewrite_slug: String,

    /// The path of the compiled stylesheet, relative to the site root.
    pub stylesheet: String,
}

impl Default for SeriesConfig {
    fn default() -> Self {
        Self {
            rewrite_slug: SERIES_TAXONOMY.to_string(),
            stylesheet: "post-series/css/style.css".to_string(),
        }
    }
}

/// Returns the definition of the hierarchical series taxonomy.
pub fn series_taxonomy(config: &SeriesConfig) -> TaxonomyDefinition {
    TaxonomyDefinition {
        name: SERIES_TAXONOMY.to_string(),
        object_types: vec![PostType::Post],
        hierarchical: true,
        labels: TaxonomyLabels {
            name: "Series".to_string(),
            singular_name: "Series".to_string(),
            search_items: "Search Series".to_string(),
            all_items: "Series".to_string(),
            parent_item: "Parent Series".to_string(),
            parent_item_colon: "Parent Series:".to_string(),
            edit_item: "Edit Series".to_string(),
            update_item: "Update Series".to_string(),
            add_new_item: "Add New Series".to_string(),
            new_item_name: "New Series Name".to_string(),
            menu_name: "Series".to_string(),
        },
        show_ui: true,
        show_admin_column: true,
        query_var: true,
        rewrite: Some(Rewrite {
            slug: config.rewrite_slug.clone(),
        }),
    }
}

/// Groups posts into series and links every post in a series from the top of
/// each of its posts.
#[derive(Debug, Clone, Default)]
pub struct PostSeries {
    config: SeriesConfig,
}

impl PostSeries {
    pub fn new(config: SeriesConfig) -> Self {
        Self { config }
    }

    pub fn stylesheet(&self) -> Stylesheet {
        Stylesheet::new(SERIES_STYLE_HANDLE, self.config.stylesheet.clone())
    }
}

impl Plugin for PostSeries {
    fn name(&self) -> &str {
        "post-series"
    }

    fn register_taxonomies(&self, registry: &mut TaxonomyRegistry) {
        registry.register(series_taxonomy(&self.config));
    }

    fn enqueue_styles(&self, styles: &mut StyleQueue) {
        styles.enqueue(self.stylesheet());
    }

    fn content_filter(&self) -> Option<ContentFilter> {
        Some(Arc::new(
            |content: &str, post: &Post, source: &dyn ContentSource| {
                prepend_series_navigation(SERIES_TAXONOMY, content, post, source)
            },
        ))
    }

    fn bundled_styles(&self) -> Vec<BundledStyle> {
        vec![BundledStyle {
            output_path: PathBuf::from(self.config.stylesheet.trim_start_matches('/')),
            source: SERIES_STYLE_SOURCE,
        }]
    }
}
