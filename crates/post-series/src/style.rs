use std::path::PathBuf;

use auk::*;
use indexmap::IndexMap;
use thiserror::Error;
use tracing::debug;

/// A stylesheet to be linked from the `<head>` of a rendered page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stylesheet {
    pub handle: String,

    /// Either an absolute URL or a path relative to the site root.
    pub href: String,
}

impl Stylesheet {
    pub fn new(handle: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            href: href.into(),
        }
    }

    fn resolved_href(&self) -> String {
        if self.href.contains("://") || self.href.starts_with('/') {
            self.href.clone()
        } else {
            format!("/{}", self.href)
        }
    }

    /// Returns the `<link>` element for this stylesheet.
    pub fn to_element(&self) -> HtmlElement {
        link()
            .rel("stylesheet")
            .attr("id", format!("{}-css", self.handle))
            .href(self.resolved_href())
    }
}

/// The stylesheets enqueued for a single page render.
#[derive(Debug, Default)]
pub struct StyleQueue {
    styles: IndexMap<String, Stylesheet>,
}

impl StyleQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueues the stylesheet, returning `false` if a stylesheet with the same
    /// handle is already enqueued.
    pub fn enqueue(&mut self, stylesheet: Stylesheet) -> bool {
        if self.styles.contains_key(&stylesheet.handle) {
            debug!(handle = %stylesheet.handle, "stylesheet already enqueued");
            return false;
        }

        debug!(handle = %stylesheet.handle, href = %stylesheet.href, "enqueued stylesheet");
        self.styles.insert(stylesheet.handle.clone(), stylesheet);

        true
    }

    pub fn get(&self, handle: &str) -> Option<&Stylesheet> {
        self.styles.get(handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stylesheet> {
        self.styles.values()
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Returns the `<link>` elements for every enqueued stylesheet, in
    /// enqueue order.
    pub fn to_elements(&self) -> Vec<HtmlElement> {
        self.styles.values().map(Stylesheet::to_element).collect()
    }
}

#[derive(Error, Debug)]
pub enum StyleError {
    #[error("failed to compile stylesheet '{path}': {message}")]
    Compile { path: PathBuf, message: String },
}

/// A Sass stylesheet shipped with a plugin, compiled to CSS when the site is
/// rendered.
#[derive(Debug, Clone)]
pub struct BundledStyle {
    /// Where the compiled CSS is written, relative to the output directory.
    pub output_path: PathBuf,
    pub source: &'static str,
}

impl BundledStyle {
    pub fn compile(&self) -> Result<String, StyleError> {
        let options = grass::Options::default().style(grass::OutputStyle::Compressed);

        grass::from_string(self.source.to_owned(), &options).map_err(|err| {
            StyleError::Compile {
                path: self.output_path.clone(),
                message: err.to_string(),
            }
        })
    }
}
