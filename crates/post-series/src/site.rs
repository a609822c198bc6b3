use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use auk::renderer::HtmlElementRenderer;
use auk::HtmlElement;
use thiserror::Error;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::content::{
    ContentSource, ParsePostError, Post, PostQuery, PostType, Repository, SourceError, Term,
};
use crate::markdown::markdown_to_html;
use crate::plugin::{ContentFilter, ContentFilterError, Plugin};
use crate::render::{
    default_post_template, default_term_template, BaseRenderContext, PostToRender,
    RenderPostContext, RenderTermContext, TermToRender,
};
use crate::storage::{DiskStorage, Store};
use crate::style::{StyleError, StyleQueue};
use crate::taxonomy::TaxonomyRegistry;
use crate::SiteConfig;

pub type RenderPost = Arc<dyn Fn(&RenderPostContext) -> HtmlElement + Send + Sync>;

pub type RenderTerm = Arc<dyn Fn(&RenderTermContext) -> HtmlElement + Send + Sync>;

struct Templates {
    pub post: RenderPost,
    pub term: RenderTerm,
}

impl Default for Templates {
    fn default() -> Self {
        Self {
            post: Arc::new(default_post_template),
            term: Arc::new(default_term_template),
        }
    }
}

#[derive(Error, Debug)]
pub enum LoadSiteError {
    #[error("failed to walk content directory: {0}")]
    Io(#[from] walkdir::Error),

    #[error("failed to parse post: {0}")]
    ParsePost(#[from] ParsePostError),

    #[error("failed to add post: {0}")]
    Source(#[from] SourceError),
}

#[derive(Error, Debug)]
pub enum RenderSiteError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("render error: {0}")]
    Render(String),

    #[error("content filter failed for '{filepath}': {source}")]
    Filter {
        filepath: PathBuf,
        source: ContentFilterError,
    },

    #[error("content source error: {0}")]
    Source(#[from] SourceError),

    #[error("style error: {0}")]
    Style(#[from] StyleError),

    #[error("storage error: {0}")]
    Storage(String),
}

struct BuildSiteParams {
    root_path: PathBuf,
    config: SiteConfig,
    plugins: Vec<Arc<dyn Plugin>>,
    content_filters: Vec<ContentFilter>,
    templates: Templates,
}

pub struct Site {
    content_path: PathBuf,
    output_path: PathBuf,
    plugins: Vec<Arc<dyn Plugin>>,
    content_filters: Vec<ContentFilter>,
    templates: Templates,
    repository: Repository,
}

impl Site {
    pub fn builder() -> SiteBuilder<()> {
        SiteBuilder::new()
    }

    fn from_params(params: BuildSiteParams) -> Self {
        let root_path = params.root_path;

        let mut taxonomies = TaxonomyRegistry::new();
        for plugin in &params.plugins {
            debug!(plugin = plugin.name(), "registering taxonomies");
            plugin.register_taxonomies(&mut taxonomies);
        }

        Site {
            content_path: root_path.join("content"),
            output_path: root_path.join("public"),
            plugins: params.plugins,
            content_filters: params.content_filters,
            templates: params.templates,
            repository: Repository::new(params.config, taxonomies),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    pub fn config(&self) -> &SiteConfig {
        self.repository.config()
    }

    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// Loads every post under the `content` directory, replacing any
    /// previously loaded content.
    pub fn load(&mut self) -> Result<(), LoadSiteError> {
        self.repository.clear_content();

        let mut paths = Vec::new();

        for entry in WalkDir::new(&self.content_path).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(filename) = entry.file_name().to_str() else {
                continue;
            };

            if !filename.ends_with(".md") || filename.starts_with('.') || filename.starts_with('_')
            {
                continue;
            }

            paths.push(entry.into_path());
        }

        paths.sort();

        for path in paths {
            let id = self.repository.next_post_id();
            let post = Post::from_path(id, self.repository.config(), &self.content_path, &path)?;

            debug!(post = %id, path = %post.path, "loaded post");
            self.repository.add_post(post)?;
        }

        info!(
            posts = self.repository.posts().count(),
            content_path = ?self.content_path,
            "loaded site content"
        );

        Ok(())
    }

    /// Renders the site to the `public` directory.
    pub fn render(&self) -> Result<(), RenderSiteError> {
        self.render_to(&DiskStorage::new(self.output_path.clone()))
    }

    pub fn render_to(&self, storage: &impl Store) -> Result<(), RenderSiteError> {
        let mut rendered_posts = 0;
        for post in self.repository.posts().filter(|post| post.is_published()) {
            let rendered = self.render_post(post)?;

            storage
                .store_rendered_post(post, rendered)
                .map_err(|err| RenderSiteError::Storage(err.to_string()))?;
            rendered_posts += 1;
        }

        let mut rendered_terms = 0;
        for taxonomy in self.repository.taxonomies().iter() {
            for term in self.repository.terms(&taxonomy.name) {
                let posts = self.term_posts(term)?;
                if posts.is_empty() {
                    debug!(term = %term.slug, taxonomy = %term.taxonomy, "skipping archive without published posts");
                    continue;
                }

                let rendered = self.render_archive(term, posts)?;

                storage
                    .store_rendered_term(term, rendered)
                    .map_err(|err| RenderSiteError::Storage(err.to_string()))?;
                rendered_terms += 1;
            }
        }

        for plugin in &self.plugins {
            for style in plugin.bundled_styles() {
                let css = style.compile()?;

                storage
                    .store_css(&style.output_path, css)
                    .map_err(|err| RenderSiteError::Storage(err.to_string()))?;
            }
        }

        info!(
            posts = rendered_posts,
            terms = rendered_terms,
            "rendered site"
        );

        Ok(())
    }

    /// Renders a single post, running every content filter over its body.
    pub fn render_post(&self, post: &Post) -> Result<String, RenderSiteError> {
        let styles = self.enqueue_styles();
        let source: &dyn ContentSource = &self.repository;

        let mut content = markdown_to_html(&post.raw_content);
        for filter in &self.content_filters {
            content = filter(&content, post, source).map_err(|source| RenderSiteError::Filter {
                filepath: post.file.path.clone(),
                source,
            })?;
        }

        let ctx = RenderPostContext {
            base: BaseRenderContext {
                config: self.repository.config(),
                styles: &styles,
            },
            post: PostToRender::from_post(post, content),
        };

        render_html(&(self.templates.post)(&ctx))
    }

    /// Renders the archive page of a taxonomy term.
    pub fn render_term(&self, term: &Term) -> Result<String, RenderSiteError> {
        self.render_archive(term, self.term_posts(term)?)
    }

    fn term_posts(&self, term: &Term) -> Result<Vec<&Post>, SourceError> {
        let query = PostQuery::new(PostType::Post).in_term(&term.taxonomy, &term.slug);

        self.repository.query_posts(&query)
    }

    fn render_archive(&self, term: &Term, posts: Vec<&Post>) -> Result<String, RenderSiteError> {
        let styles = self.enqueue_styles();

        let ctx = RenderTermContext {
            base: BaseRenderContext {
                config: self.repository.config(),
                styles: &styles,
            },
            term: TermToRender::from_term(term, posts),
        };

        render_html(&(self.templates.term)(&ctx))
    }

    fn enqueue_styles(&self) -> StyleQueue {
        let mut styles = StyleQueue::new();
        for plugin in &self.plugins {
            plugin.enqueue_styles(&mut styles);
        }

        styles
    }
}

fn render_html(element: &HtmlElement) -> Result<String, RenderSiteError> {
    HtmlElementRenderer::new()
        .render_to_string(element)
        .map_err(|err| RenderSiteError::Render(format!("{err:?}")))
}

pub struct SiteBuilder<T> {
    state: T,
}

impl SiteBuilder<()> {
    pub fn new() -> Self {
        Self { state: () }
    }

    pub fn root(self, root_path: impl AsRef<Path>) -> SiteBuilder<WithRootPath> {
        SiteBuilder {
            state: WithRootPath {
                root_path: root_path.as_ref().to_owned(),
                config: SiteConfig::default(),
                plugins: Vec::new(),
                content_filters: Vec::new(),
                templates: Templates::default(),
            },
        }
    }
}

pub struct WithRootPath {
    root_path: PathBuf,
    config: SiteConfig,
    plugins: Vec<Arc<dyn Plugin>>,
    content_filters: Vec<ContentFilter>,
    templates: Templates,
}

impl SiteBuilder<WithRootPath> {
    pub fn config(mut self, config: SiteConfig) -> Self {
        self.state.config = config;
        self
    }

    /// Adds a plugin. Its content filter, if any, runs after the filters of
    /// previously added plugins and content filters.
    pub fn plugin(mut self, plugin: impl Plugin + 'static) -> Self {
        if let Some(filter) = plugin.content_filter() {
            self.state.content_filters.push(filter);
        }

        self.state.plugins.push(Arc::new(plugin));
        self
    }

    pub fn content_filter(
        mut self,
        filter: impl Fn(&str, &Post, &dyn ContentSource) -> Result<String, ContentFilterError>
            + Send
            + Sync
            + 'static,
    ) -> Self {
        self.state.content_filters.push(Arc::new(filter));
        self
    }

    pub fn post_template(
        mut self,
        template: impl Fn(&RenderPostContext) -> HtmlElement + Send + Sync + 'static,
    ) -> Self {
        self.state.templates.post = Arc::new(template);
        self
    }

    pub fn term_template(
        mut self,
        template: impl Fn(&RenderTermContext) -> HtmlElement + Send + Sync + 'static,
    ) -> Self {
        self.state.templates.term = Arc::new(template);
        self
    }

    pub fn build(self) -> Site {
        Site::from_params(BuildSiteParams {
            root_path: self.state.root_path,
            config: self.state.config,
            plugins: self.state.plugins,
            content_filters: self.state.content_filters,
            templates: self.state.templates,
        })
    }
}
