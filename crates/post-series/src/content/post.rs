use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::{fmt, fs};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::content::{from_toml_datetime, parse_front_matter, FileInfo, FrontMatterError};
use crate::permalink::Permalink;
use crate::SiteConfig;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Serialize, Deserialize)]
pub struct PostId(pub u64);

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The publication status of a post. Only published posts appear on the site.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PostStatus {
    #[default]
    Publish,
    Draft,
    Private,
}

#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum PostType {
    /// A dated blog article.
    #[default]
    Post,

    /// A standalone page.
    Page,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone)]
pub struct PostPath(pub(crate) String);

impl fmt::Display for PostPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl PostPath {
    pub fn new(file: &FileInfo, slug: &str) -> Self {
        if file.components.is_empty() {
            Self(format!("/{slug}"))
        } else {
            Self(format!("/{}/{slug}", file.components.join("/")))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostFrontMatter {
    pub title: Option<String>,
    pub slug: Option<String>,

    #[serde(default, deserialize_with = "from_toml_datetime")]
    pub date: Option<String>,

    #[serde(default)]
    pub status: PostStatus,

    #[serde(default, rename = "type")]
    pub post_type: PostType,

    /// Term names keyed by taxonomy name, in declaration order.
    #[serde(default)]
    pub taxonomies: HashMap<String, Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: PostId,
    pub meta: PostFrontMatter,
    pub file: FileInfo,
    pub path: PostPath,
    pub slug: String,
    pub permalink: Permalink,
    pub raw_content: String,
}

#[derive(Error, Debug)]
pub enum ParsePostError {
    #[error("failed to read post: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid front matter in '{filepath}': {source}")]
    InvalidFrontMatter {
        filepath: PathBuf,
        source: FrontMatterError,
    },

    #[error("invalid permalink for '{filepath}': {source}")]
    InvalidPermalink {
        filepath: PathBuf,
        source: url::ParseError,
    },
}

impl Post {
    pub fn from_path(
        id: PostId,
        config: &SiteConfig,
        root_path: impl AsRef<Path>,
        path: impl AsRef<Path>,
    ) -> Result<Self, ParsePostError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;

        Self::parse(id, config, &contents, root_path, path)
    }

    pub fn parse(
        id: PostId,
        config: &SiteConfig,
        text: &str,
        root_path: impl AsRef<Path>,
        filepath: &Path,
    ) -> Result<Self, ParsePostError> {
        let (meta, content) =
            parse_front_matter::<PostFrontMatter>(text).map_err(|source| {
                ParsePostError::InvalidFrontMatter {
                    filepath: filepath.to_owned(),
                    source,
                }
            })?;

        let file = FileInfo::new(root_path, filepath);

        let slug = meta.slug.clone().unwrap_or_else(|| {
            filepath
                .file_stem()
                .map(|stem| stem.to_string_lossy().to_string())
                .unwrap_or_default()
        });

        let path = PostPath::new(&file, &slug);
        let permalink = Permalink::from_path(config, path.as_str()).map_err(|source| {
            ParsePostError::InvalidPermalink {
                filepath: filepath.to_owned(),
                source,
            }
        })?;

        Ok(Self {
            id,
            meta,
            file,
            path,
            slug,
            permalink,
            raw_content: content.to_string(),
        })
    }

    /// Returns the display title, falling back to the slug.
    pub fn title(&self) -> &str {
        self.meta.title.as_deref().unwrap_or(&self.slug)
    }

    pub fn is_published(&self) -> bool {
        self.meta.status == PostStatus::Publish
    }

    /// Returns the term names declared for the given taxonomy.
    pub fn term_names(&self, taxonomy: &str) -> &[String] {
        self.meta
            .taxonomies
            .get(taxonomy)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}
