use std::collections::HashMap;
use std::path::PathBuf;

use crate::content::{
    FileInfo, Post, PostFrontMatter, PostId, PostPath, PostStatus, PostType, Repository,
};
use crate::permalink::Permalink;
use crate::taxonomy::TaxonomyRegistry;
use crate::{series_taxonomy, SeriesConfig, SiteConfig};

pub struct PostFixture {
    pub id: u64,
    pub title: &'static str,
    pub date: &'static str,
    pub status: PostStatus,
    pub post_type: PostType,
    pub series: &'static [&'static str],
    pub tags: &'static [&'static str],
}

impl PostFixture {
    pub fn new(id: u64, title: &'static str, date: &'static str) -> Self {
        Self {
            id,
            title,
            date,
            status: PostStatus::Publish,
            post_type: PostType::Post,
            series: &[],
            tags: &[],
        }
    }
}

pub fn make_config() -> SiteConfig {
    SiteConfig {
        base_url: "https://example.com".to_string(),
        ..Default::default()
    }
}

pub fn make_post(fixture: PostFixture) -> Post {
    let config = make_config();

    let slug = slug::slugify(fixture.title);
    let root_path = PathBuf::from("content");
    let file = FileInfo::new(&root_path, format!("content/blog/{slug}.md"));
    let path = PostPath::new(&file, &slug);

    let mut taxonomies = HashMap::new();
    for (taxonomy, names) in [("series", fixture.series), ("tags", fixture.tags)] {
        if !names.is_empty() {
            taxonomies.insert(
                taxonomy.to_string(),
                names.iter().map(ToString::to_string).collect(),
            );
        }
    }

    Post {
        id: PostId(fixture.id),
        meta: PostFrontMatter {
            title: Some(fixture.title.to_string()),
            slug: None,
            date: Some(fixture.date.to_string()),
            status: fixture.status,
            post_type: fixture.post_type,
            taxonomies,
        },
        permalink: Permalink::from_path(&config, path.as_str()).unwrap(),
        path,
        file,
        slug,
        raw_content: String::new(),
    }
}

/// Returns an empty repository with the series taxonomy registered.
pub fn make_repository() -> Repository {
    let mut taxonomies = TaxonomyRegistry::new();
    taxonomies.register(series_taxonomy(&SeriesConfig::default()));

    Repository::new(make_config(), taxonomies)
}
