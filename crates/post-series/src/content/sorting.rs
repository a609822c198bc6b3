use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::content::Post;
use crate::date::parse_date;

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    /// Sort by publication date.
    #[default]
    Date,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Oldest first.
    #[default]
    Ascending,

    /// Newest first.
    Descending,
}

/// Sorts the given posts.
///
/// Posts that cannot be sorted (e.g., posts without a parseable date when
/// sorting by date) are kept after the sorted ones. Ties are broken by the
/// post path so that the order is stable across runs.
pub fn sort_posts_by(sort_by: SortBy, order: SortOrder, posts: Vec<&Post>) -> Vec<&Post> {
    let (mut sortable, mut not_sortable): (Vec<&Post>, Vec<&Post>) =
        posts.into_iter().partition(|post| match sort_by {
            SortBy::Date => post.meta.date.as_deref().and_then(parse_date).is_some(),
        });

    sortable.sort_by(|a, b| {
        let ord = match sort_by {
            SortBy::Date => {
                let a_date = a.meta.date.as_deref().and_then(parse_date);
                let b_date = b.meta.date.as_deref().and_then(parse_date);

                match order {
                    SortOrder::Ascending => a_date.cmp(&b_date),
                    SortOrder::Descending => b_date.cmp(&a_date),
                }
            }
        };

        match ord {
            Ordering::Equal => a.path.cmp(&b.path),
            ord => ord,
        }
    });

    not_sortable.sort_by(|a, b| a.path.cmp(&b.path));

    sortable.extend(not_sortable);
    sortable
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;

    use crate::content::{FileInfo, PostFrontMatter, PostId, PostPath};
    use crate::permalink::Permalink;
    use crate::SiteConfig;

    use super::*;

    fn make_post(filepath: &str, date: Option<&str>) -> Post {
        let config = SiteConfig {
            base_url: "https://example.com".to_string(),
            ..Default::default()
        };

        let root_path = PathBuf::from("content");
        let file = FileInfo::new(&root_path, filepath);
        let slug = file.path.file_stem().unwrap().to_string_lossy().to_string();
        let path = PostPath::new(&file, &slug);

        Post {
            id: PostId(0),
            meta: PostFrontMatter {
                date: date.map(ToString::to_string),
                ..Default::default()
            },
            permalink: Permalink::from_path(&config, path.as_str()).unwrap(),
            path,
            file,
            slug,
            raw_content: String::new(),
        }
    }

    fn slugs(posts: Vec<&Post>) -> Vec<&str> {
        posts.into_iter().map(|post| post.slug.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date() {
        let posts = vec![
            make_post("content/blog/year-in-review.md", Some("2023-12-31")),
            make_post("content/blog/undated.md", None),
            make_post("content/blog/hello-world.md", Some("2023-07-01")),
            make_post("content/blog/happy-new-year.md", Some("2024-01-01T08:00:00Z")),
        ];

        assert_eq!(
            slugs(sort_posts_by(
                SortBy::Date,
                SortOrder::Ascending,
                posts.iter().collect()
            )),
            vec!["hello-world", "year-in-review", "happy-new-year", "undated"]
        );

        assert_eq!(
            slugs(sort_posts_by(
                SortBy::Date,
                SortOrder::Descending,
                posts.iter().collect()
            )),
            vec!["happy-new-year", "year-in-review", "hello-world", "undated"]
        );
    }

    #[test]
    fn test_date_ties_are_broken_by_path() {
        let posts = vec![
            make_post("content/blog/b.md", Some("2024-01-01")),
            make_post("content/blog/a.md", Some("2024-01-01")),
        ];

        assert_eq!(
            slugs(sort_posts_by(
                SortBy::Date,
                SortOrder::Ascending,
                posts.iter().collect()
            )),
            vec!["a", "b"]
        );
    }
}
