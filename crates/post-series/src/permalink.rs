use std::fmt;
use std::str::FromStr;

use url::Url;

use crate::SiteConfig;

/// An absolute URL to a rendered resource on the site.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Clone)]
pub struct Permalink(Url);

impl Permalink {
    pub fn from_path(config: &SiteConfig, path: &str) -> Result<Self, url::ParseError> {
        let suffix = if path.ends_with('/') || path.is_empty() {
            ""
        } else {
            "/"
        };
        let base_url = config.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');

        Ok(Self(Url::from_str(&format!("{base_url}/{path}{suffix}"))?))
    }

    /// Returns the permalink of a taxonomy term archive, e.g. `/series/trilogy/`.
    pub fn for_term(
        config: &SiteConfig,
        rewrite_slug: &str,
        term_slug: &str,
    ) -> Result<Self, url::ParseError> {
        Self::from_path(config, &format!("/{rewrite_slug}/{term_slug}"))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn path(&self) -> &str {
        self.0.path()
    }
}

impl fmt::Display for Permalink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_config(base_url: &str) -> SiteConfig {
        SiteConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_permalink() {
        assert_eq!(
            Permalink::from_path(&make_config("https://example.com/"), "/").unwrap(),
            Permalink("https://example.com/".parse().unwrap())
        );
        assert_eq!(
            Permalink::from_path(&make_config("https://example.com"), "/").unwrap(),
            Permalink("https://example.com/".parse().unwrap())
        );
        assert_eq!(
            Permalink::from_path(&make_config("https://example.com"), "").unwrap(),
            Permalink("https://example.com/".parse().unwrap())
        );
        assert_eq!(
            Permalink::from_path(&make_config("https://example.com"), "/blog/part-one").unwrap(),
            Permalink("https://example.com/blog/part-one/".parse().unwrap())
        );
    }

    #[test]
    fn test_term_permalink() {
        let permalink =
            Permalink::for_term(&make_config("https://example.com"), "series", "trilogy").unwrap();

        assert_eq!(permalink.as_str(), "https://example.com/series/trilogy/");
        assert_eq!(permalink.path(), "/series/trilogy/");
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(Permalink::from_path(&make_config("not a url"), "/blog").is_err());
    }
}
