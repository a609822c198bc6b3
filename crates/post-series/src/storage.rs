use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::content::{Post, Term};

pub trait Store {
    type Error: std::error::Error;

    fn store_rendered_post(&self, post: &Post, rendered_html: String) -> Result<(), Self::Error>;

    fn store_rendered_term(&self, term: &Term, rendered_html: String) -> Result<(), Self::Error>;

    fn store_css(&self, path: &Path, css: String) -> Result<(), Self::Error>;
}

pub struct DiskStorage {
    output_path: PathBuf,
}

impl DiskStorage {
    pub fn new(output_path: PathBuf) -> Self {
        Self { output_path }
    }

    fn write_index(&self, path: &str, rendered_html: String) -> io::Result<()> {
        let output_dir = self.output_path.join(path.trim_matches('/'));

        fs::create_dir_all(&output_dir)?;

        let mut output_file = File::create(output_dir.join("index.html"))?;
        output_file.write_all(rendered_html.as_bytes())?;

        Ok(())
    }
}

impl Store for DiskStorage {
    type Error = io::Error;

    fn store_rendered_post(&self, post: &Post, rendered_html: String) -> Result<(), Self::Error> {
        self.write_index(post.path.as_str(), rendered_html)
    }

    fn store_rendered_term(&self, term: &Term, rendered_html: String) -> Result<(), Self::Error> {
        self.write_index(&term.path, rendered_html)
    }

    fn store_css(&self, path: &Path, css: String) -> Result<(), Self::Error> {
        let output_path = self.output_path.join(path);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut output_file = File::create(&output_path)?;
        output_file.write_all(css.as_bytes())?;

        Ok(())
    }
}

/// Stores rendered output in memory, keyed by output path.
///
/// Pages are keyed by their directory with a trailing slash, e.g.
/// `/blog/hello-world/`.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    storage: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStorage {
    pub fn new(storage: Arc<RwLock<HashMap<String, String>>>) -> Self {
        Self { storage }
    }

    pub fn get(&self, path: &str) -> Option<String> {
        self.storage.read().ok()?.get(path).cloned()
    }

    pub fn paths(&self) -> Vec<String> {
        let mut paths = self
            .storage
            .read()
            .map(|storage| storage.keys().cloned().collect::<Vec<_>>())
            .unwrap_or_default();
        paths.sort();
        paths
    }

    fn insert(&self, path: String, contents: String) -> Result<(), InMemoryStorageError> {
        self.storage
            .write()
            .map_err(|_| InMemoryStorageError::Poisoned)?
            .insert(path, contents);

        Ok(())
    }
}

#[derive(Error, Debug)]
pub enum InMemoryStorageError {
    #[error("poisoned")]
    Poisoned,
}

impl Store for InMemoryStorage {
    type Error = InMemoryStorageError;

    fn store_rendered_post(&self, post: &Post, rendered_html: String) -> Result<(), Self::Error> {
        self.insert(format!("{}/", post.path), rendered_html)
    }

    fn store_rendered_term(&self, term: &Term, rendered_html: String) -> Result<(), Self::Error> {
        self.insert(format!("{}/", term.path), rendered_html)
    }

    fn store_css(&self, path: &Path, css: String) -> Result<(), Self::Error> {
        self.insert(format!("/{}", path.to_string_lossy()), css)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::content::PostId;
    use crate::test_utils::{make_config, make_post, make_repository, PostFixture};

    use super::*;

    #[test]
    fn test_disk_storage() {
        let output = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(output.path().to_owned());
        let post = make_post(PostFixture::new(1, "Part One", "2024-01-01"));

        storage
            .store_rendered_post(&post, "<p>One</p>".to_string())
            .unwrap();
        storage
            .store_css(Path::new("post-series/css/style.css"), "a{}".to_string())
            .unwrap();

        assert_eq!(
            fs::read_to_string(output.path().join("blog/part-one/index.html")).unwrap(),
            "<p>One</p>"
        );
        assert_eq!(
            fs::read_to_string(output.path().join("post-series/css/style.css")).unwrap(),
            "a{}"
        );
    }

    #[test]
    fn test_in_memory_storage() {
        let storage = InMemoryStorage::default();
        let post = make_post(PostFixture::new(1, "Part One", "2024-01-01"));

        storage
            .store_rendered_post(&post, "<p>One</p>".to_string())
            .unwrap();
        storage
            .store_css(Path::new("post-series/css/style.css"), "a{}".to_string())
            .unwrap();

        assert_eq!(
            storage.paths(),
            vec!["/blog/part-one/", "/post-series/css/style.css"]
        );
        assert_eq!(storage.get("/blog/part-one/").as_deref(), Some("<p>One</p>"));
    }

    #[test]
    fn test_disk_storage_uses_unencoded_paths() {
        let output = tempfile::tempdir().unwrap();
        let storage = DiskStorage::new(output.path().to_owned());
        let post = Post::parse(
            PostId(1),
            &make_config(),
            "+++\ntitle = \"Notes\"\n+++\n",
            "content",
            Path::new("content/blog/my café.md"),
        )
        .unwrap();

        assert_eq!(post.permalink.path(), "/blog/my%20caf%C3%A9/");

        storage
            .store_rendered_post(&post, "<p>Notes</p>".to_string())
            .unwrap();

        assert_eq!(
            fs::read_to_string(output.path().join("blog/my café/index.html")).unwrap(),
            "<p>Notes</p>"
        );
        assert!(!output.path().join("blog/my%20caf%C3%A9").exists());
    }

    #[test]
    fn test_store_rendered_term() {
        let output = tempfile::tempdir().unwrap();
        let disk = DiskStorage::new(output.path().to_owned());
        let memory = InMemoryStorage::default();

        let mut repository = make_repository();
        repository
            .add_post(make_post(PostFixture {
                series: &["Trilogy"],
                ..PostFixture::new(1, "Part One", "2024-01-01")
            }))
            .unwrap();
        let term = repository.terms("series").next().unwrap();

        disk.store_rendered_term(term, "<ol></ol>".to_string())
            .unwrap();
        memory
            .store_rendered_term(term, "<ol></ol>".to_string())
            .unwrap();

        assert_eq!(
            fs::read_to_string(output.path().join("series/trilogy/index.html")).unwrap(),
            "<ol></ol>"
        );
        assert_eq!(memory.paths(), vec!["/series/trilogy/"]);
    }
}
