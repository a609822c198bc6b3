//! Taxonomy definitions and the registry that holds them.

use indexmap::IndexMap;
use tracing::debug;

use crate::content::PostType;

/// The labels shown for a taxonomy in administrative views.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyLabels {
    pub name: String,
    pub singular_name: String,
    pub search_items: String,
    pub all_items: String,
    pub parent_item: String,
    pub parent_item_colon: String,
    pub edit_item: String,
    pub update_item: String,
    pub add_new_item: String,
    pub new_item_name: String,
    pub menu_name: String,
}

/// The URL rewrite rule for a taxonomy's term archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxonomyDefinition {
    pub name: String,

    /// The entry types the taxonomy can be attached to.
    pub object_types: Vec<PostType>,

    /// Whether terms may have a parent term.
    pub hierarchical: bool,
    pub labels: TaxonomyLabels,
    pub show_ui: bool,
    pub show_admin_column: bool,
    pub query_var: bool,
    pub rewrite: Option<Rewrite>,
}

impl TaxonomyDefinition {
    pub fn applies_to(&self, post_type: PostType) -> bool {
        self.object_types.contains(&post_type)
    }

    /// Returns the path segment term archives live under.
    pub fn rewrite_slug(&self) -> &str {
        self.rewrite
            .as_ref()
            .map(|rewrite| rewrite.slug.as_str())
            .unwrap_or(&self.name)
    }
}

/// The taxonomies registered with a site, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct TaxonomyRegistry {
    taxonomies: IndexMap<String, TaxonomyDefinition>,
}

impl TaxonomyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the given taxonomy.
    ///
    /// Registering a taxonomy under a name that is already taken replaces the
    /// previous definition.
    pub fn register(&mut self, taxonomy: TaxonomyDefinition) {
        let name = taxonomy.name.clone();

        match self.taxonomies.insert(name.clone(), taxonomy) {
            Some(_) => debug!(taxonomy = %name, "replaced taxonomy definition"),
            None => debug!(taxonomy = %name, "registered taxonomy"),
        }
    }

    pub fn get(&self, name: &str) -> Option<&TaxonomyDefinition> {
        self.taxonomies.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.taxonomies.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaxonomyDefinition> {
        self.taxonomies.values()
    }

    pub fn len(&self) -> usize {
        self.taxonomies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taxonomies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn make_taxonomy(name: &str, rewrite: Option<&str>) -> TaxonomyDefinition {
        TaxonomyDefinition {
            name: name.to_string(),
            object_types: vec![PostType::Post],
            hierarchical: false,
            labels: TaxonomyLabels {
                name: "Tags".to_string(),
                singular_name: "Tag".to_string(),
                search_items: "Search Tags".to_string(),
                all_items: "All Tags".to_string(),
                parent_item: String::new(),
                parent_item_colon: String::new(),
                edit_item: "Edit Tag".to_string(),
                update_item: "Update Tag".to_string(),
                add_new_item: "Add New Tag".to_string(),
                new_item_name: "New Tag Name".to_string(),
                menu_name: "Tags".to_string(),
            },
            show_ui: true,
            show_admin_column: false,
            query_var: true,
            rewrite: rewrite.map(|slug| Rewrite {
                slug: slug.to_string(),
            }),
        }
    }

    #[test]
    fn test_register_replaces_existing_definition() {
        let mut registry = TaxonomyRegistry::new();

        registry.register(make_taxonomy("tags", None));
        registry.register(make_taxonomy("tags", Some("topics")));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get("tags").unwrap().rewrite_slug(), "topics");
    }

    #[test]
    fn test_rewrite_slug_defaults_to_name() {
        let taxonomy = make_taxonomy("tags", None);

        assert_eq!(taxonomy.rewrite_slug(), "tags");
        assert!(taxonomy.applies_to(PostType::Post));
        assert!(!taxonomy.applies_to(PostType::Page));
    }
}
