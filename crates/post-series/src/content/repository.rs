use std::collections::HashMap;

use tracing::{debug, warn};

use crate::content::{
    sort_posts_by, ContentSource, Post, PostId, PostQuery, Posts, SourceError, TaxQuery, Term,
    TermId, Terms,
};
use crate::permalink::Permalink;
use crate::taxonomy::TaxonomyRegistry;
use crate::SiteConfig;

/// An in-memory repository for the posts and taxonomy terms of a site.
pub struct Repository {
    config: SiteConfig,
    taxonomies: TaxonomyRegistry,
    posts: Posts,
    terms: Terms,
    post_terms: HashMap<PostId, Vec<TermId>>,
    next_term_id: u64,
}

impl Repository {
    /// Returns a new [`Repository`] for the given taxonomies.
    pub fn new(config: SiteConfig, taxonomies: TaxonomyRegistry) -> Self {
        Self {
            config,
            taxonomies,
            posts: Posts::default(),
            terms: Terms::default(),
            post_terms: HashMap::new(),
            next_term_id: 0,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn taxonomies(&self) -> &TaxonomyRegistry {
        &self.taxonomies
    }

    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    pub fn get_post(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    /// Returns the id following the highest post id in the repository.
    pub fn next_post_id(&self) -> PostId {
        PostId(self.posts.keys().map(|id| id.0).max().map_or(1, |max| max + 1))
    }

    pub fn terms<'a>(&'a self, taxonomy: &'a str) -> impl Iterator<Item = &'a Term> {
        self.terms
            .values()
            .filter(move |term| term.taxonomy == taxonomy)
    }

    pub fn get_term(&self, id: TermId) -> Option<&Term> {
        self.terms.get(&id)
    }

    /// Adds the given [`Post`] and assigns the terms named in its front matter.
    ///
    /// Terms for taxonomies that are not registered, or that do not apply to
    /// the post's type, are skipped.
    pub fn add_post(&mut self, post: Post) -> Result<PostId, SourceError> {
        let id = post.id;
        if self.posts.contains_key(&id) {
            return Err(SourceError::DuplicatePost(id));
        }

        let post_type = post.meta.post_type;
        let mut taxonomies = post.meta.taxonomies.keys().collect::<Vec<_>>();
        taxonomies.sort();

        let assignments = taxonomies
            .into_iter()
            .flat_map(|taxonomy| {
                post.term_names(taxonomy)
                    .iter()
                    .map(move |name| (taxonomy.clone(), name.clone()))
            })
            .collect::<Vec<_>>();

        self.posts.insert(id, post);

        for (taxonomy, name) in assignments {
            let Some(definition) = self.taxonomies.get(&taxonomy) else {
                warn!(post = %id, %taxonomy, "skipping term for unregistered taxonomy");
                continue;
            };

            if !definition.applies_to(post_type) {
                warn!(post = %id, %taxonomy, ?post_type, "skipping term for taxonomy that does not apply");
                continue;
            }

            let term = match self.add_term(&taxonomy, &name, None) {
                Ok(term) => term,
                Err(SourceError::EmptySlug(name)) => {
                    warn!(post = %id, %taxonomy, %name, "skipping term with an empty slug");
                    continue;
                }
                Err(err) => return Err(err),
            };
            self.assign_term(id, term)?;
        }

        Ok(id)
    }

    /// Adds a term to the given taxonomy, returning the existing term when one
    /// with the same slug is already present.
    pub fn add_term(
        &mut self,
        taxonomy: &str,
        name: &str,
        parent: Option<TermId>,
    ) -> Result<TermId, SourceError> {
        let definition = self
            .taxonomies
            .get(taxonomy)
            .ok_or_else(|| SourceError::UnknownTaxonomy(taxonomy.to_string()))?;

        let slug = slug::slugify(name);
        if slug.is_empty() {
            return Err(SourceError::EmptySlug(name.to_string()));
        }

        if let Some(existing) = self
            .terms
            .values()
            .find(|term| term.taxonomy == taxonomy && term.slug == slug)
        {
            return Ok(existing.id);
        }

        if let Some(parent) = parent {
            if !definition.hierarchical {
                return Err(SourceError::NotHierarchical(taxonomy.to_string()));
            }

            let parent_in_taxonomy = self
                .terms
                .get(&parent)
                .is_some_and(|parent| parent.taxonomy == taxonomy);
            if !parent_in_taxonomy {
                return Err(SourceError::UnknownTerm(parent));
            }
        }

        let path = format!("/{}/{slug}", definition.rewrite_slug());
        let permalink = Permalink::for_term(&self.config, definition.rewrite_slug(), &slug)?;

        self.next_term_id += 1;
        let id = TermId(self.next_term_id);

        debug!(term = %id, %taxonomy, %slug, "added term");

        self.terms.insert(
            id,
            Term {
                id,
                taxonomy: taxonomy.to_string(),
                name: name.to_string(),
                slug,
                parent,
                path,
                permalink,
            },
        );

        Ok(id)
    }

    /// Associates the term with the post. Assigning the same term twice is a no-op.
    pub fn assign_term(&mut self, post: PostId, term: TermId) -> Result<(), SourceError> {
        let post_type = self
            .posts
            .get(&post)
            .ok_or(SourceError::UnknownPost(post))?
            .meta
            .post_type;
        let taxonomy = &self
            .terms
            .get(&term)
            .ok_or(SourceError::UnknownTerm(term))?
            .taxonomy;

        let applies = self
            .taxonomies
            .get(taxonomy)
            .is_some_and(|definition| definition.applies_to(post_type));
        if !applies {
            return Err(SourceError::NotAttachable {
                taxonomy: taxonomy.clone(),
                post_type,
            });
        }

        let assigned = self.post_terms.entry(post).or_default();
        if !assigned.contains(&term) {
            assigned.push(term);
        }

        Ok(())
    }

    /// Removes all posts and terms, keeping the registered taxonomies.
    pub fn clear_content(&mut self) {
        self.posts.clear();
        self.terms.clear();
        self.post_terms.clear();
        self.next_term_id = 0;
    }

    fn has_term(&self, post: PostId, tax_query: &TaxQuery) -> bool {
        self.post_terms.get(&post).is_some_and(|terms| {
            terms
                .iter()
                .filter_map(|id| self.terms.get(id))
                .any(|term| {
                    term.taxonomy == tax_query.taxonomy && term.slug == tax_query.term_slug
                })
        })
    }
}

impl ContentSource for Repository {
    fn post_terms(&self, post: PostId, taxonomy: &str) -> Result<Vec<&Term>, SourceError> {
        if !self.taxonomies.contains(taxonomy) {
            return Err(SourceError::UnknownTaxonomy(taxonomy.to_string()));
        }

        if !self.posts.contains_key(&post) {
            return Err(SourceError::UnknownPost(post));
        }

        Ok(self
            .post_terms
            .get(&post)
            .into_iter()
            .flatten()
            .filter_map(|id| self.terms.get(id))
            .filter(|term| term.taxonomy == taxonomy)
            .collect())
    }

    fn query_posts(&self, query: &PostQuery) -> Result<Vec<&Post>, SourceError> {
        if let Some(tax_query) = query.tax_query.as_ref() {
            if !self.taxonomies.contains(&tax_query.taxonomy) {
                return Err(SourceError::UnknownTaxonomy(tax_query.taxonomy.clone()));
            }
        }

        let matches = self
            .posts
            .values()
            .filter(|post| query.admits(post))
            .filter(|post| {
                query
                    .tax_query
                    .as_ref()
                    .map_or(true, |tax_query| self.has_term(post.id, tax_query))
            })
            .collect::<Vec<_>>();

        let mut posts = sort_posts_by(query.sort_by, query.order, matches);
        if let Some(limit) = query.limit {
            posts.truncate(limit);
        }

        debug!(?query, count = posts.len(), "queried posts");

        Ok(posts)
    }
}
