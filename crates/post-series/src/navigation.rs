//! The series navigation block placed at the top of a post.

use auk::renderer::HtmlElementRenderer;
use auk::*;
use tracing::debug;

use crate::content::{ContentSource, Post, PostId, PostQuery, PostType, Term};
use crate::plugin::ContentFilterError;

/// The class of the element wrapping the navigation block.
pub const NAVIGATION_CLASS: &str = "series-container";

/// The class marking the link to the post being rendered.
pub const CURRENT_CLASS: &str = "current";

/// Builds the navigation block for the post's series in `taxonomy`.
///
/// Returns `None` when the post has no term in the taxonomy. When it has
/// several, only the first is used.
pub fn series_navigation(
    taxonomy: &str,
    post: &Post,
    source: &dyn ContentSource,
) -> Result<Option<HtmlElement>, ContentFilterError> {
    let terms = source.post_terms(post.id, taxonomy)?;

    let Some(term) = terms.first() else {
        return Ok(None);
    };

    if terms.len() > 1 {
        debug!(post = %post.id, term = %term.slug, count = terms.len(), "post is in several series, using the first");
    }

    let query = PostQuery::new(PostType::Post).in_term(taxonomy, term.slug.as_str());
    let posts = source.query_posts(&query)?;

    Ok(Some(navigation_template(term, &posts, post.id)))
}

/// Lists `posts` as numbered parts of `term`, marking the link to `current`.
pub fn navigation_template(term: &Term, posts: &[&Post], current: PostId) -> HtmlElement {
    div()
        .class(NAVIGATION_CLASS)
        .child(
            p().child("This post is part of the series: ").child(
                a().href(term.permalink.as_str())
                    .attr("title", term.name.as_str())
                    .child(term.name.clone()),
            ),
        )
        .child(ol().children(posts.iter().enumerate().map(|(index, post)| {
            let title = post.title();
            let link = a()
                .href(post.permalink.as_str())
                .attr("title", title)
                .child(format!("Part {}: {title}", index + 1));

            let link = if post.id == current {
                link.class(CURRENT_CLASS)
            } else {
                link
            };

            li().child(link)
        })))
}

/// Prepends the series navigation block to `content`.
///
/// Content of posts without a series is returned unchanged.
pub fn prepend_series_navigation(
    taxonomy: &str,
    content: &str,
    post: &Post,
    source: &dyn ContentSource,
) -> Result<String, ContentFilterError> {
    let Some(navigation) = series_navigation(taxonomy, post, source)? else {
        return Ok(content.to_string());
    };

    let fragment = HtmlElementRenderer::new()
        .render_to_string(&navigation)
        .map_err(|err| ContentFilterError::Render(format!("{err:?}")))?;

    Ok(format!("{fragment}{content}"))
}
