use std::collections::HashMap;
use std::ops::Deref;

use auk::*;

use crate::content::{Post, Term};
use crate::date::format_date;
use crate::style::StyleQueue;
use crate::SiteConfig;

pub struct BaseRenderContext<'a> {
    pub(crate) config: &'a SiteConfig,
    pub(crate) styles: &'a StyleQueue,
}

impl<'a> BaseRenderContext<'a> {
    pub fn base_url(&self) -> &'a str {
        &self.config.base_url
    }

    pub fn site_title(&self) -> Option<&'a str> {
        self.config.title.as_deref()
    }

    /// Returns the stylesheets enqueued for the page being rendered.
    pub fn styles(&self) -> &'a StyleQueue {
        self.styles
    }

    /// Returns the `<head>` element for the page, linking every enqueued
    /// stylesheet.
    pub fn head(&self, page_title: &str) -> HtmlElement {
        let page_title = match self.site_title() {
            Some(site_title) => format!("{page_title} | {site_title}"),
            None => page_title.to_string(),
        };

        head()
            .child(meta().attr("charset", "utf-8"))
            .child(title().child(page_title))
            .children(self.styles.to_elements())
    }
}

pub struct RenderPostContext<'a> {
    pub(crate) base: BaseRenderContext<'a>,
    pub post: PostToRender<'a>,
}

impl<'a> Deref for RenderPostContext<'a> {
    type Target = BaseRenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

pub struct PostToRender<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub path: &'a str,
    pub permalink: &'a str,
    pub date: Option<&'a str>,
    pub raw_content: &'a str,

    /// The rendered HTML body, after every content filter has run.
    pub content: String,
    pub taxonomies: &'a HashMap<String, Vec<String>>,
}

impl<'a> PostToRender<'a> {
    pub fn from_post(post: &'a Post, content: String) -> Self {
        Self {
            title: post.title(),
            slug: &post.slug,
            path: post.path.as_str(),
            permalink: post.permalink.as_str(),
            date: post.meta.date.as_deref(),
            raw_content: &post.raw_content,
            content,
            taxonomies: &post.meta.taxonomies,
        }
    }
}

pub struct RenderTermContext<'a> {
    pub(crate) base: BaseRenderContext<'a>,
    pub term: TermToRender<'a>,
}

impl<'a> Deref for RenderTermContext<'a> {
    type Target = BaseRenderContext<'a>;

    fn deref(&self) -> &Self::Target {
        &self.base
    }
}

pub struct TermToRender<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub permalink: &'a str,
    pub posts: Vec<PostLinkToRender<'a>>,
}

impl<'a> TermToRender<'a> {
    pub fn from_term(term: &'a Term, posts: Vec<&'a Post>) -> Self {
        Self {
            name: &term.name,
            slug: &term.slug,
            permalink: term.permalink.as_str(),
            posts: posts.into_iter().map(PostLinkToRender::from_post).collect(),
        }
    }
}

pub struct PostLinkToRender<'a> {
    pub title: &'a str,
    pub permalink: &'a str,
    pub date: Option<&'a str>,
}

impl<'a> PostLinkToRender<'a> {
    pub fn from_post(post: &'a Post) -> Self {
        Self {
            title: post.title(),
            permalink: post.permalink.as_str(),
            date: post.meta.date.as_deref(),
        }
    }
}

pub fn default_post_template(ctx: &RenderPostContext) -> HtmlElement {
    html().attr("lang", "en").child(ctx.head(ctx.post.title)).child(
        body().child(
            div()
                .class("post")
                .child(h1().child(ctx.post.title))
                .children(
                    ctx.post
                        .date
                        .and_then(|date| format_date(date, "%B %-d, %Y"))
                        .map(|date| p().class("post-date").child(date)),
                )
                .child(div().class("post-content").child(ctx.post.content.clone())),
        ),
    )
}

pub fn default_term_template(ctx: &RenderTermContext) -> HtmlElement {
    html().attr("lang", "en").child(ctx.head(ctx.term.name)).child(
        body().child(
            div()
                .class("series-archive")
                .child(h1().child(format!("Series: {}", ctx.term.name)))
                .child(ol().children(ctx.term.posts.iter().map(|post| {
                    li().child(a().href(post.permalink).child(post.title))
                }))),
        ),
    )
}
