use derive_more::{Deref, DerefMut};
use indexmap::IndexMap;

use crate::content::{Post, PostId, Term, TermId};

#[derive(Debug, Default, Deref, DerefMut)]
pub struct Posts(IndexMap<PostId, Post>);

#[derive(Debug, Default, Deref, DerefMut)]
pub struct Terms(IndexMap<TermId, Term>);
