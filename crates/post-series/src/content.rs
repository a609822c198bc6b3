mod collections;
mod file_info;
mod front_matter;
mod post;
mod query;
mod repository;
mod sorting;
mod term;

pub use collections::*;
pub use file_info::*;
pub use front_matter::*;
pub use post::*;
pub use query::*;
pub use repository::*;
pub use sorting::*;
pub use term::*;
