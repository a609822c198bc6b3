#![doc = include_str!("../README.md")]

mod config;
pub mod content;
mod date;
pub mod markdown;
pub mod navigation;
pub mod permalink;
pub mod plugin;
pub mod render;
mod series;
mod site;
mod storage;
mod style;
pub mod taxonomy;

#[cfg(test)]
mod test_utils;

pub use config::*;
pub use series::*;
pub use site::*;
pub use storage::*;
pub use style::*;
