//! Selector compilation, matching, and specificity.

mod compile;
mod matcher;
mod specificity;
mod types;

pub use compile::{compile, SelectorError};
pub use matcher::{matches, PathNode, WidgetPath};
pub use specificity::Specificity;
pub use types::{Selector, Step};
