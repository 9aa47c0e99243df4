//! Stylesheet parsing.

mod css_parser;
mod preprocess;

pub use css_parser::parse_css;
pub use preprocess::CommentStripper;
