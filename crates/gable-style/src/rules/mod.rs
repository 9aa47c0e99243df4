//! Style rules and stylesheets.

mod rule;
mod stylesheet;

pub use rule::{EmptyRule, Rule, StyleRule};
pub use stylesheet::StyleSheet;
