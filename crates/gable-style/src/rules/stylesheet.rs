//! Stylesheet collection.

use crate::rules::StyleRule;
use crate::Result;

/// An ordered collection of style rules.
///
/// The order is source order; how competing rules are cascaded and how
/// ties are broken is left to the hosting application, which has the
/// specificity of every rule at hand.
#[derive(Debug, Default)]
pub struct StyleSheet {
    rules: Vec<StyleRule>,
}

impl StyleSheet {
    /// Create an empty stylesheet.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Parse a stylesheet from rule text.
    pub fn from_css(css: &str) -> Result<Self> {
        Ok(Self {
            rules: crate::parser::parse_css(css)?,
        })
    }

    /// Append a rule.
    pub fn add_rule(&mut self, rule: StyleRule) {
        self.rules.push(rule);
    }

    /// Get the number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Check if the stylesheet is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterate over rules in source order.
    pub fn iter(&self) -> impl Iterator<Item = &StyleRule> {
        self.rules.iter()
    }

    /// Clear all rules.
    pub fn clear(&mut self) {
        self.rules.clear();
    }
}
