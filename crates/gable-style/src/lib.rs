//! CSS-like selector and rule engine for Gable.
//!
//! Widgets in a Gable tree are named, typed elements; this crate lets
//! applications attach property values to them declaratively, with a
//! CSS-inspired rule language:
//!
//! - **Parsing**: stylesheet text is stripped of comments, tokenized and
//!   compiled into [`StyleRule`](rules::StyleRule)s in a single pass
//! - **Selectors**: element, child (`>`), class (`.`), identifier (`#`),
//!   pseudo-class (`:`) and attribute (`[...]`) steps with descendant
//!   combinator semantics
//! - **Matching**: a compiled selector is tested against the ancestor
//!   chain of a candidate widget with full backtracking
//! - **Specificity**: every selector carries a precomputed rank so the
//!   hosting application can order competing rules
//! - **Change notification**: rules expose signals that fire when their
//!   selector or a property value is replaced
//!
//! How stylesheet text reaches [`parse_css`](parser::parse_css), how the
//! ancestor chain is assembled, and what the resolved property strings
//! mean are all decisions of the hosting application.
//!
//! # Example
//!
//! ```
//! use gable_style::parser::parse_css;
//! use gable_style::rules::Rule;
//! use gable_style::selector::{matches, PathNode, WidgetPath};
//!
//! let rules = parse_css("panel > title { color: 'dim gray'; }")?;
//! assert_eq!(rules.len(), 1);
//!
//! let path = WidgetPath::new(vec![
//!     PathNode::new("window"),
//!     PathNode::new("panel"),
//!     PathNode::new("title"),
//! ]);
//! assert!(matches(rules[0].selector(), &path));
//! assert_eq!(rules[0].property("color"), Some("dim gray"));
//! # Ok::<(), gable_style::Error>(())
//! ```

pub mod parser;
pub mod rules;
pub mod selector;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::parser::parse_css;
    pub use crate::rules::{EmptyRule, Rule, StyleRule, StyleSheet};
    pub use crate::selector::{
        matches, PathNode, Selector, SelectorError, Specificity, Step, WidgetPath,
    };
    pub use crate::{Error, Result};
}
