//! Selector step and selector definitions.

use std::fmt;

use super::Specificity;

/// One atomic test within a compiled selector.
///
/// Steps come in two behavior classes. *Advancing* steps move the match
/// position down the candidate path ([`Any`](Step::Any),
/// [`Element`](Step::Element) by descendant search, [`Child`](Step::Child)
/// by exactly one level). *Refining* steps test the node at the current
/// position without moving it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Step {
    /// Matches any element, at any deeper position.
    Any,
    /// Matches an element by name, at any deeper position.
    Element(String),
    /// Matches an element by name, exactly one level deeper.
    Child(String),
    /// Requires the current element to carry a pseudo-class.
    PseudoClass(String),
    /// Requires the current element to carry a class.
    Class(String),
    /// Requires an attribute to be present, optionally with a given value.
    Attribute {
        name: String,
        value: Option<String>,
    },
    /// Requires the current element's identifier to match.
    Identifier(String),
}

impl Step {
    /// Whether this step tests the current node without moving position.
    pub fn is_refining(&self) -> bool {
        matches!(
            self,
            Step::PseudoClass(_) | Step::Class(_) | Step::Attribute { .. } | Step::Identifier(_)
        )
    }

    /// Whether this step moves the match position down the path.
    pub fn is_advancing(&self) -> bool {
        !self.is_refining()
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Any => write!(f, "*"),
            Step::Element(name) => write!(f, "{}", name),
            Step::Child(name) => write!(f, "> {}", name),
            Step::PseudoClass(name) => write!(f, ":{}", name),
            Step::Class(name) => write!(f, ".{}", name),
            Step::Attribute { name, value: None } => write!(f, "[{}]", name),
            Step::Attribute {
                name,
                value: Some(value),
            } => write!(f, "[{}={}]", name, value),
            Step::Identifier(name) => write!(f, "#{}", name),
        }
    }
}

/// A compiled selector: an ordered chain of [`Step`]s plus the
/// [`Specificity`] derived from them.
///
/// Selectors are immutable once built; the specificity is computed exactly
/// once, at construction. To change the selector of a rule, a whole new
/// `Selector` is compiled and swapped in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    steps: Vec<Step>,
    specificity: Specificity,
}

impl Selector {
    /// Build a selector from an explicit step chain.
    pub fn new(steps: Vec<Step>) -> Self {
        let specificity = Specificity::of_steps(&steps);
        Self { steps, specificity }
    }

    /// The fixed universal selector (a single [`Step::Any`]).
    pub fn universal() -> Self {
        Self::new(vec![Step::Any])
    }

    /// The ordered step chain, in left-to-right textual order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// The rank derived from the step kinds at construction.
    pub fn specificity(&self) -> Specificity {
        self.specificity
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, step) in self.steps.iter().enumerate() {
            if index > 0 && step.is_advancing() {
                write!(f, " ")?;
            }
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}
