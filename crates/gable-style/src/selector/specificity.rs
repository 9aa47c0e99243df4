//! Selector specificity calculation.

use std::fmt;

use super::Step;

/// Rank of a compiled selector as a `(style, id, attribute, element)` tuple.
///
/// Bucket assignment per step kind:
///
/// - [`Step::Identifier`] → id bucket
/// - [`Step::PseudoClass`], [`Step::Class`], [`Step::Attribute`] →
///   attribute bucket
/// - [`Step::Element`], [`Step::Child`] → element bucket
/// - [`Step::Any`] → no bucket
///
/// The style bucket is reserved for externally-authored highest-priority
/// rules (see [`styled`](Self::styled)) and is always zero for parsed
/// selectors.
///
/// Compared lexicographically, style > id > attribute > element, higher
/// wins: `(0,1,0,0) > (0,0,99,99)`. Equal tuples are a tie the caller
/// resolves; cascade policy is not decided here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Specificity(pub u32, pub u32, pub u32, pub u32);

impl Specificity {
    /// Zero specificity (a bare universal selector).
    pub const ZERO: Self = Self(0, 0, 0, 0);

    /// Calculate the specificity of a step chain.
    pub fn of_steps(steps: &[Step]) -> Self {
        let mut identifiers = 0u32;
        let mut attributes = 0u32;
        let mut elements = 0u32;

        for step in steps {
            match step {
                Step::Identifier(_) => identifiers += 1,
                Step::PseudoClass(_) | Step::Class(_) | Step::Attribute { .. } => attributes += 1,
                Step::Element(_) | Step::Child(_) => elements += 1,
                Step::Any => {}
            }
        }

        Self(0, identifiers, attributes, elements)
    }

    /// A copy of this specificity ranked into the style bucket, for
    /// externally-authored rules that must outrank every parsed selector.
    pub fn styled(self) -> Self {
        Self(self.0 + 1, self.1, self.2, self.3)
    }

    /// Get the style bucket count.
    pub fn style(&self) -> u32 {
        self.0
    }

    /// Get the identifier bucket count.
    pub fn identifiers(&self) -> u32 {
        self.1
    }

    /// Get the attribute bucket count (classes, pseudo-classes, attributes).
    pub fn attributes(&self) -> u32 {
        self.2
    }

    /// Get the element bucket count.
    pub fn elements(&self) -> u32 {
        self.3
    }
}

impl fmt::Display for Specificity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{},{},{})", self.0, self.1, self.2, self.3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bucket_assignment() {
        let steps = vec![
            Step::Any,
            Step::Element("panel".into()),
            Step::Child("title".into()),
            Step::Class("warning".into()),
            Step::PseudoClass("hover".into()),
            Step::Attribute {
                name: "selected".into(),
                value: None,
            },
            Step::Identifier("submit".into()),
        ];
        assert_eq!(Specificity::of_steps(&steps), Specificity(0, 1, 3, 2));
    }

    #[test]
    fn any_has_no_weight() {
        assert_eq!(Specificity::of_steps(&[Step::Any, Step::Any]), Specificity::ZERO);
    }

    #[test]
    fn buckets_compare_lexicographically() {
        // One identifier outranks any number of classes.
        assert!(Specificity(0, 1, 0, 0) > Specificity(0, 0, 99, 99));
        // One class outranks any number of elements.
        assert!(Specificity(0, 0, 1, 0) > Specificity(0, 0, 0, 99));
        // Within a bucket, higher count wins.
        assert!(Specificity(0, 0, 2, 0) > Specificity(0, 0, 1, 3));
    }

    #[test]
    fn identifier_outranks_classes_outranks_elements() {
        let identifier = crate::selector::compile("#a").unwrap();
        let classes = crate::selector::compile(".a.b.c.d").unwrap();
        let elements = crate::selector::compile("e f g h").unwrap();

        assert!(identifier.specificity() > classes.specificity());
        assert!(classes.specificity() > elements.specificity());
    }

    #[test]
    fn styled_outranks_every_parsed_rank() {
        let heavy = Specificity(0, 10, 10, 10);
        assert!(Specificity::ZERO.styled() > heavy);
    }
}
