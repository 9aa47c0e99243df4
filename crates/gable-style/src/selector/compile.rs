//! Selector text compilation.
//!
//! Turns one selector's text (already split out of any comma-separated
//! selector list) into an ordered [`Step`] chain. The scanner keeps a
//! pending token buffer plus "next token is X" marks set by the `>`, `+`,
//! `:`, `#` and `.` delimiters; whitespace and delimiters finalize the
//! pending token into one or more steps.

use super::{Selector, Step};

/// Errors produced while compiling a single selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    /// The `+` combinator is recognized only to be rejected.
    #[error("siblings are not supported")]
    SiblingCombinator,

    /// A `[` opened inside an attribute bracket.
    #[error("nested attribute bracket")]
    NestedAttribute,

    /// A `]` with no matching open `[`.
    #[error("unmatched ']' outside an attribute")]
    UnmatchedBracket,

    /// The selector ended inside `[...]`.
    #[error("unterminated attribute bracket")]
    UnclosedAttribute,
}

/// Pending "next token is X" marks.
///
/// Marks survive empty finalizations (a delimiter directly following
/// another delimiter, e.g. `>` then `:`) and are cleared whenever a real
/// token is finalized.
#[derive(Debug, Default)]
struct Marks {
    child: bool,
    sibling: bool,
    pseudo: bool,
    identifier: bool,
    class: bool,
}

impl Marks {
    fn refining(&self) -> bool {
        self.pseudo || self.identifier || self.class
    }
}

/// Compile one selector text into a [`Selector`].
pub fn compile(text: &str) -> Result<Selector, SelectorError> {
    let mut steps = Vec::new();
    let mut token = String::new();
    let mut marks = Marks::default();
    // Set while scanning inside `[...]`; whitespace and delimiters in
    // there are part of the attribute token.
    let mut in_attribute = false;
    let mut attribute = String::new();

    for ch in text.chars() {
        if in_attribute {
            match ch {
                '[' => return Err(SelectorError::NestedAttribute),
                ']' => {
                    in_attribute = false;
                    finish_attribute(&mut steps, std::mem::take(&mut attribute));
                }
                _ => attribute.push(ch),
            }
            continue;
        }

        match ch {
            c if c.is_whitespace() => finalize(&mut steps, &mut token, &mut marks)?,
            '>' => {
                finalize(&mut steps, &mut token, &mut marks)?;
                marks.child = true;
            }
            '+' => {
                finalize(&mut steps, &mut token, &mut marks)?;
                marks.sibling = true;
            }
            ':' => {
                finalize(&mut steps, &mut token, &mut marks)?;
                marks.pseudo = true;
            }
            '#' => {
                finalize(&mut steps, &mut token, &mut marks)?;
                marks.identifier = true;
            }
            '.' => {
                finalize(&mut steps, &mut token, &mut marks)?;
                marks.class = true;
            }
            '[' => {
                finalize(&mut steps, &mut token, &mut marks)?;
                in_attribute = true;
            }
            ']' => return Err(SelectorError::UnmatchedBracket),
            _ => token.push(ch),
        }
    }

    if in_attribute {
        return Err(SelectorError::UnclosedAttribute);
    }
    finalize(&mut steps, &mut token, &mut marks)?;

    Ok(Selector::new(steps))
}

/// Finalize the pending token into steps, honoring the accumulated marks.
fn finalize(steps: &mut Vec<Step>, token: &mut String, marks: &mut Marks) -> Result<(), SelectorError> {
    if token.is_empty() {
        // Nothing pending. Delimiters may still be stacking marks for the
        // next real token (`>` then `:` combine), so leave them in place.
        return Ok(());
    }
    if marks.sibling {
        return Err(SelectorError::SiblingCombinator);
    }

    let name = std::mem::take(token);

    // The very first token gets an implicit leading Any, so a refinement
    // like `.warning` alone tests real path elements.
    if steps.is_empty() {
        steps.push(Step::Any);
    }

    if marks.child && !marks.refining() {
        steps.push(Step::Child(name));
    } else {
        if marks.child {
            // A child mark cannot carry a refinement; the position advances
            // with a bare Any and the refinement lands on it.
            steps.push(Step::Any);
        }
        if marks.pseudo {
            steps.push(Step::PseudoClass(name.clone()));
        }
        if marks.identifier {
            steps.push(Step::Identifier(name.clone()));
        }
        if marks.class {
            steps.push(Step::Class(name.clone()));
        }
        if !marks.refining() {
            steps.push(if name == "*" {
                Step::Any
            } else {
                Step::Element(name)
            });
        }
    }

    *marks = Marks::default();
    Ok(())
}

/// Emit the attribute step collected between `[` and `]`.
///
/// The body is split on the first `=`; without one the step only requires
/// the attribute to be present.
fn finish_attribute(steps: &mut Vec<Step>, body: String) {
    if steps.is_empty() {
        steps.push(Step::Any);
    }
    steps.push(match body.split_once('=') {
        None => Step::Attribute {
            name: body,
            value: None,
        },
        Some((name, value)) => Step::Attribute {
            name: name.to_string(),
            value: Some(value.to_string()),
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_gets_an_implicit_leading_any() {
        let selector = compile("panel").unwrap();
        assert_eq!(
            selector.steps(),
            &[Step::Any, Step::Element("panel".into())]
        );
    }

    #[test]
    fn lone_class_tests_path_elements() {
        let selector = compile(".warning").unwrap();
        assert_eq!(selector.steps(), &[Step::Any, Step::Class("warning".into())]);
    }

    #[test]
    fn universal_is_prefixed_like_any_other_first_token() {
        let selector = compile("*").unwrap();
        assert_eq!(selector.steps(), &[Step::Any, Step::Any]);
    }

    #[test]
    fn descendant_and_child_combinators() {
        let selector = compile("panel > title").unwrap();
        assert_eq!(
            selector.steps(),
            &[
                Step::Any,
                Step::Element("panel".into()),
                Step::Child("title".into()),
            ]
        );

        let selector = compile("window panel title").unwrap();
        assert_eq!(
            selector.steps(),
            &[
                Step::Any,
                Step::Element("window".into()),
                Step::Element("panel".into()),
                Step::Element("title".into()),
            ]
        );
    }

    #[test]
    fn refinements_attach_to_their_element() {
        let selector = compile("button.primary:hover#submit").unwrap();
        assert_eq!(
            selector.steps(),
            &[
                Step::Any,
                Step::Element("button".into()),
                Step::Class("primary".into()),
                Step::PseudoClass("hover".into()),
                Step::Identifier("submit".into()),
            ]
        );
    }

    #[test]
    fn child_mark_with_refinement_decomposes_into_any() {
        let selector = compile("panel > :hover").unwrap();
        assert_eq!(
            selector.steps(),
            &[
                Step::Any,
                Step::Element("panel".into()),
                Step::Any,
                Step::PseudoClass("hover".into()),
            ]
        );
    }

    #[test]
    fn attribute_forms() {
        let selector = compile("item[selected]").unwrap();
        assert_eq!(
            selector.steps(),
            &[
                Step::Any,
                Step::Element("item".into()),
                Step::Attribute {
                    name: "selected".into(),
                    value: None,
                },
            ]
        );

        let selector = compile("item[mode=strict]").unwrap();
        assert_eq!(
            selector.steps(),
            &[
                Step::Any,
                Step::Element("item".into()),
                Step::Attribute {
                    name: "mode".into(),
                    value: Some("strict".into()),
                },
            ]
        );

        // Only the first `=` splits name from value.
        let selector = compile("[query=a=b]").unwrap();
        assert_eq!(
            selector.steps(),
            &[
                Step::Any,
                Step::Attribute {
                    name: "query".into(),
                    value: Some("a=b".into()),
                },
            ]
        );
    }

    #[test]
    fn sibling_combinator_is_rejected() {
        assert_eq!(
            compile("label + field").unwrap_err(),
            SelectorError::SiblingCombinator
        );
        assert_eq!(
            compile("label+field").unwrap_err(),
            SelectorError::SiblingCombinator
        );
    }

    #[test]
    fn bracket_errors() {
        assert_eq!(
            compile("a[b[c]]").unwrap_err(),
            SelectorError::NestedAttribute
        );
        assert_eq!(compile("a]b").unwrap_err(), SelectorError::UnmatchedBracket);
        assert_eq!(
            compile("a[selected").unwrap_err(),
            SelectorError::UnclosedAttribute
        );
    }

    #[test]
    fn empty_text_compiles_to_no_steps() {
        let selector = compile("").unwrap();
        assert!(selector.steps().is_empty());

        let selector = compile("   ").unwrap();
        assert!(selector.steps().is_empty());
    }
}
