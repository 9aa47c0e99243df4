//! Candidate path model and the selector matching engine.

use std::collections::HashMap;
use std::ops::Index;

use super::{Selector, Step};

/// One element of a candidate path, supplied by the tree walker of the
/// hosting application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathNode {
    /// Element name (widget type).
    pub name: String,
    /// Element identifier, if the widget has one (`#id` selectors).
    pub identifier: Option<String>,
    /// Class names attached to the element.
    pub classes: Vec<String>,
    /// Active pseudo-class names (state flags such as `hover`).
    pub pseudo_classes: Vec<String>,
    /// Attribute table; a `None` value means the attribute is present
    /// without a value.
    pub attributes: HashMap<String, Option<String>>,
}

impl PathNode {
    /// Create a node with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the element identifier.
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// Add a class name.
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add an active pseudo-class name.
    pub fn with_pseudo_class(mut self, pseudo: impl Into<String>) -> Self {
        self.pseudo_classes.push(pseudo.into());
        self
    }

    /// Add an attribute with a value.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), Some(value.into()));
        self
    }

    /// Add a value-less attribute.
    pub fn with_flag(mut self, name: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), None);
        self
    }
}

/// An ordered chain of [`PathNode`]s, outermost ancestor first, element
/// under test last.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetPath {
    nodes: Vec<PathNode>,
}

impl WidgetPath {
    /// Build a path from an ancestor-to-target node chain.
    pub fn new(nodes: Vec<PathNode>) -> Self {
        Self { nodes }
    }

    /// Append one level to the path.
    pub fn push(&mut self, node: PathNode) {
        self.nodes.push(node);
    }

    /// Number of levels in the path.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the path has no levels.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node chain.
    pub fn nodes(&self) -> &[PathNode] {
        &self.nodes
    }
}

impl From<Vec<PathNode>> for WidgetPath {
    fn from(nodes: Vec<PathNode>) -> Self {
        Self::new(nodes)
    }
}

impl Index<usize> for WidgetPath {
    type Output = PathNode;

    fn index(&self, index: usize) -> &PathNode {
        &self.nodes[index]
    }
}

/// Test a compiled selector against a candidate path.
///
/// Pure and deterministic: repeated calls with the same inputs return the
/// same answer and nothing is mutated. Steps are evaluated left to right
/// against non-decreasing path offsets, starting from a virtual offset
/// before the path; every candidate offset a step produces is explored, so
/// a descendant chain backtracks past non-matching intermediate levels.
///
/// A selector with no steps matches nothing.
pub fn matches(selector: &Selector, path: &WidgetPath) -> bool {
    let steps = selector.steps();
    if steps.is_empty() {
        return false;
    }
    let matched = matches_from(steps, path, None);
    tracing::trace!(selector = %selector, matched, "selector match");
    matched
}

/// Explore every offset the head step yields, recursing into the rest of
/// the chain; the selector matches if any branch survives the final step.
fn matches_from(steps: &[Step], path: &WidgetPath, position: Option<usize>) -> bool {
    let Some((step, rest)) = steps.split_first() else {
        return true;
    };
    step_offsets(step, path, position)
        .into_iter()
        .any(|offset| matches_from(rest, path, Some(offset)))
}

/// The set of path offsets satisfying `step`, evaluated at `position`
/// (`None` is the virtual offset before the path's first node).
///
/// Advancing steps yield offsets strictly after `position`; refining steps
/// test the node at `position` itself and never move it.
fn step_offsets(step: &Step, path: &WidgetPath, position: Option<usize>) -> Vec<usize> {
    let next = position.map_or(0, |offset| offset + 1);
    match step {
        Step::Any => (next..path.len()).collect(),
        Step::Element(name) => (next..path.len())
            .filter(|&offset| path[offset].name == *name)
            .collect(),
        Step::Child(name) => {
            if next < path.len() && path[next].name == *name {
                vec![next]
            } else {
                Vec::new()
            }
        }
        Step::PseudoClass(name) => refine(path, position, |node| {
            node.pseudo_classes.iter().any(|pseudo| pseudo == name)
        }),
        Step::Class(name) => refine(path, position, |node| {
            node.classes.iter().any(|class| class == name)
        }),
        Step::Identifier(name) => refine(path, position, |node| {
            node.identifier.as_deref() == Some(name)
        }),
        Step::Attribute { name, value } => refine(path, position, |node| {
            match node.attributes.get(name) {
                Some(stored) => match value {
                    None => true,
                    Some(want) => stored.as_deref() == Some(want.as_str()),
                },
                None => false,
            }
        }),
    }
}

fn refine(
    path: &WidgetPath,
    position: Option<usize>,
    test: impl Fn(&PathNode) -> bool,
) -> Vec<usize> {
    match position {
        Some(offset) if test(&path[offset]) => vec![offset],
        _ => Vec::new(),
    }
}
