//! Rule storage and change notification.

use std::collections::HashMap;

use gable_core::Signal;

use crate::selector::{Selector, Specificity};

/// Contract shared by every rule store.
///
/// A rule pairs a compiled selector with a table of property declarations
/// and notifies listeners when either is replaced. [`StyleRule`] is the
/// real store; [`EmptyRule`] satisfies the same contract inertly so it can
/// stand in wherever a rule is structurally required.
pub trait Rule {
    /// The compiled selector this rule matches with.
    fn selector(&self) -> &Selector;

    /// Look up a declared property value.
    ///
    /// Returns `None` both for keys that were never declared and for keys
    /// declared with the explicit unset value.
    fn property(&self, key: &str) -> Option<&str>;

    /// Replace the whole selector, then fire
    /// [`selector_changed`](Self::selector_changed).
    ///
    /// Selectors are immutable values; replacement is the only way a
    /// rule's selector ever changes.
    fn set_selector(&mut self, selector: Selector);

    /// Set or explicitly unset a property, then fire
    /// [`property_changed`](Self::property_changed) with the key.
    fn set_property(&mut self, key: &str, value: Option<String>);

    /// Fired after the selector has been replaced.
    fn selector_changed(&self) -> &Signal<()>;

    /// Fired with the key after a property has been set or unset.
    fn property_changed(&self) -> &Signal<String>;
}

/// A style rule: a compiled selector plus its property declarations.
///
/// Listeners connected to the change signals are notified synchronously,
/// in registration order, strictly after the mutation has been applied. A
/// panicking listener unwinds through the mutating call and the remaining
/// listeners of that notification are skipped.
#[derive(Debug)]
pub struct StyleRule {
    selector: Selector,
    properties: HashMap<String, Option<String>>,
    selector_changed: Signal<()>,
    property_changed: Signal<String>,
}

impl StyleRule {
    /// Create a rule with an empty property table.
    pub fn new(selector: Selector) -> Self {
        Self {
            selector,
            properties: HashMap::new(),
            selector_changed: Signal::new(),
            property_changed: Signal::new(),
        }
    }

    /// Builder-style property insertion; no notification is fired.
    pub fn with_property(mut self, key: impl Into<String>, value: Option<String>) -> Self {
        self.properties.insert(key.into(), value);
        self
    }

    /// The selector's precomputed specificity.
    pub fn specificity(&self) -> Specificity {
        self.selector.specificity()
    }

    /// The compiled selector this rule matches with.
    pub fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Look up a declared property value; explicitly unset keys read as
    /// absent.
    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).and_then(|value| value.as_deref())
    }

    /// Iterate over the declared properties, explicit unsets included.
    pub fn properties(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.properties
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_deref()))
    }

    /// Replace the whole selector and notify.
    pub fn set_selector(&mut self, selector: Selector) {
        tracing::trace!(selector = %selector, "replacing rule selector");
        self.selector = selector;
        self.selector_changed.emit(());
    }

    /// Set or explicitly unset (`None`) a property and notify with the key.
    pub fn set_property(&mut self, key: &str, value: Option<String>) {
        self.properties.insert(key.to_string(), value);
        self.property_changed.emit(key.to_string());
    }

    /// Fired after the selector has been replaced.
    pub fn selector_changed(&self) -> &Signal<()> {
        &self.selector_changed
    }

    /// Fired with the key after a property has been set or unset.
    pub fn property_changed(&self) -> &Signal<String> {
        &self.property_changed
    }
}

impl Rule for StyleRule {
    fn selector(&self) -> &Selector {
        StyleRule::selector(self)
    }

    fn property(&self, key: &str) -> Option<&str> {
        StyleRule::property(self, key)
    }

    fn set_selector(&mut self, selector: Selector) {
        StyleRule::set_selector(self, selector);
    }

    fn set_property(&mut self, key: &str, value: Option<String>) {
        StyleRule::set_property(self, key, value);
    }

    fn selector_changed(&self) -> &Signal<()> {
        StyleRule::selector_changed(self)
    }

    fn property_changed(&self) -> &Signal<String> {
        StyleRule::property_changed(self)
    }
}

/// The inert rule: a fixed universal selector, no properties, and change
/// signals that never fire.
///
/// Callers can hold an `EmptyRule` wherever a [`Rule`] is structurally
/// required but nothing should happen: lookups return nothing, mutation
/// is ignored, and listener registration is accepted but never invoked.
#[derive(Debug)]
pub struct EmptyRule {
    selector: Selector,
    selector_changed: Signal<()>,
    property_changed: Signal<String>,
}

impl EmptyRule {
    /// Create the inert rule.
    pub fn new() -> Self {
        Self {
            selector: Selector::universal(),
            selector_changed: Signal::new(),
            property_changed: Signal::new(),
        }
    }
}

impl Default for EmptyRule {
    fn default() -> Self {
        Self::new()
    }
}

impl Rule for EmptyRule {
    fn selector(&self) -> &Selector {
        &self.selector
    }

    fn property(&self, _key: &str) -> Option<&str> {
        None
    }

    fn set_selector(&mut self, _selector: Selector) {}

    fn set_property(&mut self, _key: &str, _value: Option<String>) {}

    fn selector_changed(&self) -> &Signal<()> {
        &self.selector_changed
    }

    fn property_changed(&self) -> &Signal<String> {
        &self.property_changed
    }
}
