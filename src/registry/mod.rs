//! The element registry.
//!
//! A read-only catalog of the custom documentation comment elements, keyed
//! by display text.  The process-wide instance is built on first use from
//! the compiled-in seed in [`elements`] and never mutated afterwards, so it
//! can be shared by concurrent completion requests without locking.
//!
//! Besides plain lookups, the registry answers the three candidate queries
//! used by the completion pipeline:
//!
//! - [`Registry::element_candidates`] for element-name positions
//! - [`Registry::attribute_candidates`] for attribute-name positions
//! - [`Registry::attribute_value_candidates`] for attribute-value positions

mod elements;

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::sync::LazyLock;

use crate::types::{AttributeDefinition, ElementDefinition, ElementNameContext, ElementUsage};

pub use elements::default_elements;

/// Reasons a set of definitions cannot become a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("duplicate element display text `{0}`")]
    DuplicateDisplayText(String),
    #[error("element `{element}` declares attribute `{attribute}` more than once")]
    DuplicateAttribute { element: String, attribute: String },
}

static REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    Registry::from_definitions(default_elements()).unwrap_or_else(|err| {
        tracing::error!("XmlDocLSP: invalid built-in element catalog: {err}");
        Registry::default()
    })
});

/// The process-wide registry seeded with the built-in vocabulary.
pub fn registry() -> &'static Registry {
    &REGISTRY
}

#[derive(Debug, Default)]
pub struct Registry {
    elements: BTreeMap<String, ElementDefinition>,
}

impl Registry {
    /// Build a registry, rejecting duplicate display texts and duplicate
    /// attribute names within an element.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ElementDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut elements = BTreeMap::new();

        for definition in definitions {
            let mut seen = HashSet::new();
            if let Some(dup) = definition
                .attributes
                .iter()
                .find(|attr| !seen.insert(attr.name.as_str()))
            {
                return Err(RegistryError::DuplicateAttribute {
                    element: definition.name.clone(),
                    attribute: dup.name.clone(),
                });
            }

            let key = definition.display_text().to_string();
            if elements.contains_key(&key) {
                return Err(RegistryError::DuplicateDisplayText(key));
            }
            elements.insert(key, definition);
        }

        Ok(Self { elements })
    }

    pub fn lookup(&self, display_text: &str) -> Option<&ElementDefinition> {
        self.elements.get(display_text)
    }

    /// All definitions, ordered by display text.
    pub fn all_definitions(&self) -> impl Iterator<Item = &ElementDefinition> {
        self.elements.values()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Attributes of `element_name` that are not yet present on the tag.
    ///
    /// Returns an empty list for unknown elements or elements without
    /// attributes.  Names are compared case-sensitively.
    pub fn attribute_candidates(
        &self,
        element_name: &str,
        existing: &BTreeSet<String>,
    ) -> Vec<&AttributeDefinition> {
        self.lookup(element_name)
            .map(|element| {
                element
                    .attributes
                    .iter()
                    .filter(|attr| !existing.contains(&attr.name))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The declared values of `attribute_name` on `element_name`.
    pub fn attribute_value_candidates(&self, element_name: &str, attribute_name: &str) -> &[String] {
        self.lookup(element_name)
            .and_then(|element| element.find_attribute(attribute_name))
            .map(|attr| attr.allowed_values.as_slice())
            .unwrap_or_default()
    }

    /// Elements that may be inserted at an element-name position.
    ///
    /// The result is the union of:
    /// - nested elements with no parent restriction, when inside an element
    /// - elements whose `child_of` names one of the enclosing elements
    /// - at the root, top-level elements minus single-use ones already present
    /// - elements usable anywhere
    pub fn element_candidates(&self, context: &ElementNameContext) -> Vec<&ElementDefinition> {
        let mut keys: BTreeSet<&str> = BTreeSet::new();

        for element in self.all_definitions() {
            let unrestricted_nested = context.allows_unrestricted_nested
                && element.usage != ElementUsage::TopLevel
                && element.child_of.is_empty();

            let allowed_child = context
                .parent_names
                .iter()
                .any(|parent| element.child_of.contains(parent));

            let top_level = context.at_root
                && element.usage == ElementUsage::TopLevel
                && (!element.is_single_use
                    || !context.existing_top_level_names.contains(&element.name));

            if unrestricted_nested
                || allowed_child
                || top_level
                || element.usage == ElementUsage::Both
            {
                keys.insert(element.display_text());
            }
        }

        keys.into_iter().filter_map(|key| self.lookup(key)).collect()
    }
}
