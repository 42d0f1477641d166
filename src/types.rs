//! Data types used throughout the XmlDocLSP server.
//!
//! This module contains the "model" structs and enums describing the
//! documentation comment vocabulary (elements, attributes, usage rules)
//! as well as completion-related types (resolved caret contexts, candidate
//! entries, triggers and outcomes).

use std::collections::BTreeSet;

/// Where an element may appear inside a documentation comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementUsage {
    /// Only as a direct child of the comment root.
    TopLevel,
    /// Only inside another element.
    Nested,
    /// Anywhere.
    Both,
}

/// An attribute supported by an element, with its permitted literal values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    /// The attribute name (e.g. `"language"`).
    pub name: String,
    /// Optional help text shown alongside the completion item.
    pub description: Option<String>,
    /// Permitted values.  Empty when the value is free-form.
    pub allowed_values: Vec<String>,
}

impl AttributeDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            allowed_values: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_values = values.into_iter().map(Into::into).collect();
        self
    }
}

/// A custom documentation comment element.
///
/// Definitions are assembled with the chained builder methods and then
/// handed to [`crate::registry::Registry::from_definitions`], which owns
/// them for the rest of the process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementDefinition {
    /// The tag name written into the document.
    pub name: String,
    /// Text shown in the completion list.  `None` means use [`Self::name`].
    display_text: Option<String>,
    /// Optional help text.
    pub description: Option<String>,
    /// Text inserted after the element name and before the caret, typically
    /// a default attribute name, `=` and the opening quote.
    pub text_before_caret: Option<String>,
    /// Text inserted after the caret, typically the closing quote.
    pub text_after_caret: Option<String>,
    pub usage: ElementUsage,
    /// A single-use top-level element may appear at most once per comment.
    pub is_single_use: bool,
    /// Whether the inserted element is terminated with `/>`.
    pub is_self_closing: bool,
    /// Attributes, unique by name.
    pub attributes: Vec<AttributeDefinition>,
    /// Parent element names this element is confined to.  Empty means any
    /// parent is acceptable.
    pub child_of: BTreeSet<String>,
}

impl ElementDefinition {
    pub fn new(name: impl Into<String>, usage: ElementUsage) -> Self {
        Self {
            name: name.into(),
            display_text: None,
            description: None,
            text_before_caret: None,
            text_after_caret: None,
            usage,
            is_single_use: false,
            is_self_closing: false,
            attributes: Vec::new(),
            child_of: BTreeSet::new(),
        }
    }

    /// The text shown in the completion list and used as the registry key.
    pub fn display_text(&self) -> &str {
        self.display_text.as_deref().unwrap_or(&self.name)
    }

    /// Override the display text.  Blank text restores the default of
    /// showing the element name; anything else is trimmed.
    pub fn with_display_text(mut self, text: &str) -> Self {
        let trimmed = text.trim();
        self.display_text = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn text_before_caret(mut self, text: impl Into<String>) -> Self {
        self.text_before_caret = Some(text.into());
        self
    }

    pub fn text_after_caret(mut self, text: impl Into<String>) -> Self {
        self.text_after_caret = Some(text.into());
        self
    }

    pub fn single_use(mut self) -> Self {
        self.is_single_use = true;
        self
    }

    pub fn self_closing(mut self) -> Self {
        self.is_self_closing = true;
        self
    }

    pub fn attribute(mut self, attribute: AttributeDefinition) -> Self {
        self.attributes.push(attribute);
        self
    }

    pub fn child_of<I, S>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.child_of.extend(parents.into_iter().map(Into::into));
        self
    }

    /// Look up one of this element's attributes by exact name.
    pub fn find_attribute(&self, name: &str) -> Option<&AttributeDefinition> {
        self.attributes.iter().find(|attr| attr.name == name)
    }
}

/// Structural facts about an element-name position, gathered by the
/// resolver and used by the registry to filter element candidates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementNameContext {
    /// Names of the elements that are already direct children of the
    /// comment root.  Only meaningful when [`Self::at_root`] is set.
    pub existing_top_level_names: BTreeSet<String>,
    /// The caret sits inside some element, so nested elements without a
    /// parent restriction are acceptable.
    pub allows_unrestricted_nested: bool,
    /// Tag names of the enclosing element(s) checked against each
    /// definition's `child_of` set.
    pub parent_names: BTreeSet<String>,
    /// The caret sits directly in the comment root.
    pub at_root: bool,
}

/// Classification of a caret position inside a documentation comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedContext {
    ElementName(ElementNameContext),
    AttributeName {
        element_name: String,
        existing_attribute_names: BTreeSet<String>,
    },
    AttributeValue {
        element_name: String,
        attribute_name: String,
    },
    None,
}

/// What started the completion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionTrigger {
    /// Explicitly invoked by the user (shortcut key or menu).
    Invoke,
    /// A character was typed.
    Insertion(char),
}

/// The kind of vocabulary item a candidate stands for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateKind {
    Element,
    Attribute,
    AttributeValue,
}

/// The text written into the document when a candidate is committed.  The
/// caret ends up between the two halves.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionTemplate {
    pub before_caret: String,
    pub after_caret: String,
}

/// One completion entry offered to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub kind: CandidateKind,
    pub display_text: String,
    pub description: Option<String>,
    pub template: InsertionTemplate,
}

/// The result of a completion request.
///
/// `Cancelled` is kept distinct from `NoCandidates` so a host never caches
/// an abandoned request as "nothing to offer here".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionOutcome {
    Candidates(Vec<Candidate>),
    NoCandidates,
    Cancelled,
}

impl CompletionOutcome {
    /// The candidates, or an empty slice for the other outcomes.
    pub fn candidates(&self) -> &[Candidate] {
        match self {
            CompletionOutcome::Candidates(candidates) => candidates,
            _ => &[],
        }
    }
}
