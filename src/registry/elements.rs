//! The built-in element catalog.
//!
//! These are the extended XML comment elements understood by the Sandcastle
//! Help File Builder and similar documentation tools, on top of the standard
//! C# documentation comment tags the host editor already completes.

use crate::types::{AttributeDefinition, ElementDefinition, ElementUsage};

const BOOLEAN_VALUES: &[&str] = &["true", "false"];

const CODE_LANGUAGES: &[&str] = &[
    "cs",
    "cpp",
    "c",
    "fs",
    "javascript",
    "vb",
    "vbnet",
    "html",
    "xml",
    "xsl",
    "xaml",
    "sql",
    "py",
    "pshell",
    "bat",
    "none",
];

const NOTE_TYPES: &[&str] = &[
    "note",
    "tip",
    "implement",
    "caller",
    "inherit",
    "caution",
    "warning",
    "important",
    "security",
    "cs",
    "cpp",
    "vb",
    "todo",
];

const LINK_TARGETS: &[&str] = &["_blank", "_self", "_parent", "_top"];

/// The attributes shared by `<see>` and `<seealso>`.
fn link_attributes() -> Vec<AttributeDefinition> {
    vec![
        AttributeDefinition::new("qualifyHint")
            .description("Indicate whether or not the type or member name should be qualified.")
            .values(BOOLEAN_VALUES.iter().copied()),
        AttributeDefinition::new("autoUpgrade")
            .description("Indicate whether or not the link should go to the method overloads topic.")
            .values(BOOLEAN_VALUES.iter().copied()),
        AttributeDefinition::new("href").description("Specify a URL to which the link should go."),
        AttributeDefinition::new("alt").description("Specify alternate text for a URL link."),
        AttributeDefinition::new("target")
            .description("Specify where a URL link will be opened.")
            .values(LINK_TARGETS.iter().copied()),
    ]
}

fn with_attributes(
    element: ElementDefinition,
    attributes: impl IntoIterator<Item = AttributeDefinition>,
) -> ElementDefinition {
    attributes.into_iter().fold(element, ElementDefinition::attribute)
}

/// Build the default element definitions.
pub fn default_elements() -> Vec<ElementDefinition> {
    vec![
        // ── Top-level ───────────────────────────────────────────────────
        ElementDefinition::new("AttachedEventComments", ElementUsage::TopLevel)
            .single_use()
            .description(
                "Define the content that should appear on the auto-generated attached event \
                 member topic for a given WPF routed event member.",
            ),
        ElementDefinition::new("AttachedPropertyComments", ElementUsage::TopLevel)
            .single_use()
            .description(
                "Define the content that should appear on the auto-generated attached \
                 property member topic for a given WPF dependency property member.",
            ),
        ElementDefinition::new("event", ElementUsage::TopLevel)
            .text_before_caret("cref=\"")
            .text_after_caret("\"")
            .description("List events that can be raised by a type's member."),
        ElementDefinition::new("overloads", ElementUsage::TopLevel)
            .single_use()
            .description(
                "Define the content that should appear on the auto-generated overloads topic \
                 for a given set of member overloads.",
            ),
        ElementDefinition::new("preliminary", ElementUsage::TopLevel)
            .single_use()
            .self_closing()
            .description(
                "Indicate that a particular type or member is preliminary and is subject to change.",
            ),
        ElementDefinition::new("revisionHistory", ElementUsage::TopLevel)
            .single_use()
            .text_before_caret("visible=\"")
            .text_after_caret("true\"")
            .description("Display revision history for a type or its members.")
            .attribute(
                AttributeDefinition::new("visible")
                    .description(
                        "Indicate whether or not the revision history is included in the help topic.",
                    )
                    .values(BOOLEAN_VALUES.iter().copied()),
            ),
        ElementDefinition::new("threadsafety", ElementUsage::TopLevel)
            .single_use()
            .text_before_caret("static=\"")
            .text_after_caret("true\" instance=\"false\"")
            .self_closing()
            .description(
                "Indicate whether or not a class or structure's static and instance members \
                 are safe for use in multi-threaded scenarios.",
            )
            .attribute(
                AttributeDefinition::new("static")
                    .description("The thread safety of static members.")
                    .values(BOOLEAN_VALUES.iter().copied()),
            )
            .attribute(
                AttributeDefinition::new("instance")
                    .description("The thread safety of instance member.")
                    .values(BOOLEAN_VALUES.iter().copied()),
            ),
        // ── Nested ──────────────────────────────────────────────────────
        ElementDefinition::new("code", ElementUsage::Nested)
            .text_before_caret("language=\"")
            .text_after_caret("\"")
            .description("Format a multi-line section of text as source code.")
            .attribute(
                AttributeDefinition::new("language")
                    .description("Specify the code language.")
                    .values(CODE_LANGUAGES.iter().copied()),
            )
            .attribute(
                AttributeDefinition::new("title")
                    .description("An optional title or a space to suppress the title."),
            )
            .attribute(AttributeDefinition::new("source").description(
                "Specify a source code file from which this element's content will be imported.",
            ))
            .attribute(
                AttributeDefinition::new("region")
                    .description("Limit the imported code to a specific named region within it."),
            )
            .attribute(
                AttributeDefinition::new("removeRegionMarkers")
                    .description(
                        "Indicate whether or not region markers within the imported code file \
                         or region are removed.",
                    )
                    .values(BOOLEAN_VALUES.iter().copied()),
            )
            .attribute(AttributeDefinition::new("tabSize").description(
                "Override the default tab size setting for the language which is defined by \
                 the code colorizer.",
            ))
            .attribute(
                AttributeDefinition::new("numberLines")
                    .description("Override the default line numbering setting in the code colorizer.")
                    .values(BOOLEAN_VALUES.iter().copied()),
            )
            .attribute(
                AttributeDefinition::new("outlining")
                    .description("Override the default outlining setting in the code colorizer.")
                    .values(BOOLEAN_VALUES.iter().copied()),
            )
            .attribute(
                AttributeDefinition::new("keepSeeTags")
                    .description(
                        "Override the default setting in the code colorizer that determines \
                         whether or not <see> elements in the code are rendered as clickable \
                         links or are rendered as literal text.",
                    )
                    .values(BOOLEAN_VALUES.iter().copied()),
            ),
        ElementDefinition::new("list", ElementUsage::Nested)
            .text_before_caret("type=\"")
            .text_after_caret("\"")
            .description("Specify content that should be displayed as a list or a table.")
            .attribute(
                AttributeDefinition::new("type")
                    .description("The list type")
                    .values(["definition"]),
            )
            .attribute(
                AttributeDefinition::new("start")
                    .description("The starting number for numbered lists."),
            ),
        ElementDefinition::new("note", ElementUsage::Nested)
            .text_before_caret("type=\"")
            .text_after_caret("\"")
            .description(
                "Create a note within a topic to draw attention to some important information.",
            )
            .attribute(
                AttributeDefinition::new("type")
                    .description("Specifies the note type.")
                    .values(NOTE_TYPES.iter().copied()),
            )
            .attribute(AttributeDefinition::new("title").description("An optional title override")),
        ElementDefinition::new("revision", ElementUsage::Nested)
            .text_before_caret("date=\"")
            .text_after_caret("\" version=\"\"")
            .description("Describe a revision to the type or member.")
            .attribute(AttributeDefinition::new("date").description("The revision date."))
            .attribute(
                AttributeDefinition::new("version")
                    .description("The version in which the revision was made."),
            )
            .attribute(
                AttributeDefinition::new("author")
                    .description("The name of the person that made the revision."),
            )
            .attribute(
                AttributeDefinition::new("visible")
                    .description("Indicate whether or not the revision is included in the help topic.")
                    .values(BOOLEAN_VALUES.iter().copied()),
            )
            .child_of(["revisionHistory"]),
        with_attributes(
            ElementDefinition::new("see", ElementUsage::Nested)
                .text_before_caret("cref=\"")
                .text_after_caret("\"")
                .self_closing()
                .description("Create an inline link to another API topic or an external website."),
            link_attributes(),
        ),
        with_attributes(
            ElementDefinition::new("seealso", ElementUsage::Nested)
                .text_before_caret("cref=\"")
                .text_after_caret("\"")
                .self_closing()
                .description(
                    "Create an link to another API topic or an external website in the See Also \
                     section of a help topic.",
                ),
            link_attributes(),
        ),
        // ── Anywhere ────────────────────────────────────────────────────
        ElementDefinition::new("conceptualLink", ElementUsage::Both)
            .text_before_caret("target=\"")
            .text_after_caret("\"")
            .self_closing()
            .description(
                "Create a link to a MAML topic within the See Also section of a topic or an \
                 inline link to a MAML topic within one of the other XML comments elements.",
            ),
        ElementDefinition::new("token", ElementUsage::Both)
            .description("Insert a replaceable tag within a topic."),
    ]
}
