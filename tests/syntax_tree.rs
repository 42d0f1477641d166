use rowan::TextSize;
use xmldoc_lsp::syntax::SyntaxKind::{self, *};
use xmldoc_lsp::syntax::parser::MAX_ELEMENT_DEPTH;
use xmldoc_lsp::syntax::{
    DocComment, ElementShape, SyntaxNode, end_quote, parse, start_quote, token_on_left_of_position,
};

/// Kinds of the direct child nodes of `node`.
fn child_kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.children().map(|child| child.kind()).collect()
}

fn first_descendant(node: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    node.descendants()
        .find(|n| n.kind() == kind)
        .unwrap_or_else(|| panic!("no {kind:?} in {node:#?}"))
}

// ─── Lossless parsing ───────────────────────────────────────────────────────

#[test]
fn test_tree_text_equals_input() {
    let inputs = [
        "/// <summary>Adds.</summary>\n/// <returns>x</returns>",
        "    /// <code language=\"cs\">\r\n    /// var x = 1;\r\n    /// </code>",
        "/// <see cref=\"A\" <note type='",
        "/// </para> stray <!-- note --> <![CDATA[ <x> ]]>",
        "/// <a b=\"c\n/// d\"",
        "/// <<>>< / =",
        "/// é <ü attr=\"ö\"/>",
    ];
    for input in inputs {
        let root = parse(input);
        assert_eq!(root.kind(), DOC_COMMENT);
        assert_eq!(root.text().to_string(), input, "lossless for {input:?}");
    }
}

// ─── Element shapes ─────────────────────────────────────────────────────────

#[test]
fn test_self_closing_element() {
    let root = parse("/// <see cref=\"A\"/>");
    assert_eq!(child_kinds(&root), vec![XML_TEXT, XML_EMPTY_ELEMENT]);

    let element = first_descendant(&root, XML_EMPTY_ELEMENT);
    let (name, attributes) = ElementShape::of(&element).name_and_attributes().unwrap();
    assert_eq!(name, "see");
    assert_eq!(attributes, vec!["cref".to_string()]);
}

#[test]
fn test_element_with_content() {
    let root = parse("/// <remarks>Some <c>code</c> here.</remarks>");
    let element = first_descendant(&root, XML_ELEMENT);
    assert_eq!(
        child_kinds(&element),
        vec![XML_START_TAG, XML_TEXT, XML_ELEMENT, XML_TEXT, XML_END_TAG]
    );

    let (name, _) = ElementShape::of(&element).name_and_attributes().unwrap();
    assert_eq!(name, "remarks");
}

#[test]
fn test_incomplete_tag_becomes_empty_element() {
    let root = parse("/// <code language=\"cs\"");
    let element = first_descendant(&root, XML_EMPTY_ELEMENT);
    assert_eq!(element.text().to_string(), "<code language=\"cs\"");
    assert!(
        element
            .children_with_tokens()
            .all(|child| child.kind() != SLASH_GREATER_THAN)
    );
}

#[test]
fn test_tag_interrupted_by_next_tag() {
    let root = parse("/// <see <note/>");
    assert_eq!(
        child_kinds(&root),
        vec![XML_TEXT, XML_EMPTY_ELEMENT, XML_EMPTY_ELEMENT]
    );
}

#[test]
fn test_bare_angle_bracket_has_empty_name() {
    let root = parse("/// <");
    let element = first_descendant(&root, XML_EMPTY_ELEMENT);
    let (name, attributes) = ElementShape::of(&element).name_and_attributes().unwrap();
    assert_eq!(name, "");
    assert!(attributes.is_empty());
}

#[test]
fn test_text_nodes_are_not_elements() {
    let root = parse("/// plain");
    let text = first_descendant(&root, XML_TEXT);
    assert!(ElementShape::of(&text).name_and_attributes().is_none());
}

// ─── Attributes ─────────────────────────────────────────────────────────────

#[test]
fn test_attribute_quotes() {
    let root = parse("/// <note type=\"tip\"/>");
    let attribute = first_descendant(&root, XML_ATTRIBUTE);

    let start = start_quote(&attribute).unwrap();
    let end = end_quote(&attribute).unwrap();
    assert!(start.text_range().start() < end.text_range().start());

    let value: Vec<_> = attribute
        .children_with_tokens()
        .filter(|child| child.kind() == TEXT_LITERAL)
        .collect();
    assert_eq!(value.len(), 1);
}

#[test]
fn test_unterminated_value_stops_at_line_end() {
    let root = parse("/// <note type=\"ti\n/// text");
    let attribute = first_descendant(&root, XML_ATTRIBUTE);
    assert_eq!(attribute.text().to_string(), "type=\"ti");
    assert!(start_quote(&attribute).is_some());
    assert!(end_quote(&attribute).is_none());
}

#[test]
fn test_single_quoted_value() {
    let root = parse("/// <list type='bullet'>");
    let attribute = first_descendant(&root, XML_ATTRIBUTE);
    assert!(end_quote(&attribute).is_some());
}

// ─── End tags ───────────────────────────────────────────────────────────────

#[test]
fn test_end_tag_of_outer_element_closes_inner_ones() {
    let root = parse("/// <remarks><para>text</remarks>");
    let remarks = first_descendant(&root, XML_ELEMENT);
    let para = remarks
        .children()
        .find(|n| n.kind() == XML_ELEMENT)
        .expect("para should be nested in remarks");

    assert!(para.children().all(|n| n.kind() != XML_END_TAG));
    assert_eq!(remarks.last_child().map(|n| n.kind()), Some(XML_END_TAG));
}

#[test]
fn test_mismatched_end_tag_closes_innermost() {
    let root = parse("/// <remarks>text</para> after");
    let remarks = first_descendant(&root, XML_ELEMENT);
    assert_eq!(remarks.last_child().map(|n| n.kind()), Some(XML_END_TAG));
    assert_eq!(root.last_child().map(|n| n.kind()), Some(XML_TEXT));
}

#[test]
fn test_multi_line_comment_exteriors() {
    let root = parse("/// <summary>\n///   Adds.\n/// </summary>");
    let exteriors = root
        .descendants_with_tokens()
        .filter(|child| child.kind() == DOC_EXTERIOR)
        .count();
    assert_eq!(exteriors, 3);
    assert_eq!(child_kinds(&root), vec![XML_TEXT, XML_ELEMENT]);
}

#[test]
fn test_nesting_depth_is_capped() {
    let input = format!("/// {}<", "<a>".repeat(MAX_ELEMENT_DEPTH + 100));
    let root = parse(&input);

    assert_eq!(root.text().to_string(), input);
    let elements = root
        .descendants()
        .filter(|node| node.kind() == XML_ELEMENT)
        .count();
    assert_eq!(elements, MAX_ELEMENT_DEPTH);

    // Past the cap, `<a>` stays in the innermost element as text.
    let innermost = root
        .descendants()
        .filter(|node| node.kind() == XML_ELEMENT)
        .last()
        .unwrap();
    assert!(innermost.children().any(|child| child.kind() == XML_TEXT));
}

// ─── Token lookup ───────────────────────────────────────────────────────────

#[test]
fn test_token_on_left_at_boundaries() {
    let root = parse("/// <see cref=\"A\"/>");

    let token = token_on_left_of_position(&root, TextSize::from(5)).unwrap();
    assert_eq!(token.kind(), LESS_THAN);

    let token = token_on_left_of_position(&root, TextSize::from(7)).unwrap();
    assert_eq!(token.kind(), IDENT);
    assert_eq!(token.text(), "see");

    // Skips the whitespace between `see` and `cref`.
    let token = token_on_left_of_position(&root, TextSize::from(9)).unwrap();
    assert_eq!(token.text(), "see");

    assert!(token_on_left_of_position(&root, TextSize::from(0)).is_none());
    assert!(token_on_left_of_position(&root, TextSize::from(99)).is_none());
}

#[test]
fn test_token_on_left_returns_trivia_when_nothing_precedes() {
    let root = parse("///");
    let token = token_on_left_of_position(&root, TextSize::from(3)).unwrap();
    assert_eq!(token.kind(), DOC_EXTERIOR);
}

// ─── Comment discovery ──────────────────────────────────────────────────────

#[test]
fn test_doc_comment_spans_consecutive_lines() {
    let source = concat!(
        "namespace Demo\n",
        "{\n",
        "    /// <summary>\n",
        "    /// Widget.\n",
        "    /// </summary>\n",
        "    // regular comment\n",
        "    public class Widget {}\n",
        "}\n",
    );
    let offset = source.find("Widget.").unwrap();
    let comment = DocComment::find(source, offset).unwrap();

    assert!(comment.is_attached());
    assert!(comment.syntax().text().to_string().ends_with("/// </summary>"));
    assert_eq!(
        comment.tree_offset(offset),
        Some(TextSize::try_from(offset - comment.start()).unwrap())
    );
}

#[test]
fn test_doc_comment_outside_comment_is_none() {
    let source = "public class Widget {}\n";
    assert!(DocComment::find(source, 5).is_none());
}
