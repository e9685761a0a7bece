// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use rivulet_core::RivuletError;
use rivulet_dom::{parse_fragment, Element, MarkupParser, Node, Parser, TextParser};
use rivulet_fetch::Response;

#[test]
fn test_parse_fragment_keeps_top_level_order() {
    let nodes = parse_fragment("<li>one</li><li>two</li>text").unwrap();

    assert_eq!(
        nodes,
        vec![
            Element::new("li").with_child(Node::text("one")).into(),
            Element::new("li").with_child(Node::text("two")).into(),
            Node::text("text"),
        ]
    );
}

#[test]
fn test_parse_fragment_builds_nested_tree() {
    let nodes =
        parse_fragment(r#"<div class="card"><h1>Title</h1><p>Body <b>bold</b></p><br/></div>"#)
            .unwrap();

    assert_eq!(nodes.len(), 1);
    let div = nodes[0].as_element().unwrap();
    assert_eq!(div.name, "div");
    assert_eq!(div.attribute("class"), Some("card"));
    assert_eq!(div.children.len(), 3);
    assert_eq!(div.children[2], Node::Element(Element::new("br")));
    assert_eq!(nodes[0].text_content(), "TitleBody bold");
}

#[test]
fn test_parse_fragment_unescapes_text_and_attributes() {
    let nodes = parse_fragment(r#"<a title="a &amp; b">1 &lt; 2</a>"#).unwrap();

    let a = nodes[0].as_element().unwrap();
    assert_eq!(a.attribute("title"), Some("a & b"));
    assert_eq!(a.children, vec![Node::text("1 < 2")]);
}

#[test]
fn test_parse_fragment_keeps_comments_and_cdata() {
    let nodes = parse_fragment("<!-- note --><p><![CDATA[<raw>]]></p>").unwrap();

    assert_eq!(nodes[0], Node::comment(" note "));
    assert_eq!(nodes[1].text_content(), "<raw>");
}

#[test]
fn test_parse_fragment_drops_whitespace_between_top_level_nodes() {
    let nodes = parse_fragment("\n<ul>\n  <li>a</li>\n  <li>b</li>\n</ul>\n").unwrap();

    assert_eq!(nodes.len(), 1);
    let items = nodes[0]
        .as_element()
        .unwrap()
        .children
        .iter()
        .filter(|child| child.as_element().is_some())
        .count();
    assert_eq!(items, 2);
}

#[test]
fn test_parse_fragment_keeps_whitespace_between_inline_elements() {
    let nodes = parse_fragment("<p><b>hello</b> <i>world</i></p>").unwrap();

    assert_eq!(nodes[0].text_content(), "hello world");
    assert_eq!(nodes[0].as_element().unwrap().children[1], Node::text(" "));
}

#[test]
fn test_parse_fragment_keeps_whitespace_inside_text() {
    let nodes = parse_fragment("<p>Body <b>bold</b> end</p>").unwrap();

    assert_eq!(nodes[0].text_content(), "Body bold end");
}

#[test]
fn test_parse_fragment_accepts_void_elements() {
    let nodes = parse_fragment(r#"<p>a<br>b<img src="x.png"></p>"#).unwrap();

    let p = nodes[0].as_element().unwrap();
    assert_eq!(
        p.children,
        vec![
            Node::text("a"),
            Element::new("br").into(),
            Node::text("b"),
            Element::new("img").with_attribute("src", "x.png").into(),
        ]
    );
}

#[test]
fn test_parse_fragment_resolves_html_entities() {
    let nodes = parse_fragment("a&nbsp;b &copy; &#65;").unwrap();

    assert_eq!(nodes, vec![Node::text("a\u{a0}b \u{a9} A")]);
}

#[test]
fn test_parse_fragment_accepts_valueless_attributes() {
    let nodes = parse_fragment("<input disabled type=checkbox>").unwrap();

    let input = nodes[0].as_element().unwrap();
    assert_eq!(input.attribute("disabled"), Some(""));
    assert_eq!(input.attribute("type"), Some("checkbox"));
}

#[test]
fn test_parse_fragment_closing_tag_closes_inner_elements() {
    let nodes = parse_fragment("<div><p>open</div>after").unwrap();

    assert_eq!(nodes.len(), 2);
    let div = nodes[0].as_element().unwrap();
    assert_eq!(div.children[0].as_element().unwrap().name, "p");
    assert_eq!(nodes[1], Node::text("after"));
}

#[test]
fn test_parse_fragment_empty_input_yields_nothing() {
    assert!(parse_fragment("").unwrap().is_empty());
}

#[test]
fn test_parse_fragment_rejects_unclosed_element() {
    let error = parse_fragment("<div><p>open</p>").unwrap_err();

    assert!(matches!(error, RivuletError::Parse { .. }));
}

#[test]
fn test_parse_fragment_rejects_mismatched_end_tag() {
    let error = parse_fragment("<div></span></div>").unwrap_err();

    assert!(error.is_parse());
}

#[test]
fn test_markup_parser_rejects_non_utf8_body() {
    let response = Response::new(200, vec![0xff, 0xfe, 0x00]);

    let error = MarkupParser.parse(&response).unwrap_err();

    assert!(error.is_parse());
}

#[test]
fn test_text_parser_wraps_body() {
    let response = Response::ok("<not parsed>");

    assert_eq!(
        TextParser.parse(&response).unwrap(),
        vec![Node::text("<not parsed>")]
    );
    assert!(TextParser.parse(&Response::ok("")).unwrap().is_empty());
}

#[test]
fn test_closure_is_a_parser() {
    let lines = |response: &Response| -> rivulet_core::Result<Vec<String>> {
        Ok(response.text()?.lines().map(str::to_string).collect())
    };

    assert_eq!(
        lines.parse(&Response::ok("a\nb")).unwrap(),
        vec!["a".to_string(), "b".to_string()]
    );
}
