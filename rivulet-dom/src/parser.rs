// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Turning response payloads into content units.

use crate::{Element, Node};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rivulet_core::{Result, RivuletError};
use rivulet_fetch::Response;

/// Maps a response payload to an ordered sequence of content units.
///
/// Any `Fn(&Response) -> Result<Vec<U>>` closure is a parser. A failure
/// becomes the terminal error of the fetch result's window.
pub trait Parser<U>: Send + Sync + 'static {
    fn parse(&self, response: &Response) -> Result<Vec<U>>;
}

impl<U, F> Parser<U> for F
where
    F: Fn(&Response) -> Result<Vec<U>> + Send + Sync + 'static,
{
    fn parse(&self, response: &Response) -> Result<Vec<U>> {
        self(response)
    }
}

/// Parses the body as a markup fragment.
///
/// Several top-level nodes are allowed. Whitespace-only text between
/// top-level nodes is dropped; inside elements it is kept. CDATA sections
/// become text, and declarations, processing instructions and doctypes are
/// skipped.
///
/// HTML fragments are accepted too: void elements (`<br>`, `<img ...>`) need
/// no closing tag, attributes may be unquoted or valueless, common named
/// entities such as `&nbsp;` resolve, and a closing tag implicitly closes the
/// elements still open inside it. A closing tag matching no open element, or
/// an element left open at the end of the input, is a parse error.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupParser;

impl Parser<Node> for MarkupParser {
    fn parse(&self, response: &Response) -> Result<Vec<Node>> {
        parse_fragment(response.text()?)
    }
}

/// Wraps the whole body in a single text node.
///
/// An empty body yields no units.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextParser;

impl Parser<Node> for TextParser {
    fn parse(&self, response: &Response) -> Result<Vec<Node>> {
        let text = response.text()?;
        if text.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![Node::text(text)])
    }
}

/// Parse `markup` into its top-level nodes.
pub fn parse_fragment(markup: &str) -> Result<Vec<Node>> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().check_end_names = false;

    let mut open: Vec<Element> = Vec::new();
    let mut roots = Vec::new();

    loop {
        let event = reader.read_event().map_err(|e| {
            RivuletError::parse_error(format!("at byte {}: {}", reader.buffer_position(), e))
        })?;

        match event {
            Event::Start(start) => {
                let element = element_from(&start)?;
                if is_void(&element.name) {
                    append(&mut open, &mut roots, element.into());
                } else {
                    open.push(element);
                }
            }
            Event::Empty(empty) => {
                let element = element_from(&empty)?;
                append(&mut open, &mut roots, element.into());
            }
            Event::End(end) => {
                let name = String::from_utf8_lossy(end.name().as_ref()).into_owned();
                close(&mut open, &mut roots, &name)?;
            }
            Event::Text(text) => {
                let content = text
                    .unescape_with(resolve_entity)
                    .map_err(|e| RivuletError::parse_error(e.to_string()))?;
                // Inter-element whitespace inside an element is content.
                if !content.is_empty() && !(open.is_empty() && content.trim().is_empty()) {
                    append(&mut open, &mut roots, Node::text(content));
                }
            }
            Event::CData(cdata) => {
                let content = String::from_utf8_lossy(&cdata).into_owned();
                append(&mut open, &mut roots, Node::Text(content));
            }
            Event::Comment(comment) => {
                let content = String::from_utf8_lossy(&comment).into_owned();
                append(&mut open, &mut roots, Node::Comment(content));
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(element) = open.last() {
        return Err(RivuletError::parse_error(format!(
            "unclosed element <{}>",
            element.name
        )));
    }

    Ok(roots)
}

fn element_from(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element::new(String::from_utf8_lossy(start.name().as_ref()));
    for attribute in start.html_attributes() {
        let attribute = attribute.map_err(|e| RivuletError::parse_error(e.to_string()))?;
        let value = attribute
            .unescape_value_with(resolve_entity)
            .map_err(|e| RivuletError::parse_error(e.to_string()))?;
        element.attributes.push((
            String::from_utf8_lossy(attribute.key.as_ref()).into_owned(),
            value.into_owned(),
        ));
    }
    Ok(element)
}

/// Close the innermost open element named `name` and everything opened
/// inside it.
fn close(open: &mut Vec<Element>, roots: &mut Vec<Node>, name: &str) -> Result<()> {
    if is_void(name) {
        return Ok(());
    }
    if !open.iter().any(|element| element.name.eq_ignore_ascii_case(name)) {
        return Err(RivuletError::parse_error(format!("unexpected </{name}>")));
    }
    while let Some(element) = open.pop() {
        let matched = element.name.eq_ignore_ascii_case(name);
        append(open, roots, element.into());
        if matched {
            break;
        }
    }
    Ok(())
}

fn append(open: &mut [Element], roots: &mut Vec<Node>, node: Node) {
    match open.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

fn is_void(name: &str) -> bool {
    VOID_ELEMENTS
        .iter()
        .any(|void| void.eq_ignore_ascii_case(name))
}

fn resolve_entity(name: &str) -> Option<&'static str> {
    let resolved = match name {
        "lt" => "<",
        "gt" => ">",
        "amp" => "&",
        "apos" => "'",
        "quot" => "\"",
        "nbsp" => "\u{a0}",
        "copy" => "\u{a9}",
        "reg" => "\u{ae}",
        "trade" => "\u{2122}",
        "deg" => "\u{b0}",
        "middot" => "\u{b7}",
        "bull" => "\u{2022}",
        "hellip" => "\u{2026}",
        "ndash" => "\u{2013}",
        "mdash" => "\u{2014}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "laquo" => "\u{ab}",
        "raquo" => "\u{bb}",
        "euro" => "\u{20ac}",
        "times" => "\u{d7}",
        _ => return None,
    };
    Some(resolved)
}
