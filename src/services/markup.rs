// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Small helpers over `roxmltree` shared by the GPX and TCX decoders.
//!
//! Elements are matched by local name so namespace prefixes are irrelevant.
//! Errors are plain messages; each decoder wraps them in its own variant.

use roxmltree::{Document, Node};
use std::fmt::Display;
use std::str::FromStr;

use crate::time_utils::parse_xml_timestamp;
use chrono::{DateTime, Utc};

/// Borrow the bytes as UTF-8 text, dropping a leading byte-order mark.
pub(crate) fn document_text(bytes: &[u8]) -> Result<&str, String> {
    let text = std::str::from_utf8(bytes).map_err(|e| format!("invalid UTF-8: {}", e))?;
    Ok(text.strip_prefix('\u{feff}').unwrap_or(text))
}

/// Parse a document and check the root element's local name.
pub(crate) fn parse_document<'input>(
    text: &'input str,
    root: &str,
) -> Result<Document<'input>, String> {
    let doc = Document::parse(text).map_err(|e| e.to_string())?;
    let actual = doc.root_element().tag_name().name();
    if actual != root {
        return Err(format!(
            "expected <{}> root element, found <{}>",
            root, actual
        ));
    }
    Ok(doc)
}

/// First child element with the given local name.
pub(crate) fn child<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.children()
        .find(|c| c.is_element() && c.tag_name().name() == name)
}

/// Follow a chain of child elements, taking the first match at each step.
pub(crate) fn child_at<'a, 'input>(
    node: Node<'a, 'input>,
    path: &[&str],
) -> Option<Node<'a, 'input>> {
    path.iter().try_fold(node, |current, name| child(current, name))
}

/// All elements reached by following `path` from `node`, in document order.
pub(crate) fn nodes_at_path<'a, 'input>(
    node: Node<'a, 'input>,
    path: &[&str],
) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];
    for name in path {
        let mut next = Vec::new();
        for parent in &current {
            next.extend(
                parent
                    .children()
                    .filter(|c| c.is_element() && c.tag_name().name() == *name),
            );
        }
        current = next;
    }
    current
}

/// Trimmed text content of an element, `None` when absent or blank.
pub(crate) fn field_text<'a>(node: Option<Node<'a, '_>>) -> Option<&'a str> {
    node.and_then(|n| n.text())
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Parse a present field; a value that does not parse is an error.
pub(crate) fn parse_field<T>(text: Option<&str>, field: &str) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: Display,
{
    text.map(|t| {
        t.parse::<T>()
            .map_err(|e| format!("invalid {} {:?}: {}", field, t, e))
    })
    .transpose()
}

/// Parse a required coordinate; it must be present and finite.
pub(crate) fn parse_coordinate(text: Option<&str>, field: &str) -> Result<f64, String> {
    let value: f64 = parse_field(text, field)?.ok_or_else(|| format!("missing {}", field))?;
    if !value.is_finite() {
        return Err(format!("non-finite {}", field));
    }
    Ok(value)
}

/// Parse a present timestamp field.
pub(crate) fn parse_time(text: Option<&str>) -> Result<Option<DateTime<Utc>>, String> {
    text.map(|t| parse_xml_timestamp(t).ok_or_else(|| format!("invalid time {:?}", t)))
        .transpose()
}
