//! Markup flattening helpers

use scraper::{ElementRef, Html, Node};

/// Elements whose text never reaches the reader
const INVISIBLE_ELEMENTS: [&str; 3] = ["script", "style", "noscript"];

/// Flattens an element's visible text into a single line
///
/// Each text node is trimmed and the non-empty pieces are joined by a single
/// space.
pub fn flatten_inline(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flattens a whole document into trimmed, non-empty lines in reading order
///
/// Text nodes are split on newlines, so a node spanning several source lines
/// yields several entries.
pub fn flatten_lines(document: &Html) -> Vec<String> {
    let mut lines = Vec::new();

    for node in document.root_element().descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };

        let hidden = node.ancestors().any(|ancestor| {
            ancestor
                .value()
                .as_element()
                .is_some_and(|element| INVISIBLE_ELEMENTS.contains(&element.name()))
        });
        if hidden {
            continue;
        }

        lines.extend(
            text.split('\n')
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string),
        );
    }

    lines
}
