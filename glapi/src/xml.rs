// SPDX-FileCopyrightText: 2025 Contributors to the glapi project.
// SPDX-License-Identifier: Apache-2.0

//! Small helpers over `roxmltree` nodes shared by the registry and feature scanners.

use roxmltree::Node;

/// Iterates over the element children of `node`, skipping text and comments.
pub(crate) fn elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Iterates over the direct element children of `node` whose tag is `tag`.
pub(crate) fn children_named<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    elements(node).filter(move |child| child.tag_name().name() == tag)
}

/// Returns the first direct element child of `node` whose tag is `tag`.
pub(crate) fn first_child<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'static str,
) -> Option<Node<'a, 'input>> {
    children_named(node, tag).next()
}

/// Collapses every whitespace run to a single space and trims both ends.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
