//! Thin query layer over parsed markup
//!
//! Extraction code is written against the [`MarkupNode`] trait so it can run
//! on `scraper` elements as well as on hand-built trees in tests.

use crate::extract::matcher::ClassMatcher;
use crate::{ExtractError, ExtractResult};
use scraper::{ElementRef, Node};

/// An element in a parsed document
pub trait MarkupNode: Sized {
    /// Lowercase tag name, e.g. `div`
    fn tag_name(&self) -> &str;

    /// Value of an attribute, if present
    fn attribute(&self, name: &str) -> Option<&str>;

    /// Direct child elements, in document order
    fn child_elements(&self) -> Vec<Self>;

    /// All descendant elements in document order, excluding the node itself
    fn descendant_elements(&self) -> Vec<Self>;

    /// The node's single string, if it has one
    ///
    /// A node has a string when it has exactly one child and that child is
    /// either text or an element that itself has a string. Empty nodes and
    /// nodes with mixed content have none.
    fn string_content(&self) -> Option<String>;

    /// Whitespace-separated tokens of the class attribute
    fn class_tokens(&self) -> Vec<&str> {
        self.attribute("class")
            .map(|classes| classes.split_whitespace().collect())
            .unwrap_or_default()
    }

    /// Returns true if the class attribute contains the matcher's token
    fn has_class(&self, matcher: &ClassMatcher) -> bool {
        self.attribute("class")
            .is_some_and(|classes| matcher.matches(classes))
    }
}

impl<'a> MarkupNode for ElementRef<'a> {
    fn tag_name(&self) -> &str {
        self.value().name()
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }

    fn child_elements(&self) -> Vec<Self> {
        (**self).children().filter_map(ElementRef::wrap).collect()
    }

    fn descendant_elements(&self) -> Vec<Self> {
        // The first node yielded by `descendants` is the element itself
        (**self)
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .collect()
    }

    fn string_content(&self) -> Option<String> {
        let mut children = (**self).children();
        let only = children.next()?;
        if children.next().is_some() {
            return None;
        }

        match only.value() {
            Node::Text(text) => {
                let text: &str = &text.text;
                Some(text.to_owned())
            }
            Node::Element(_) => ElementRef::wrap(only)?.string_content(),
            _ => None,
        }
    }
}

/// Finds the first descendant whose class attribute contains the token
pub fn find_by_class_token<N: MarkupNode>(root: &N, matcher: &ClassMatcher) -> Option<N> {
    root.descendant_elements()
        .into_iter()
        .find(|node| node.has_class(matcher))
}

/// Finds every descendant whose class attribute contains the token
pub fn find_all_by_class_token<N: MarkupNode>(root: &N, matcher: &ClassMatcher) -> Vec<N> {
    root.descendant_elements()
        .into_iter()
        .filter(|node| node.has_class(matcher))
        .collect()
}

/// Finds the first descendant with the given tag name
pub fn first_descendant_tag<N: MarkupNode>(root: &N, tag: &str) -> Option<N> {
    root.descendant_elements()
        .into_iter()
        .find(|node| node.tag_name() == tag)
}

/// String content of a node (see [`MarkupNode::string_content`])
pub fn text_of<N: MarkupNode>(node: &N) -> Option<String> {
    node.string_content()
}

/// Like [`find_by_class_token`], but a missing element is an error
pub fn expect_class<N: MarkupNode>(root: &N, matcher: &ClassMatcher) -> ExtractResult<N> {
    find_by_class_token(root, matcher).ok_or_else(|| ExtractError::MissingElement {
        class: matcher.token().to_string(),
    })
}

/// Like [`first_descendant_tag`], but a missing element is an error
pub fn expect_tag<N: MarkupNode>(root: &N, tag: &str, within: &str) -> ExtractResult<N> {
    first_descendant_tag(root, tag).ok_or_else(|| ExtractError::MissingDescendant {
        tag: tag.to_string(),
        within: within.to_string(),
    })
}

/// Reads a required attribute
pub fn expect_attr<'n, N: MarkupNode>(node: &'n N, attr: &str) -> ExtractResult<&'n str> {
    node.attribute(attr)
        .ok_or_else(|| ExtractError::MissingAttribute {
            attr: attr.to_string(),
            tag: node.tag_name().to_string(),
        })
}
