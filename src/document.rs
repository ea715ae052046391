// SPDX-License-Identifier: PMPL-1.0-or-later
//! Typed document tree and the per-level heading construction surface.
//!
//! Nodes carry their heading-ness as an explicit variant with a typed
//! [`HeadingLevel`] discriminant. Nothing downstream recognizes headings
//! by matching a rendered tag-name string; the same level rendered
//! through different mechanisms is still one discriminant.
//!
//! The `h1`..`h6` constructors are deliberately thin: they delegate level
//! and content to the node, register the emission on the active
//! [`HierarchyScope`], and apply level-keyed default styling that
//! caller overrides compose with additively. No hierarchy logic lives
//! here.

use crate::level::HeadingLevel;
use crate::rule::Violation;
use crate::tracker::HierarchyScope;
use std::collections::BTreeMap;

/// Presentation attributes attached to a heading node.
///
/// `props` holds CSS-like property/value pairs; `classes` holds class
/// tokens. Both merge additively: see [`Style::merged_with`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Style {
    pub classes: Vec<String>,
    pub props: BTreeMap<String, String>,
}

impl Style {
    pub fn new() -> Self {
        Style::default()
    }

    /// Add a class token.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set a property value.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// The default visual style keyed by level, matching the user-agent
    /// scale for heading elements.
    pub fn default_for(level: HeadingLevel) -> Self {
        let font_size = match level {
            HeadingLevel::H1 => "2em",
            HeadingLevel::H2 => "1.5em",
            HeadingLevel::H3 => "1.17em",
            HeadingLevel::H4 => "1em",
            HeadingLevel::H5 => "0.83em",
            HeadingLevel::H6 => "0.67em",
        };
        Style::new()
            .prop("font-size", font_size)
            .prop("font-weight", "700")
    }

    /// Compose `overrides` on top of `self`.
    ///
    /// Override properties win per key; unmentioned defaults survive.
    /// Classes are appended in order, skipping tokens already present.
    pub fn merged_with(mut self, overrides: Style) -> Self {
        for (name, value) in overrides.props {
            self.props.insert(name, value);
        }
        for class in overrides.classes {
            if !self.classes.contains(&class) {
                self.classes.push(class);
            }
        }
        self
    }
}

/// One node of a materialized document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Heading(HeadingNode),
    Element(ElementNode),
    Text(String),
}

/// A heading with its typed level discriminant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingNode {
    pub level: HeadingLevel,
    pub text: String,
    /// Stable identifier for deep-linking, if the caller supplied one.
    pub anchor: Option<String>,
    pub style: Style,
}

/// A non-heading container node, traversed transparently by audits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementNode {
    pub name: String,
    pub children: Vec<Node>,
}

impl ElementNode {
    pub fn new(name: impl Into<String>) -> Self {
        ElementNode {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Append a child node.
    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }
}

impl From<HeadingNode> for Node {
    fn from(heading: HeadingNode) -> Node {
        Node::Heading(heading)
    }
}

impl From<ElementNode> for Node {
    fn from(element: ElementNode) -> Node {
        Node::Element(element)
    }
}

/// A non-heading container node under construction.
pub fn element(name: impl Into<String>) -> ElementNode {
    ElementNode::new(name)
}

/// A text node.
pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

macro_rules! heading_constructors {
    ($(($fn_name:ident, $level:ident)),+ $(,)?) => {
        $(
            #[doc = concat!(
                "An `", stringify!($fn_name),
                "` heading under construction; finish with [`HeadingBuilder::emit`]."
            )]
            pub fn $fn_name(text: impl Into<String>) -> HeadingBuilder {
                HeadingBuilder::new(HeadingLevel::$level, text)
            }
        )+
    };
}

heading_constructors!(
    (h1, H1),
    (h2, H2),
    (h3, H3),
    (h4, H4),
    (h5, H5),
    (h6, H6),
);

/// Builder returned by the `h1`..`h6` constructors.
#[derive(Debug, Clone)]
pub struct HeadingBuilder {
    level: HeadingLevel,
    text: String,
    anchor: Option<String>,
    overrides: Style,
}

impl HeadingBuilder {
    fn new(level: HeadingLevel, text: impl Into<String>) -> Self {
        HeadingBuilder {
            level,
            text: text.into(),
            anchor: None,
            overrides: Style::new(),
        }
    }

    /// Attach a stable identifier for deep-linking.
    pub fn anchor(mut self, id: impl Into<String>) -> Self {
        self.anchor = Some(id.into());
        self
    }

    /// Add a class token to the style overrides.
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.overrides = self.overrides.class(class);
        self
    }

    /// Set a property in the style overrides.
    pub fn prop(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides = self.overrides.prop(name, value);
        self
    }

    /// Fold a whole override style into the builder additively.
    pub fn style(mut self, overrides: Style) -> Self {
        self.overrides = self.overrides.merged_with(overrides);
        self
    }

    /// Register the emission on `scope` and produce the node.
    ///
    /// A violating registration still produces the node; rendering is
    /// never blocked. The diagnostic surfacing is the scope's concern.
    pub fn emit(self, scope: &mut HierarchyScope) -> Node {
        self.emit_with_report(scope).0
    }

    /// Like [`HeadingBuilder::emit`], but hands the registration's
    /// violation back to the caller alongside the node.
    pub fn emit_with_report(self, scope: &mut HierarchyScope) -> (Node, Option<Violation>) {
        let violation = scope.register(self.level).map(|v| match &self.anchor {
            Some(anchor) => v.with_anchor(anchor),
            None => v,
        });

        let node = Node::Heading(HeadingNode {
            level: self.level,
            text: self.text,
            anchor: self.anchor,
            style: Style::default_for(self.level).merged_with(self.overrides),
        });

        (node, violation)
    }

    /// Build the node without touching any scope.
    ///
    /// For assembling trees that will be checked by the static audit
    /// rather than tracked live.
    pub fn into_node(self) -> Node {
        Node::Heading(HeadingNode {
            level: self.level,
            text: self.text,
            anchor: self.anchor,
            style: Style::default_for(self.level).merged_with(self.overrides),
        })
    }
}
