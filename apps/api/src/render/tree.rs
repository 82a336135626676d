//! Renderer-agnostic visual tree.
//!
//! The renderer projects a document into this structure; serializers (the
//! HTML preview today) turn it into concrete output. Nodes carry semantic
//! roles rather than styling — the theme decides what a role looks like at
//! serialization time. Two renders of the same document produce
//! structurally equal trees, which is what preview diffing and the
//! snapshot-style tests rely on.

use crate::models::resume::SectionId;
use crate::richtext::parse::RichInline;

/// Bullet marker semantics carried from the rich fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListMarker {
    Disc,
    Decimal,
}

/// Inline run inside a paragraph or list item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Break,
}

impl Inline {
    pub fn text(s: impl Into<String>) -> Self {
        Inline::Text(s.into())
    }

    /// Converts parsed rich content into tree inlines.
    pub fn from_rich(run: &[RichInline]) -> Vec<Inline> {
        run.iter()
            .map(|inline| match inline {
                RichInline::Text(text) => Inline::Text(text.clone()),
                RichInline::Bold(inner) => Inline::Bold(Inline::from_rich(inner)),
                RichInline::Italic(inner) => Inline::Italic(Inline::from_rich(inner)),
                RichInline::Break => Inline::Break,
            })
            .collect()
    }
}

/// What a text node *is*, so themes can style it without the renderer
/// knowing about colors or sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// The person's name in the header.
    Name,
    /// The professional title line under the name.
    PersonalTitle,
    /// One contact item (email, phone, website).
    Contact,
    /// An entry headline: job title, degree, project name, reference name.
    EntryTitle,
    /// The line under an entry headline: company, school.
    EntrySubtitle,
    /// Date ranges and years.
    Dates,
    /// Ordinary body copy.
    Body,
    /// A URL rendered as visible text (print-stable, not interactive).
    Link,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Text {
        role: TextRole,
        inlines: Vec<Inline>,
    },
    List {
        marker: ListMarker,
        items: Vec<Vec<Inline>>,
    },
    /// Skill chips / compact label row.
    TagRow(Vec<String>),
    /// One entry of a list section, grouped for spacing.
    Entry(Vec<Node>),
    /// A titled document section. The personal header has no title.
    Section {
        id: Option<SectionId>,
        title: Option<String>,
        children: Vec<Node>,
    },
    /// Sidebar/main split used by two-column themes.
    Columns {
        sidebar: Vec<Node>,
        main: Vec<Node>,
    },
}

impl Node {
    pub fn text(role: TextRole, value: impl Into<String>) -> Self {
        Node::Text {
            role,
            inlines: vec![Inline::text(value)],
        }
    }
}

/// The rendered document: resolved font plus the node forest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisualTree {
    pub template: String,
    pub font_family: String,
    pub children: Vec<Node>,
}

impl VisualTree {
    /// All section ids that made it into the output, in render order.
    /// Used by tests asserting the empty-section contract.
    pub fn section_ids(&self) -> Vec<SectionId> {
        fn walk(nodes: &[Node], out: &mut Vec<SectionId>) {
            for node in nodes {
                match node {
                    Node::Section { id: Some(id), children, .. } => {
                        out.push(*id);
                        walk(children, out);
                    }
                    Node::Section { children, .. } | Node::Entry(children) => walk(children, out),
                    Node::Columns { sidebar, main } => {
                        walk(sidebar, out);
                        walk(main, out);
                    }
                    _ => {}
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }
}
