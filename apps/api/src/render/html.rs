//! HTML projection of a visual tree.
//!
//! Produces a self-contained fragment with inline styles only — no classes,
//! no scripts, no external resources — so the host page can print it as-is.
//! All text is escaped here, in one place; rich content arrives as
//! structure, never as raw markup.

use crate::render::theme::{Palette, Theme, TypeScale};
use crate::render::tree::{Inline, ListMarker, Node, TextRole, VisualTree};
use crate::richtext::scanner::escape;

/// Serializes a rendered tree using the theme's palette and scale.
pub fn to_html(tree: &VisualTree, theme: &Theme) -> String {
    let palette = &theme.palette;
    let scale = &theme.scale;
    let mut out = String::with_capacity(4096);

    out.push_str(&format!(
        "<div style=\"font-family:{};background-color:{};color:#333;\
         max-width:8.5in;margin:0 auto;padding:0.75in;line-height:1.4;\
         font-size:{}pt\">",
        escape(&tree.font_family),
        palette.background,
        scale.body_pt,
    ));
    write_nodes(&mut out, &tree.children, theme, palette, scale);
    out.push_str("</div>");
    out
}

fn write_nodes(out: &mut String, nodes: &[Node], theme: &Theme, palette: &Palette, scale: &TypeScale) {
    for node in nodes {
        write_node(out, node, theme, palette, scale);
    }
}

fn write_node(out: &mut String, node: &Node, theme: &Theme, palette: &Palette, scale: &TypeScale) {
    match node {
        Node::Text { role, inlines } => write_text(out, *role, inlines, palette, scale),
        Node::List { marker, items } => {
            let (tag, style_type) = match marker {
                ListMarker::Disc => ("ul", "disc"),
                ListMarker::Decimal => ("ol", "decimal"),
            };
            out.push_str(&format!(
                "<{tag} style=\"list-style-type:{style_type};\
                 padding-left:1.25rem;margin:0.5rem 0\">"
            ));
            for item in items {
                out.push_str("<li style=\"margin-bottom:0.25rem\">");
                write_inlines(out, item);
                out.push_str("</li>");
            }
            out.push_str(&format!("</{tag}>"));
        }
        Node::TagRow(tags) => {
            out.push_str("<div style=\"display:flex;flex-wrap:wrap;gap:0.5rem\">");
            for tag in tags {
                out.push_str(&format!(
                    "<span style=\"background-color:{};padding:0.25rem 0.5rem;\
                     border-radius:3px\">{}</span>",
                    palette.chip_background,
                    escape(tag),
                ));
            }
            out.push_str("</div>");
        }
        Node::Entry(children) => {
            out.push_str("<div style=\"margin-bottom:1rem\">");
            write_nodes(out, children, theme, palette, scale);
            out.push_str("</div>");
        }
        Node::Section {
            id: None, children, ..
        } => {
            // Personal header: centered, ruled off from the body.
            out.push_str(&format!(
                "<header style=\"text-align:center;margin-bottom:1.5rem;\
                 padding-bottom:1rem;border-bottom:2px solid {}\">",
                palette.primary,
            ));
            write_nodes(out, children, theme, palette, scale);
            out.push_str("</header>");
        }
        Node::Section {
            id: Some(_),
            title,
            children,
        } => {
            out.push_str("<section style=\"margin-bottom:1.5rem\">");
            if let Some(title) = title {
                let transform = if theme.uppercase_section_titles {
                    "text-transform:uppercase;letter-spacing:0.5px;"
                } else {
                    ""
                };
                out.push_str(&format!(
                    "<h2 style=\"font-size:{}pt;color:{};margin:0 0 0.75rem;\
                     padding-bottom:0.25rem;border-bottom:1px solid {};{}\">{}</h2>",
                    scale.section_pt,
                    palette.primary,
                    palette.accent,
                    transform,
                    escape(title),
                ));
            }
            write_nodes(out, children, theme, palette, scale);
            out.push_str("</section>");
        }
        Node::Columns { sidebar, main } => {
            out.push_str(
                "<div style=\"display:grid;grid-template-columns:1fr 2fr;gap:2rem\">",
            );
            out.push_str("<div>");
            write_nodes(out, sidebar, theme, palette, scale);
            out.push_str("</div><div>");
            write_nodes(out, main, theme, palette, scale);
            out.push_str("</div></div>");
        }
    }
}

fn write_text(
    out: &mut String,
    role: TextRole,
    inlines: &[Inline],
    palette: &Palette,
    scale: &TypeScale,
) {
    let (tag, style) = match role {
        TextRole::Name => (
            "h1",
            format!(
                "font-size:{}pt;color:{};margin:0 0 0.5rem;letter-spacing:1px",
                scale.name_pt, palette.primary
            ),
        ),
        TextRole::PersonalTitle => (
            "p",
            format!("font-size:{}pt;color:{};margin:0 0 1rem", scale.entry_pt, palette.accent),
        ),
        TextRole::Contact => (
            "span",
            format!("color:{};margin:0 0.5rem;font-size:0.9em", palette.muted),
        ),
        TextRole::EntryTitle => (
            "h3",
            format!(
                "font-size:{}pt;color:{};margin:0 0 0.25rem",
                scale.entry_pt, palette.primary
            ),
        ),
        TextRole::EntrySubtitle => (
            "p",
            format!("color:{};font-weight:bold;margin:0", palette.accent),
        ),
        TextRole::Dates => (
            "p",
            format!("color:{};font-style:italic;margin:0.25rem 0 0.5rem", palette.muted),
        ),
        TextRole::Body => ("p", "margin:0.25rem 0;line-height:1.4".to_string()),
        TextRole::Link => ("p", format!("color:{};margin:0.25rem 0", palette.accent)),
    };
    out.push_str(&format!("<{tag} style=\"{style}\">"));
    write_inlines(out, inlines);
    out.push_str(&format!("</{tag}>"));
}

fn write_inlines(out: &mut String, inlines: &[Inline]) {
    for inline in inlines {
        match inline {
            Inline::Text(text) => out.push_str(&escape(text)),
            Inline::Bold(inner) => {
                out.push_str("<strong>");
                write_inlines(out, inner);
                out.push_str("</strong>");
            }
            Inline::Italic(inner) => {
                out.push_str("<em>");
                write_inlines(out, inner);
                out.push_str("</em>");
            }
            Inline::Break => out.push_str("<br>"),
        }
    }
}
