//! The single parameterized renderer behind all five templates.
//!
//! `render` is a pure function: no side effects, no I/O, no state. It never
//! fails — a malformed or absent optional field is omitted, not an error,
//! so one bad value can never take down a full-page preview. Two calls with
//! structurally equal input produce structurally equal trees.

use std::borrow::Cow;

use crate::models::resume::{
    Education, Experience, Language, Project, Reference, ResumeDocument, SectionId,
};
use crate::render::sample;
use crate::render::theme::{Layout, Theme};
use crate::render::tree::{Inline, ListMarker, Node, TextRole, VisualTree};
use crate::richtext::parse::RichBlock;

/// Per-render knobs supplied by the editing session.
#[derive(Debug, Clone, Default)]
pub struct RenderOptions {
    /// Overrides the theme's default font when set.
    pub font_family: Option<String>,
    /// Session section order, when the user has dragged sections around.
    pub section_order: Option<Vec<SectionId>>,
    /// Opt-in "preview with sample data": each empty section is replaced by
    /// the canned example section before rendering. Never on by default.
    pub sample_fallback: bool,
}

/// Projects a document into a themed visual tree.
pub fn render(document: &ResumeDocument, theme: &Theme, options: &RenderOptions) -> VisualTree {
    let document: Cow<'_, ResumeDocument> = if options.sample_fallback {
        Cow::Owned(sample::merge_sample(document))
    } else {
        Cow::Borrowed(document)
    };

    let order = effective_order(theme, options.section_order.as_deref());
    let font_family = options
        .font_family
        .clone()
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| theme.default_font.to_string());

    let mut children = vec![personal_header(&document)];

    let sections: Vec<(SectionId, Node)> = order
        .iter()
        .filter(|id| !document.section_is_empty(**id))
        .map(|id| (*id, render_section(&document, theme, *id)))
        .collect();

    match theme.layout {
        Layout::SingleColumn => {
            children.extend(sections.into_iter().map(|(_, node)| node));
        }
        Layout::TwoColumn { sidebar } => {
            let (side, main): (Vec<_>, Vec<_>) = sections
                .into_iter()
                .partition(|(id, _)| sidebar.contains(id));
            children.push(Node::Columns {
                sidebar: side.into_iter().map(|(_, node)| node).collect(),
                main: main.into_iter().map(|(_, node)| node).collect(),
            });
        }
    }

    VisualTree {
        template: theme.id.to_string(),
        font_family,
        children,
    }
}

/// The session order when it is a valid permutation, else the theme default.
fn effective_order(theme: &Theme, session_order: Option<&[SectionId]>) -> Vec<SectionId> {
    if let Some(order) = session_order {
        let mut sorted = order.to_vec();
        sorted.sort();
        sorted.dedup();
        if sorted.len() == theme.section_order.len() {
            return order.to_vec();
        }
    }
    theme.section_order.to_vec()
}

fn non_empty(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// The contact block every theme renders unconditionally. Absent optional
/// fields are omitted — no empty labels, ever.
fn personal_header(document: &ResumeDocument) -> Node {
    let personal = &document.personal;
    let mut children = Vec::new();

    let name = format!("{} {}", personal.first_name.trim(), personal.last_name.trim());
    if let Some(name) = non_empty(&name) {
        children.push(Node::text(TextRole::Name, name));
    }
    if let Some(title) = non_empty(&personal.title) {
        children.push(Node::text(TextRole::PersonalTitle, title));
    }
    for contact in [&personal.email, &personal.phone, &personal.website] {
        if let Some(value) = non_empty(contact) {
            children.push(Node::text(TextRole::Contact, value));
        }
    }

    Node::Section {
        id: None,
        title: None,
        children,
    }
}

fn render_section(document: &ResumeDocument, theme: &Theme, id: SectionId) -> Node {
    let children = match id {
        SectionId::Summary => vec![Node::text(TextRole::Body, document.summary.trim())],
        SectionId::Experience => document.experience.iter().map(experience_entry).collect(),
        SectionId::Education => document.education.iter().map(education_entry).collect(),
        SectionId::Skills => vec![skills_node(&document.skills, theme)],
        SectionId::Projects => document.projects.iter().map(project_entry).collect(),
        SectionId::Achievements => vec![Node::List {
            marker: ListMarker::Disc,
            items: document
                .achievements
                .iter()
                .map(|a| vec![Inline::text(a.clone())])
                .collect(),
        }],
        SectionId::Languages => document.languages.iter().map(language_line).collect(),
        SectionId::References => document.references.iter().map(reference_entry).collect(),
    };

    Node::Section {
        id: Some(id),
        title: Some(theme.section_title(id).to_string()),
        children,
    }
}

fn experience_entry(job: &Experience) -> Node {
    let mut children = Vec::new();
    if let Some(title) = non_empty(&job.title) {
        children.push(Node::text(TextRole::EntryTitle, title));
    }
    if let Some(company) = non_empty(&job.company) {
        children.push(Node::text(TextRole::EntrySubtitle, company));
    }
    if let Some(dates) = date_range(&job.start_date, &job.end_date) {
        children.push(Node::text(TextRole::Dates, dates));
    }
    children.extend(responsibility_nodes(job));
    Node::Entry(children)
}

/// Rich fragment when present and non-empty, else the plain bullet list,
/// else nothing. `<ul>`/`<ol>` semantics survive into the marker.
fn responsibility_nodes(job: &Experience) -> Vec<Node> {
    let rich = job
        .responsibilities_rich
        .as_ref()
        .filter(|fragment| !fragment.is_blank());
    if let Some(fragment) = rich {
        return fragment
            .blocks()
            .into_iter()
            .map(|block| match block {
                RichBlock::List { ordered, items } => Node::List {
                    marker: if ordered {
                        ListMarker::Decimal
                    } else {
                        ListMarker::Disc
                    },
                    items: items.iter().map(|item| Inline::from_rich(item)).collect(),
                },
                RichBlock::Paragraph(run) => Node::Text {
                    role: TextRole::Body,
                    inlines: Inline::from_rich(&run),
                },
            })
            .collect();
    }

    let items: Vec<Vec<Inline>> = job
        .responsibilities
        .iter()
        .filter_map(|r| non_empty(r))
        .map(|r| vec![Inline::text(r)])
        .collect();
    if items.is_empty() {
        Vec::new()
    } else {
        vec![Node::List {
            marker: ListMarker::Disc,
            items,
        }]
    }
}

fn date_range(start: &str, end: &str) -> Option<String> {
    match (non_empty(start), non_empty(end)) {
        (Some(start), Some(end)) => Some(format!("{start} - {end}")),
        (Some(start), None) => Some(start.to_string()),
        (None, Some(end)) => Some(end.to_string()),
        (None, None) => None,
    }
}

fn education_entry(edu: &Education) -> Node {
    let mut children = Vec::new();
    let headline = match (non_empty(&edu.degree), non_empty(&edu.field)) {
        (Some(degree), Some(field)) => Some(format!("{degree} in {field}")),
        (Some(degree), None) => Some(degree.to_string()),
        (None, Some(field)) => Some(field.to_string()),
        (None, None) => None,
    };
    if let Some(headline) = headline {
        children.push(Node::text(TextRole::EntryTitle, headline));
    }
    if let Some(school) = non_empty(&edu.school) {
        children.push(Node::text(TextRole::EntrySubtitle, school));
    }
    if let Some(year) = non_empty(&edu.year) {
        children.push(Node::text(TextRole::Dates, year));
    }
    Node::Entry(children)
}

fn skills_node(skills: &[String], theme: &Theme) -> Node {
    let cleaned: Vec<String> = skills
        .iter()
        .filter_map(|s| non_empty(s))
        .map(str::to_string)
        .collect();
    if theme.skills_as_tags {
        Node::TagRow(cleaned)
    } else {
        Node::List {
            marker: ListMarker::Disc,
            items: cleaned.into_iter().map(|s| vec![Inline::text(s)]).collect(),
        }
    }
}

fn project_entry(project: &Project) -> Node {
    let mut children = Vec::new();
    if let Some(name) = non_empty(&project.name) {
        children.push(Node::text(TextRole::EntryTitle, name));
    }
    if let Some(url) = project.url.as_deref().and_then(non_empty) {
        children.push(Node::text(TextRole::Link, url));
    }
    if let Some(description) = non_empty(&project.description) {
        children.push(Node::text(TextRole::Body, description));
    }
    Node::Entry(children)
}

fn language_line(language: &Language) -> Node {
    let mut inlines = Vec::new();
    if let Some(name) = non_empty(&language.name) {
        inlines.push(Inline::Bold(vec![Inline::text(name)]));
        inlines.push(Inline::text(format!(
            " - {}",
            language.proficiency.as_str()
        )));
    }
    Node::Text {
        role: TextRole::Body,
        inlines,
    }
}

fn reference_entry(reference: &Reference) -> Node {
    let mut children = Vec::new();
    if let Some(name) = non_empty(&reference.name) {
        children.push(Node::text(TextRole::EntryTitle, name));
    }
    let position = match (non_empty(&reference.title), non_empty(&reference.company)) {
        (Some(title), Some(company)) => Some(format!("{title} at {company}")),
        (Some(title), None) => Some(title.to_string()),
        (None, Some(company)) => Some(company.to_string()),
        (None, None) => None,
    };
    if let Some(position) = position {
        children.push(Node::text(TextRole::EntrySubtitle, position));
    }
    let contact: Vec<&str> = [&reference.email, &reference.phone]
        .into_iter()
        .filter_map(|v| non_empty(v))
        .collect();
    if !contact.is_empty() {
        children.push(Node::text(TextRole::Contact, contact.join(" | ")));
    }
    Node::Entry(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalDetails;
    use crate::render::theme::{CLASSIC, MODERN, SOFTWARE_DEVELOPER};
    use crate::richtext::RichTextFragment;

    fn jane_doe() -> ResumeDocument {
        ResumeDocument {
            personal: PersonalDetails {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn job_with_rich(fragment: &str) -> ResumeDocument {
        let rich = RichTextFragment::sanitize(fragment);
        let mut doc = jane_doe();
        doc.experience.push(Experience {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            start_date: "Jan 2020".to_string(),
            end_date: "Present".to_string(),
            responsibilities: rich.derive_plain(),
            responsibilities_rich: Some(rich),
        });
        doc
    }

    fn find_lists(nodes: &[Node], out: &mut Vec<(ListMarker, usize)>) {
        for node in nodes {
            match node {
                Node::List { marker, items } => out.push((*marker, items.len())),
                Node::Section { children, .. } | Node::Entry(children) => {
                    find_lists(children, out)
                }
                Node::Columns { sidebar, main } => {
                    find_lists(sidebar, out);
                    find_lists(main, out);
                }
                _ => {}
            }
        }
    }

    #[test]
    fn test_render_is_deterministic() {
        let doc = job_with_rich("<ul><li>A</li><li>B</li></ul>");
        let options = RenderOptions::default();
        let first = render(&doc, &CLASSIC, &options);
        let second = render(&doc, &CLASSIC, &options);
        assert_eq!(first, second);
    }

    #[test]
    fn test_minimal_document_renders_name_and_no_section_headings() {
        let tree = render(&jane_doe(), &CLASSIC, &RenderOptions::default());
        assert!(tree.section_ids().is_empty());
        let Node::Section { children, .. } = &tree.children[0] else {
            panic!("expected header section");
        };
        assert_eq!(children[0], Node::text(TextRole::Name, "Jane Doe"));
        assert_eq!(children.len(), 1, "no empty contact rows");
    }

    #[test]
    fn test_empty_sections_have_no_heading() {
        let mut doc = jane_doe();
        doc.skills = vec!["Rust".to_string()];
        let tree = render(&doc, &CLASSIC, &RenderOptions::default());
        assert_eq!(tree.section_ids(), vec![SectionId::Skills]);
    }

    #[test]
    fn test_ordered_rich_list_uses_decimal_marker() {
        let doc = job_with_rich("<ol><li>First</li><li>Second</li></ol>");
        let tree = render(&doc, &CLASSIC, &RenderOptions::default());
        let mut lists = Vec::new();
        find_lists(&tree.children, &mut lists);
        assert_eq!(lists, vec![(ListMarker::Decimal, 2)]);
    }

    #[test]
    fn test_unordered_rich_list_uses_disc_marker() {
        let doc = job_with_rich("<ul><li>A</li></ul>");
        let tree = render(&doc, &CLASSIC, &RenderOptions::default());
        let mut lists = Vec::new();
        find_lists(&tree.children, &mut lists);
        assert_eq!(lists, vec![(ListMarker::Disc, 1)]);
    }

    #[test]
    fn test_plain_bullets_when_no_rich_content() {
        let mut doc = jane_doe();
        doc.experience.push(Experience {
            title: "Engineer".to_string(),
            responsibilities: vec!["Did a thing".to_string()],
            ..Default::default()
        });
        let tree = render(&doc, &CLASSIC, &RenderOptions::default());
        let mut lists = Vec::new();
        find_lists(&tree.children, &mut lists);
        assert_eq!(lists, vec![(ListMarker::Disc, 1)]);
    }

    #[test]
    fn test_no_list_when_both_representations_empty() {
        let mut doc = jane_doe();
        doc.experience.push(Experience {
            title: "Engineer".to_string(),
            ..Default::default()
        });
        let tree = render(&doc, &CLASSIC, &RenderOptions::default());
        let mut lists = Vec::new();
        find_lists(&tree.children, &mut lists);
        assert!(lists.is_empty());
    }

    #[test]
    fn test_entry_order_preserved() {
        let mut doc = jane_doe();
        for company in ["Zeta", "Alpha", "Midway"] {
            doc.experience.push(Experience {
                title: "Role".to_string(),
                company: company.to_string(),
                ..Default::default()
            });
        }
        let tree = render(&doc, &CLASSIC, &RenderOptions::default());
        let json = format!("{:?}", tree);
        let zeta = json.find("Zeta").unwrap();
        let alpha = json.find("Alpha").unwrap();
        let midway = json.find("Midway").unwrap();
        assert!(zeta < alpha && alpha < midway, "no implicit sorting");
    }

    #[test]
    fn test_session_order_respected() {
        let mut doc = jane_doe();
        doc.skills = vec!["Rust".to_string()];
        doc.summary = "Hi".to_string();
        let mut order = SectionId::ALL.to_vec();
        order.reverse();
        let options = RenderOptions {
            section_order: Some(order),
            ..Default::default()
        };
        let tree = render(&doc, &CLASSIC, &options);
        assert_eq!(
            tree.section_ids(),
            vec![SectionId::Skills, SectionId::Summary]
        );
    }

    #[test]
    fn test_invalid_session_order_falls_back_to_theme() {
        let mut doc = jane_doe();
        doc.skills = vec!["Rust".to_string()];
        doc.summary = "Hi".to_string();
        let options = RenderOptions {
            section_order: Some(vec![SectionId::Skills, SectionId::Skills]),
            ..Default::default()
        };
        let tree = render(&doc, &CLASSIC, &options);
        assert_eq!(
            tree.section_ids(),
            vec![SectionId::Summary, SectionId::Skills]
        );
    }

    #[test]
    fn test_two_column_theme_partitions_sidebar() {
        let mut doc = jane_doe();
        doc.skills = vec!["Rust".to_string()];
        doc.summary = "Hi".to_string();
        let tree = render(&doc, &MODERN, &RenderOptions::default());
        let columns = tree
            .children
            .iter()
            .find_map(|node| match node {
                Node::Columns { sidebar, main } => Some((sidebar.clone(), main.clone())),
                _ => None,
            })
            .expect("modern renders columns");
        let sidebar_ids: Vec<_> = VisualTree {
            template: String::new(),
            font_family: String::new(),
            children: columns.0,
        }
        .section_ids();
        assert_eq!(sidebar_ids, vec![SectionId::Skills]);
    }

    #[test]
    fn test_font_override_beats_theme_default() {
        let tree = render(
            &jane_doe(),
            &CLASSIC,
            &RenderOptions {
                font_family: Some("Roboto, sans-serif".to_string()),
                ..Default::default()
            },
        );
        assert_eq!(tree.font_family, "Roboto, sans-serif");
        let default_tree = render(&jane_doe(), &CLASSIC, &RenderOptions::default());
        assert_eq!(default_tree.font_family, "Georgia, serif");
    }

    #[test]
    fn test_sample_fallback_only_when_requested() {
        let doc = jane_doe();
        let plain = render(&doc, &SOFTWARE_DEVELOPER, &RenderOptions::default());
        assert!(plain.section_ids().is_empty(), "no silent sample data");

        let sampled = render(
            &doc,
            &SOFTWARE_DEVELOPER,
            &RenderOptions {
                sample_fallback: true,
                ..Default::default()
            },
        );
        assert_eq!(sampled.section_ids().len(), 8);
    }
}
