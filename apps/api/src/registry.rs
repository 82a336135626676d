//! Template registry: the single place the editor's string template ids,
//! the backend's integer template ids, and the theme presets meet.
//!
//! Unknown ids are a lookup miss, never a renderer failure — callers fall
//! back to the default template instead of surfacing an error to the user.

use serde::Serialize;

use crate::render::theme::{Theme, CLASSIC, CREATIVE, EXECUTIVE, MODERN, SOFTWARE_DEVELOPER};

/// Template id used when resolution fails or nothing was selected.
pub const DEFAULT_TEMPLATE_ID: &str = "classic";

/// One registry row: editor id, persistence id, and the visual identity.
#[derive(Debug, Clone, Copy)]
pub struct TemplateEntry {
    pub id: &'static str,
    pub display_name: &'static str,
    /// The integer the external persistence API keys this template by.
    pub backend_id: i64,
    pub theme: &'static Theme,
}

static TEMPLATES: [TemplateEntry; 5] = [
    TemplateEntry {
        id: "classic",
        display_name: "Classic",
        backend_id: 1,
        theme: &CLASSIC,
    },
    TemplateEntry {
        id: "modern",
        display_name: "Modern",
        backend_id: 2,
        theme: &MODERN,
    },
    TemplateEntry {
        id: "executive",
        display_name: "Executive",
        backend_id: 3,
        theme: &EXECUTIVE,
    },
    TemplateEntry {
        id: "creative",
        display_name: "Creative",
        backend_id: 4,
        theme: &CREATIVE,
    },
    TemplateEntry {
        id: "software-developer",
        display_name: "Software Developer",
        backend_id: 5,
        theme: &SOFTWARE_DEVELOPER,
    },
];

/// Looks up a template by editor id. `None` is the NotFound signal.
pub fn resolve(id: &str) -> Option<&'static TemplateEntry> {
    TEMPLATES.iter().find(|entry| entry.id == id)
}

/// Resolution with the graceful-degradation contract applied: unknown ids
/// land on the default template.
pub fn resolve_or_default(id: &str) -> &'static TemplateEntry {
    resolve(id).unwrap_or_else(|| {
        tracing::debug!(template_id = id, "unknown template id, using default");
        resolve(DEFAULT_TEMPLATE_ID).unwrap_or(&TEMPLATES[0])
    })
}

/// Metadata row for template selection UI.
#[derive(Debug, Clone, Serialize)]
pub struct TemplateSummary {
    pub id: &'static str,
    pub display_name: &'static str,
}

/// All templates, in catalog order.
pub fn list() -> Vec<TemplateSummary> {
    TEMPLATES
        .iter()
        .map(|entry| TemplateSummary {
            id: entry.id,
            display_name: entry.display_name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_ids() {
        for (id, backend_id) in [
            ("classic", 1),
            ("modern", 2),
            ("executive", 3),
            ("creative", 4),
            ("software-developer", 5),
        ] {
            let entry = resolve(id).unwrap();
            assert_eq!(entry.backend_id, backend_id);
            assert_eq!(entry.theme.id, id);
        }
    }

    #[test]
    fn test_resolve_unknown_is_not_found() {
        assert!(resolve("nonexistent").is_none());
    }

    #[test]
    fn test_unknown_id_falls_back_to_classic() {
        let entry = resolve_or_default("nonexistent");
        assert_eq!(entry.id, DEFAULT_TEMPLATE_ID);
    }

    #[test]
    fn test_list_is_ordered_and_complete() {
        let ids: Vec<_> = list().into_iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec!["classic", "modern", "executive", "creative", "software-developer"]
        );
    }

    #[test]
    fn test_backend_ids_are_unique() {
        let mut ids: Vec<_> = TEMPLATES.iter().map(|t| t.backend_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), TEMPLATES.len());
    }
}
