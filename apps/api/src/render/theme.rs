//! Static theme presets for the five templates.
//!
//! The five templates differ only in palette, typography, layout geometry,
//! section wording, and default section order — never in field semantics.
//! Each preset is a plain data table consumed by the single renderer and
//! the HTML serializer.

use crate::models::resume::SectionId;

/// Color palette, CSS color strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Headings and the name block.
    pub primary: &'static str,
    /// Section accents, links, rules.
    pub accent: &'static str,
    /// Dates, contact rows, secondary copy.
    pub muted: &'static str,
    /// Page background.
    pub background: &'static str,
    /// Skill chip background.
    pub chip_background: &'static str,
}

/// Typographic scale in points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeScale {
    pub name_pt: u8,
    pub section_pt: u8,
    pub entry_pt: u8,
    pub body_pt: u8,
}

/// Page geometry: one flowing column, or a sidebar split.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    SingleColumn,
    /// Sections listed here render in the sidebar, in document order;
    /// everything else flows in the main column.
    TwoColumn { sidebar: &'static [SectionId] },
}

/// One template's complete visual identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub id: &'static str,
    pub display_name: &'static str,
    pub default_font: &'static str,
    pub palette: Palette,
    pub scale: TypeScale,
    pub layout: Layout,
    pub uppercase_section_titles: bool,
    /// Render skills as chips rather than a plain list.
    pub skills_as_tags: bool,
    /// Default section order before any per-session reorder.
    pub section_order: [SectionId; 8],
}

impl Theme {
    /// Section heading wording for this theme.
    pub fn section_title(&self, id: SectionId) -> &'static str {
        // Wording tables per template family.
        match (self.id, id) {
            ("classic", SectionId::Summary) => "Professional Summary",
            ("classic", SectionId::Experience) => "Professional Experience",
            ("classic", SectionId::Skills) => "Core Skills",
            ("classic", SectionId::Projects) => "Notable Projects",
            ("executive", SectionId::Summary) => "Executive Summary",
            ("executive", SectionId::Experience) => "Leadership Experience",
            ("executive", SectionId::Skills) => "Core Competencies",
            ("executive", SectionId::Projects) => "Key Initiatives",
            ("software-developer", SectionId::Skills) => "Technical Skills",
            (_, SectionId::Summary) => "Summary",
            (_, SectionId::Experience) => "Experience",
            (_, SectionId::Education) => "Education",
            (_, SectionId::Skills) => "Skills",
            (_, SectionId::Projects) => "Projects",
            (_, SectionId::Achievements) => "Achievements",
            (_, SectionId::Languages) => "Languages",
            (_, SectionId::References) => "References",
        }
    }
}

const DEFAULT_ORDER: [SectionId; 8] = SectionId::ALL;

pub const CLASSIC: Theme = Theme {
    id: "classic",
    display_name: "Classic",
    default_font: "Georgia, serif",
    palette: Palette {
        primary: "#2c3e50",
        accent: "#34495e",
        muted: "#7f8c8d",
        background: "#ffffff",
        chip_background: "#ecf0f1",
    },
    scale: TypeScale {
        name_pt: 26,
        section_pt: 14,
        entry_pt: 12,
        body_pt: 11,
    },
    layout: Layout::SingleColumn,
    uppercase_section_titles: true,
    skills_as_tags: true,
    section_order: DEFAULT_ORDER,
};

pub const MODERN: Theme = Theme {
    id: "modern",
    display_name: "Modern",
    default_font: "Helvetica, Arial, sans-serif",
    palette: Palette {
        primary: "#2c3e50",
        accent: "#3498db",
        muted: "#7f8c8d",
        background: "#f9f9f9",
        chip_background: "#ecf0f1",
    },
    scale: TypeScale {
        name_pt: 28,
        section_pt: 14,
        entry_pt: 12,
        body_pt: 11,
    },
    layout: Layout::TwoColumn {
        sidebar: &[SectionId::Skills, SectionId::Education],
    },
    uppercase_section_titles: false,
    skills_as_tags: true,
    section_order: DEFAULT_ORDER,
};

pub const EXECUTIVE: Theme = Theme {
    id: "executive",
    display_name: "Executive",
    default_font: "Calibri, sans-serif",
    palette: Palette {
        primary: "#1a365d",
        accent: "#2d3748",
        muted: "#4a5568",
        background: "#ffffff",
        chip_background: "#e2e8f0",
    },
    scale: TypeScale {
        name_pt: 28,
        section_pt: 15,
        entry_pt: 12,
        body_pt: 11,
    },
    layout: Layout::SingleColumn,
    uppercase_section_titles: true,
    skills_as_tags: true,
    section_order: DEFAULT_ORDER,
};

pub const CREATIVE: Theme = Theme {
    id: "creative",
    display_name: "Creative",
    default_font: "Inter, sans-serif",
    palette: Palette {
        primary: "#2d3748",
        accent: "#8b5cf6",
        muted: "#718096",
        background: "#f0f4f8",
        chip_background: "#e2e8f0",
    },
    scale: TypeScale {
        name_pt: 26,
        section_pt: 13,
        entry_pt: 12,
        body_pt: 10,
    },
    layout: Layout::TwoColumn {
        sidebar: &[SectionId::Skills, SectionId::Languages, SectionId::Education],
    },
    uppercase_section_titles: true,
    skills_as_tags: true,
    section_order: DEFAULT_ORDER,
};

pub const SOFTWARE_DEVELOPER: Theme = Theme {
    id: "software-developer",
    display_name: "Software Developer",
    default_font: "Inter, sans-serif",
    palette: Palette {
        primary: "#2563eb",
        accent: "#1e40af",
        muted: "#64748b",
        background: "#f8fafc",
        chip_background: "#e2e8f0",
    },
    scale: TypeScale {
        name_pt: 26,
        section_pt: 14,
        entry_pt: 12,
        body_pt: 10,
    },
    layout: Layout::SingleColumn,
    uppercase_section_titles: false,
    skills_as_tags: true,
    section_order: DEFAULT_ORDER,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_theme_orders_all_sections() {
        for theme in [CLASSIC, MODERN, EXECUTIVE, CREATIVE, SOFTWARE_DEVELOPER] {
            let mut order = theme.section_order.to_vec();
            order.sort();
            order.dedup();
            assert_eq!(order.len(), 8, "{} must cover every section", theme.id);
        }
    }

    #[test]
    fn test_sidebar_sections_exist_in_order() {
        for theme in [MODERN, CREATIVE] {
            let Layout::TwoColumn { sidebar } = theme.layout else {
                panic!("{} should be two-column", theme.id);
            };
            for id in sidebar {
                assert!(theme.section_order.contains(id));
            }
        }
    }

    #[test]
    fn test_title_wording_varies_by_theme() {
        assert_eq!(
            CLASSIC.section_title(SectionId::Experience),
            "Professional Experience"
        );
        assert_eq!(
            EXECUTIVE.section_title(SectionId::Skills),
            "Core Competencies"
        );
        assert_eq!(MODERN.section_title(SectionId::Experience), "Experience");
        assert_eq!(
            SOFTWARE_DEVELOPER.section_title(SectionId::Skills),
            "Technical Skills"
        );
    }
}
