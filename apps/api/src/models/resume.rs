//! Normalized resume data model consumed by every theme.
//!
//! Wire names are camelCase to match the editing frontend. Every list
//! section deserializes to an empty `Vec` when absent, so renderers can
//! check `len()` unconditionally. Entries carry no ids — position in the
//! parent sequence is the only identity, and reordering happens by index.

use serde::{Deserialize, Serialize};

use crate::richtext::RichTextFragment;

/// Contact block rendered unconditionally by every theme.
///
/// `first_name`/`last_name` are required for a non-empty identity; the rest
/// are optional and rendered independently. The frontend sends empty strings
/// rather than omitting fields, so "absent" means empty-after-trim here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalDetails {
    pub first_name: String,
    pub last_name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub website: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub start_date: String,
    pub end_date: String,
    /// Plain-text projection of the bullet list. Derived from
    /// `responsibilities_rich` whenever rich content exists — never edited
    /// independently in that case.
    pub responsibilities: Vec<String>,
    /// Authoritative rich content when present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub responsibilities_rich: Option<RichTextFragment>,
}

impl Experience {
    /// True when the rich fragment is present and has visible content.
    pub fn has_rich_content(&self) -> bool {
        self.responsibilities_rich
            .as_ref()
            .is_some_and(|f| !f.is_blank())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub year: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Project {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Language proficiency scale used by the editor's select widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proficiency {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Fluent,
    Native,
}

impl Proficiency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Proficiency::Beginner => "Beginner",
            Proficiency::Intermediate => "Intermediate",
            Proficiency::Advanced => "Advanced",
            Proficiency::Fluent => "Fluent",
            Proficiency::Native => "Native",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Language {
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Reference {
    pub name: String,
    pub company: String,
    pub title: String,
    pub phone: String,
    pub email: String,
}

/// Identifier for one reorderable document section.
///
/// The personal header is not listed — it is not a section and always
/// renders first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Summary,
    Experience,
    Education,
    Skills,
    Projects,
    Achievements,
    Languages,
    References,
}

impl SectionId {
    /// Every section, in the default display order.
    pub const ALL: [SectionId; 8] = [
        SectionId::Summary,
        SectionId::Experience,
        SectionId::Education,
        SectionId::Skills,
        SectionId::Projects,
        SectionId::Achievements,
        SectionId::Languages,
        SectionId::References,
    ];
}

/// Root aggregate owned by a single editing session.
///
/// Created empty (or seeded from a fetched saved resume) when a session
/// starts, mutated only through binder operations, and discarded when the
/// session ends. Never shared across sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumeDocument {
    pub personal: PersonalDetails,
    pub summary: String,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub achievements: Vec<String>,
    pub languages: Vec<Language>,
    pub references: Vec<Reference>,
}

impl ResumeDocument {
    /// Whether a section has nothing to render. Drives the "absent heading,
    /// not empty heading" contract and the opt-in sample merge.
    pub fn section_is_empty(&self, id: SectionId) -> bool {
        match id {
            SectionId::Summary => self.summary.trim().is_empty(),
            SectionId::Experience => self.experience.is_empty(),
            SectionId::Education => self.education.is_empty(),
            SectionId::Skills => self.skills.is_empty(),
            SectionId::Projects => self.projects.is_empty(),
            SectionId::Achievements => self.achievements.is_empty(),
            SectionId::Languages => self.languages.is_empty(),
            SectionId::References => self.references.is_empty(),
        }
    }
}
