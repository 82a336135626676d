//! Edit session state and the binder operations that mutate it.
//!
//! A session owns one `ResumeDocument` plus its presentation state (template
//! selection, font, section order, collapsed panels). All mutation flows
//! through `EditSession::apply`, one typed operation at a time, so every
//! change obeys the same rules: entries are addressed by index, invalid
//! targets are ignored rather than erroring, and the plain-text projection
//! of rich bullets is never writable while rich content exists.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::models::envelope::{ResumePayload, ResumeRecord, SaveEnvelope};
use crate::models::resume::{
    Education, Experience, Language, Proficiency, Project, Reference, ResumeDocument, SectionId,
};
use crate::registry;
use crate::render::RenderOptions;
use crate::richtext::RichTextFragment;

/// Personal-details field addressed by an `UpdatePersonal` operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    FirstName,
    LastName,
    Title,
    Email,
    Phone,
    Website,
}

/// One document mutation, as posted to the session ops endpoint.
///
/// Operations target entries by index because entries carry no ids. An index
/// that no longer exists (the entry was removed by an earlier op) makes the
/// operation a no-op, never an error.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum BinderOp {
    /// Append a blank entry with section-appropriate defaults.
    AddEntry { section: SectionId },
    /// Remove the entry at `index`. Out of bounds is a no-op.
    RemoveEntry { section: SectionId, index: usize },
    UpdatePersonal { field: PersonalField, value: String },
    UpdateSummary { value: String },
    /// Set one scalar field of one entry, addressed by its wire name
    /// (e.g. `"startDate"`). Unknown fields are ignored.
    UpdateField {
        section: SectionId,
        index: usize,
        field: String,
        value: String,
    },
    /// Replace a string-list section (skills, achievements) from one
    /// comma-separated input line.
    SetCommaList { section: SectionId, value: String },
    /// Replace the rich bullet content of one experience entry. The raw
    /// fragment is sanitized and the plain projection re-derived.
    SetRichResponsibilities { index: usize, html: String },
    /// Replace the plain bullet list of one experience entry. Ignored while
    /// the entry has rich content, which owns the plain projection.
    SetPlainResponsibilities { index: usize, entries: Vec<String> },
    /// Replace the section display order. The new order must be a
    /// permutation of all sections or the operation is ignored.
    ReorderSections { order: Vec<SectionId> },
    ToggleSection { section: SectionId },
    SelectTemplate { template: String },
    SetFont { font_family: String },
}

/// Splits a comma-separated input line into list entries.
/// Items are trimmed and empty items dropped, so "React,,  Node " is two.
pub fn parse_comma_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

/// One user's in-progress edit, server-held and keyed by `id`.
#[derive(Debug, Clone)]
pub struct EditSession {
    pub id: Uuid,
    pub document: ResumeDocument,
    /// Registry string id, always valid (unknown ids resolve to the default).
    pub template: String,
    pub font_family: String,
    /// Set once the user picks a font explicitly. Until then, switching
    /// templates follows the new theme's default font.
    font_customized: bool,
    pub section_order: Vec<SectionId>,
    pub collapsed: BTreeSet<SectionId>,
    /// Backend row id once the session has been saved at least once.
    pub resume_id: Option<i64>,
    next_save_seq: u64,
    last_applied_save: u64,
}

impl EditSession {
    pub fn new(template: Option<&str>, font_family: Option<String>) -> Self {
        let entry = registry::resolve_or_default(template.unwrap_or(registry::DEFAULT_TEMPLATE_ID));
        let font_customized = font_family.is_some();
        Self {
            id: Uuid::new_v4(),
            document: ResumeDocument::default(),
            template: entry.id.to_string(),
            font_family: font_family.unwrap_or_else(|| entry.theme.default_font.to_string()),
            font_customized,
            section_order: entry.theme.section_order.to_vec(),
            collapsed: BTreeSet::new(),
            resume_id: None,
            next_save_seq: 0,
            last_applied_save: 0,
        }
    }

    /// Seeds a session from a previously saved resume.
    pub fn from_record(record: &ResumeRecord) -> Self {
        let entry = registry::resolve_or_default(&record.data.template);
        let font_family = if record.data.font_family.trim().is_empty() {
            entry.theme.default_font.to_string()
        } else {
            record.data.font_family.clone()
        };
        Self {
            id: Uuid::new_v4(),
            document: record.data.document.clone(),
            template: entry.id.to_string(),
            font_customized: font_family != entry.theme.default_font,
            font_family,
            section_order: entry.theme.section_order.to_vec(),
            collapsed: BTreeSet::new(),
            resume_id: Some(record.id),
            next_save_seq: 0,
            last_applied_save: 0,
        }
    }

    pub fn theme(&self) -> &'static crate::render::Theme {
        registry::resolve_or_default(&self.template).theme
    }

    /// The `data` member of the save envelope.
    pub fn payload(&self) -> ResumePayload {
        ResumePayload {
            document: self.document.clone(),
            template: self.template.clone(),
            font_family: self.font_family.clone(),
        }
    }

    pub fn envelope(&self) -> SaveEnvelope {
        SaveEnvelope {
            template_id: registry::resolve_or_default(&self.template).backend_id,
            data: self.payload(),
        }
    }

    pub fn render_options(&self, sample_fallback: bool) -> RenderOptions {
        RenderOptions {
            font_family: Some(self.font_family.clone()),
            section_order: Some(self.section_order.clone()),
            sample_fallback,
        }
    }

    /// Allocates a sequence number for an outgoing save. The store lock is
    /// not held while the save is in flight, so the session stays editable.
    pub fn begin_save(&mut self) -> u64 {
        self.next_save_seq += 1;
        self.next_save_seq
    }

    /// Applies a completed save. Responses that arrive after a newer save
    /// already completed are stale and dropped.
    pub fn complete_save(&mut self, seq: u64, resume_id: i64) -> bool {
        if seq <= self.last_applied_save {
            debug!(
                "Dropping stale save response: seq {seq} <= {}",
                self.last_applied_save
            );
            return false;
        }
        self.last_applied_save = seq;
        self.resume_id = Some(resume_id);
        true
    }

    pub fn apply(&mut self, op: BinderOp) {
        match op {
            BinderOp::AddEntry { section } => self.add_entry(section),
            BinderOp::RemoveEntry { section, index } => self.remove_entry(section, index),
            BinderOp::UpdatePersonal { field, value } => {
                let personal = &mut self.document.personal;
                match field {
                    PersonalField::FirstName => personal.first_name = value,
                    PersonalField::LastName => personal.last_name = value,
                    PersonalField::Title => personal.title = value,
                    PersonalField::Email => personal.email = value,
                    PersonalField::Phone => personal.phone = value,
                    PersonalField::Website => personal.website = value,
                }
            }
            BinderOp::UpdateSummary { value } => self.document.summary = value,
            BinderOp::UpdateField {
                section,
                index,
                field,
                value,
            } => self.update_field(section, index, &field, value),
            BinderOp::SetCommaList { section, value } => match section {
                SectionId::Skills => self.document.skills = parse_comma_list(&value),
                SectionId::Achievements => self.document.achievements = parse_comma_list(&value),
                other => debug!("SetCommaList ignored for non-list section {other:?}"),
            },
            BinderOp::SetRichResponsibilities { index, html } => {
                if let Some(job) = self.document.experience.get_mut(index) {
                    let fragment = RichTextFragment::sanitize(&html);
                    job.responsibilities = fragment.derive_plain();
                    job.responsibilities_rich = if fragment.is_blank() {
                        None
                    } else {
                        Some(fragment)
                    };
                }
            }
            BinderOp::SetPlainResponsibilities { index, entries } => {
                if let Some(job) = self.document.experience.get_mut(index) {
                    if job.has_rich_content() {
                        debug!("Plain bullet edit ignored while rich content exists");
                    } else {
                        job.responsibilities = entries;
                    }
                }
            }
            BinderOp::ReorderSections { order } => {
                if is_permutation(&order) {
                    self.section_order = order;
                } else {
                    debug!("Reorder ignored: {order:?} is not a permutation of all sections");
                }
            }
            BinderOp::ToggleSection { section } => {
                if !self.collapsed.remove(&section) {
                    self.collapsed.insert(section);
                }
            }
            BinderOp::SelectTemplate { template } => {
                let entry = registry::resolve_or_default(&template);
                self.template = entry.id.to_string();
                if !self.font_customized {
                    self.font_family = entry.theme.default_font.to_string();
                }
            }
            BinderOp::SetFont { font_family } => {
                self.font_family = font_family;
                self.font_customized = true;
            }
        }
    }

    fn add_entry(&mut self, section: SectionId) {
        let doc = &mut self.document;
        match section {
            SectionId::Experience => doc.experience.push(Experience::default()),
            SectionId::Education => doc.education.push(Education::default()),
            SectionId::Skills => doc.skills.push(String::new()),
            SectionId::Projects => doc.projects.push(Project::default()),
            SectionId::Achievements => doc.achievements.push(String::new()),
            SectionId::Languages => doc.languages.push(Language::default()),
            SectionId::References => doc.references.push(Reference::default()),
            SectionId::Summary => debug!("AddEntry ignored: summary is not a list section"),
        }
    }

    fn remove_entry(&mut self, section: SectionId, index: usize) {
        let doc = &mut self.document;
        let len = match section {
            SectionId::Experience => doc.experience.len(),
            SectionId::Education => doc.education.len(),
            SectionId::Skills => doc.skills.len(),
            SectionId::Projects => doc.projects.len(),
            SectionId::Achievements => doc.achievements.len(),
            SectionId::Languages => doc.languages.len(),
            SectionId::References => doc.references.len(),
            SectionId::Summary => 0,
        };
        if index >= len {
            debug!("RemoveEntry ignored: {section:?}[{index}] does not exist");
            return;
        }
        match section {
            SectionId::Experience => {
                doc.experience.remove(index);
            }
            SectionId::Education => {
                doc.education.remove(index);
            }
            SectionId::Skills => {
                doc.skills.remove(index);
            }
            SectionId::Projects => {
                doc.projects.remove(index);
            }
            SectionId::Achievements => {
                doc.achievements.remove(index);
            }
            SectionId::Languages => {
                doc.languages.remove(index);
            }
            SectionId::References => {
                doc.references.remove(index);
            }
            SectionId::Summary => {}
        }
    }

    fn update_field(&mut self, section: SectionId, index: usize, field: &str, value: String) {
        let doc = &mut self.document;
        match section {
            SectionId::Experience => {
                if let Some(job) = doc.experience.get_mut(index) {
                    match field {
                        "title" => job.title = value,
                        "company" => job.company = value,
                        "startDate" => job.start_date = value,
                        "endDate" => job.end_date = value,
                        other => debug!("Unknown experience field {other:?} ignored"),
                    }
                }
            }
            SectionId::Education => {
                if let Some(entry) = doc.education.get_mut(index) {
                    match field {
                        "school" => entry.school = value,
                        "degree" => entry.degree = value,
                        "field" => entry.field = value,
                        "year" => entry.year = value,
                        other => debug!("Unknown education field {other:?} ignored"),
                    }
                }
            }
            SectionId::Skills => {
                if let Some(skill) = doc.skills.get_mut(index) {
                    if field == "value" {
                        *skill = value;
                    }
                }
            }
            SectionId::Projects => {
                if let Some(project) = doc.projects.get_mut(index) {
                    match field {
                        "name" => project.name = value,
                        "description" => project.description = value,
                        "url" => {
                            project.url = if value.trim().is_empty() {
                                None
                            } else {
                                Some(value)
                            };
                        }
                        other => debug!("Unknown project field {other:?} ignored"),
                    }
                }
            }
            SectionId::Achievements => {
                if let Some(item) = doc.achievements.get_mut(index) {
                    if field == "value" {
                        *item = value;
                    }
                }
            }
            SectionId::Languages => {
                if let Some(language) = doc.languages.get_mut(index) {
                    match field {
                        "name" => language.name = value,
                        "proficiency" => match parse_proficiency(&value) {
                            Some(level) => language.proficiency = level,
                            None => debug!("Unknown proficiency {value:?} ignored"),
                        },
                        other => debug!("Unknown language field {other:?} ignored"),
                    }
                }
            }
            SectionId::References => {
                if let Some(reference) = doc.references.get_mut(index) {
                    match field {
                        "name" => reference.name = value,
                        "company" => reference.company = value,
                        "title" => reference.title = value,
                        "phone" => reference.phone = value,
                        "email" => reference.email = value,
                        other => debug!("Unknown reference field {other:?} ignored"),
                    }
                }
            }
            SectionId::Summary => debug!("UpdateField ignored: summary has no entries"),
        }
    }
}

fn parse_proficiency(value: &str) -> Option<Proficiency> {
    match value {
        "Beginner" => Some(Proficiency::Beginner),
        "Intermediate" => Some(Proficiency::Intermediate),
        "Advanced" => Some(Proficiency::Advanced),
        "Fluent" => Some(Proficiency::Fluent),
        "Native" => Some(Proficiency::Native),
        _ => None,
    }
}

fn is_permutation(order: &[SectionId]) -> bool {
    if order.len() != SectionId::ALL.len() {
        return false;
    }
    let mut sorted = order.to_vec();
    sorted.sort();
    sorted.as_slice() == {
        let mut all = SectionId::ALL.to_vec();
        all.sort();
        all
    }
}
