//! Save/load envelope for the external persistence API.
//!
//! The backend keys templates by integer, the editor by string. Both ids
//! travel in the envelope: `template_id` at the top level for the backend,
//! and `template` (plus `fontFamily`) folded into `data` next to the
//! document fields so a reloaded resume restores its selection state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::resume::ResumeDocument;

/// The `data` member of the envelope: the document plus the session's
/// template selection state as sibling fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ResumePayload {
    #[serde(flatten)]
    pub document: ResumeDocument,
    pub template: String,
    pub font_family: String,
}

/// Request body for `POST/PUT /api/resumes[/:id]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveEnvelope {
    pub template_id: i64,
    pub data: ResumePayload,
}

/// A stored resume as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeRecord {
    pub id: i64,
    pub template_id: i64,
    pub data: ResumePayload,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for `POST/PUT /api/cover-letters[/:id]`. The backend reuses
/// the resume envelope shape; cover letters have a single template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverLetterEnvelope {
    pub template_id: i64,
    pub data: crate::models::cover_letter::CoverLetter,
}

/// A stored cover letter as the backend returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetterRecord {
    pub id: i64,
    pub template_id: i64,
    pub data: crate::models::cover_letter::CoverLetter,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalDetails;

    #[test]
    fn test_envelope_wire_shape() {
        let envelope = SaveEnvelope {
            template_id: 2,
            data: ResumePayload {
                document: ResumeDocument {
                    personal: PersonalDetails {
                        first_name: "Jane".to_string(),
                        last_name: "Doe".to_string(),
                        ..Default::default()
                    },
                    ..Default::default()
                },
                template: "modern".to_string(),
                font_family: "Georgia, serif".to_string(),
            },
        };
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["template_id"], 2);
        // Selection state sits flat inside `data`, next to the document.
        assert_eq!(value["data"]["template"], "modern");
        assert_eq!(value["data"]["fontFamily"], "Georgia, serif");
        assert_eq!(value["data"]["personal"]["firstName"], "Jane");
    }

    #[test]
    fn test_envelope_round_trip() {
        let envelope = SaveEnvelope {
            template_id: 1,
            data: ResumePayload {
                template: "classic".to_string(),
                font_family: "Georgia, serif".to_string(),
                ..Default::default()
            },
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let back: SaveEnvelope = serde_json::from_str(&json).unwrap();
        assert_eq!(back, envelope);
    }
}
