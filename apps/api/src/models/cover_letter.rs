//! Cover letter payload, mirroring the editor's flat form fields.

use serde::{Deserialize, Serialize};

/// One cover letter's content. Saved through the same `{ template_id, data }`
/// envelope as resumes, on the `cover-letters` collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoverLetter {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub company_name: String,
    pub position_title: String,
    pub hiring_manager: String,
    /// Free-form display date, e.g. "August 28, 2026". The editor fills it
    /// in; this service never interprets it.
    pub date: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_default_empty() {
        let letter: CoverLetter =
            serde_json::from_str(r#"{"full_name":"Jane Doe","company_name":"Acme"}"#).unwrap();
        assert_eq!(letter.full_name, "Jane Doe");
        assert_eq!(letter.company_name, "Acme");
        assert!(letter.hiring_manager.is_empty());
        assert!(letter.content.is_empty());
    }
}
