//! Submit-time document validation.
//!
//! Editing is permissive: any field may be blank or half-finished while the
//! user works. These checks run only when the document leaves the session
//! (save), and block the save instead of silently persisting junk.

use crate::errors::FieldError;
use crate::models::resume::ResumeDocument;

/// Checks a document before it is saved. Empty result means valid.
pub fn validate_document(document: &ResumeDocument) -> Vec<FieldError> {
    let mut errors = Vec::new();

    if document.personal.first_name.trim().is_empty() {
        errors.push(FieldError::new("personal.firstName", "First name is required"));
    }
    if document.personal.last_name.trim().is_empty() {
        errors.push(FieldError::new("personal.lastName", "Last name is required"));
    }

    let email = document.personal.email.trim();
    if !email.is_empty() && !email_is_plausible(email) {
        errors.push(FieldError::new(
            "personal.email",
            "Email address is not valid",
        ));
    }

    errors
}

/// Shallow shape check: one `@`, non-empty local part, and a dot somewhere
/// after it. Deliverability is not this service's problem.
fn email_is_plausible(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty() && domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalDetails;

    fn make_valid_document() -> ResumeDocument {
        ResumeDocument {
            personal: PersonalDetails {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: "jane@example.com".to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(validate_document(&make_valid_document()).is_empty());
    }

    #[test]
    fn test_missing_names_are_reported_per_field() {
        let errors = validate_document(&ResumeDocument::default());
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"personal.firstName"));
        assert!(fields.contains(&"personal.lastName"));
    }

    #[test]
    fn test_empty_email_is_allowed() {
        let mut doc = make_valid_document();
        doc.personal.email = String::new();
        assert!(validate_document(&doc).is_empty());
    }

    #[test]
    fn test_malformed_email_is_rejected() {
        let mut doc = make_valid_document();
        for bad in ["no-at-sign", "@example.com", "jane@nodot", "jane@.com"] {
            doc.personal.email = bad.to_string();
            let errors = validate_document(&doc);
            assert_eq!(errors.len(), 1, "{bad} should fail");
            assert_eq!(errors[0].field, "personal.email");
        }
    }
}
