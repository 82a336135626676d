pub mod cover_letter;
pub mod envelope;
pub mod resume;
