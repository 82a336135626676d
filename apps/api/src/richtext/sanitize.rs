//! Allow-list sanitizer for editor-produced fragments.
//!
//! Runs once, at the binder boundary, before a fragment is accepted into
//! the document. Disallowed markup is stripped, not escaped: the tag is
//! removed and its text content kept, except `<script>`/`<style>` whose
//! content is dropped wholesale. Attributes never survive — allowed tags
//! are re-emitted in normalized form (`<ul>`, `</li>`, `<br>`).

use crate::richtext::scanner::{tokenize, Token};

const ALLOWED_TAGS: &[&str] = &["ul", "ol", "li", "b", "i", "strong", "em", "br"];

/// Tags whose entire content is dangerous, not just the tag itself.
const DROP_CONTENT_TAGS: &[&str] = &["script", "style"];

fn is_allowed(name: &str) -> bool {
    ALLOWED_TAGS.contains(&name)
}

/// Reduces a raw fragment to the allow-listed subset.
pub fn sanitize(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut dropping: Option<String> = None;

    for token in tokenize(raw) {
        match token {
            Token::Text(text) => {
                if dropping.is_none() {
                    out.push_str(text);
                }
            }
            Token::Open { name, .. } => {
                if dropping.is_some() {
                    continue;
                }
                if DROP_CONTENT_TAGS.contains(&name.as_str()) {
                    dropping = Some(name);
                } else if is_allowed(&name) {
                    out.push('<');
                    out.push_str(&name);
                    out.push('>');
                }
                // Disallowed non-container tag: dropped, content kept.
            }
            Token::Close { name, .. } => {
                if let Some(open) = &dropping {
                    if *open == name {
                        dropping = None;
                    }
                    continue;
                }
                if is_allowed(&name) && name != "br" {
                    out.push_str("</");
                    out.push_str(&name);
                    out.push('>');
                }
            }
        }
    }
    out
}
