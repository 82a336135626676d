//! Rich-text responsibilities sub-format.
//!
//! An experience entry's bullet list can carry formatting as a restricted
//! HTML fragment (`ul`/`ol`/`li`, bold/italic, line breaks). The fragment is
//! the authoritative representation; a plain-text projection is derived
//! from it for consumers that cannot interpret markup. Derivation is
//! one-directional and idempotent — the plain array is never edited while
//! rich content exists.

pub mod parse;
pub mod sanitize;
pub mod scanner;

use serde::{Deserialize, Serialize};

use crate::richtext::parse::{inline_text, parse_blocks, RichBlock};

/// A sanitized HTML fragment restricted to the list/emphasis subset.
///
/// Construct through [`RichTextFragment::sanitize`] at the editing boundary.
/// Deserialization keeps stored content as-is; the renderer tolerates
/// out-of-subset markup by showing it verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RichTextFragment(String);

impl RichTextFragment {
    /// Accepts raw widget output, stripping everything outside the
    /// allow-list (tags, attributes, script/style content).
    pub fn sanitize(raw: &str) -> Self {
        RichTextFragment(sanitize::sanitize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the fragment has no visible text at all.
    pub fn is_blank(&self) -> bool {
        self.derive_plain().is_empty()
    }

    /// Structured view consumed by the renderer.
    pub fn blocks(&self) -> Vec<RichBlock> {
        parse_blocks(&self.0)
    }

    /// Derives the plain-text projection: one entry per `<li>` when the
    /// fragment is a list, otherwise a single entry of the whole text.
    /// Entries are trimmed; empty entries are dropped.
    pub fn derive_plain(&self) -> Vec<String> {
        let blocks = self.blocks();
        let has_list = blocks.iter().any(|b| matches!(b, RichBlock::List { .. }));

        let mut entries = Vec::new();
        if has_list {
            for block in &blocks {
                match block {
                    RichBlock::List { items, .. } => {
                        entries.extend(items.iter().map(|item| inline_text(item)));
                    }
                    RichBlock::Paragraph(run) => entries.push(inline_text(run)),
                }
            }
        } else {
            let joined = blocks
                .iter()
                .filter_map(|block| match block {
                    RichBlock::Paragraph(run) => Some(inline_text(run)),
                    RichBlock::List { .. } => None,
                })
                .collect::<Vec<_>>()
                .join(" ");
            entries.push(joined);
        }

        entries
            .into_iter()
            .map(|entry| entry.trim().to_string())
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}
