//! Minimal tag scanner for the rich-text HTML subset.
//!
//! This is not a general HTML parser. Fragments come from a contentEditable
//! widget that only ever produces list/emphasis markup, so a flat token
//! stream (text runs and tags) is enough for both sanitization and block
//! parsing. Anything that does not scan as a tag falls through as text.

/// One lexical unit of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// A text run. Entities are left encoded; callers decode when needed.
    Text(&'a str),
    /// An opening (or void, e.g. `<br>`/`<br/>`) tag. `name` is lowercased;
    /// `raw` is the original source including brackets and attributes.
    Open { name: String, raw: &'a str },
    /// A closing tag.
    Close { name: String, raw: &'a str },
}

/// Splits a fragment into text runs and tags.
///
/// A `<` that is not followed by a letter, `/`, or `!` is treated as text,
/// as is a tag with no terminating `>`.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = input.as_bytes();
    let mut pos = 0;
    let mut text_start = 0;

    while pos < bytes.len() {
        if bytes[pos] != b'<' {
            pos += 1;
            continue;
        }
        let tag_like = matches!(
            bytes.get(pos + 1),
            Some(b) if b.is_ascii_alphabetic() || *b == b'/' || *b == b'!'
        );
        if !tag_like {
            pos += 1;
            continue;
        }
        let Some(end_offset) = input[pos..].find('>') else {
            // Unterminated tag: the rest of the input is text.
            break;
        };
        if text_start < pos {
            tokens.push(Token::Text(&input[text_start..pos]));
        }
        let raw = &input[pos..pos + end_offset + 1];
        tokens.push(parse_tag(raw));
        pos += end_offset + 1;
        text_start = pos;
    }
    if text_start < input.len() {
        tokens.push(Token::Text(&input[text_start..]));
    }
    tokens
}

fn parse_tag(raw: &str) -> Token<'_> {
    let inner = &raw[1..raw.len() - 1];
    let (closing, rest) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name: String = rest
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();
    if closing {
        Token::Close { name, raw }
    } else {
        Token::Open { name, raw }
    }
}

/// Decodes the handful of entities the editing widget produces.
///
/// Unknown entities are passed through verbatim rather than dropped.
pub fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        match tail.find(';') {
            Some(semi) if semi <= 8 => {
                let entity = &tail[1..semi];
                match entity {
                    "amp" => out.push('&'),
                    "lt" => out.push('<'),
                    "gt" => out.push('>'),
                    "quot" => out.push('"'),
                    "apos" => out.push('\''),
                    "nbsp" => out.push(' '),
                    _ => {
                        if let Some(code) = parse_numeric_entity(entity) {
                            out.push(code);
                        } else {
                            out.push_str(&tail[..semi + 1]);
                        }
                    }
                }
                rest = &tail[semi + 1..];
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn parse_numeric_entity(entity: &str) -> Option<char> {
    let digits = entity.strip_prefix('#')?;
    let code = match digits.strip_prefix(['x', 'X']) {
        Some(hex) => u32::from_str_radix(hex, 16).ok()?,
        None => digits.parse::<u32>().ok()?,
    };
    char::from_u32(code)
}

/// Escapes text for inclusion in serialized HTML output.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
