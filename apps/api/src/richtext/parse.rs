//! Block parser: token stream → list/paragraph structure.
//!
//! The renderer consumes this structure instead of re-scanning markup in
//! every theme. Markup outside the allowed subset (possible in documents
//! saved before sanitization existed) is tolerated by emitting the raw tag
//! as literal text — it renders verbatim and can never execute.

use crate::richtext::scanner::{decode_entities, tokenize, Token};

/// Inline content of a list item or paragraph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichInline {
    Text(String),
    Bold(Vec<RichInline>),
    Italic(Vec<RichInline>),
    Break,
}

/// A top-level block of a fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RichBlock {
    /// `<ul>` (unordered) or `<ol>` (ordered) with one entry per `<li>`.
    List {
        ordered: bool,
        items: Vec<Vec<RichInline>>,
    },
    /// Bare text outside any list.
    Paragraph(Vec<RichInline>),
}

/// Collects the visible text of an inline run, with breaks as spaces.
pub fn inline_text(inlines: &[RichInline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            RichInline::Text(text) => out.push_str(text),
            RichInline::Bold(inner) | RichInline::Italic(inner) => {
                out.push_str(&inline_text(inner));
            }
            RichInline::Break => out.push(' '),
        }
    }
    out
}

/// One inline accumulator with an emphasis stack.
struct InlineBuilder {
    /// Bottom frame is the run itself; frames above are open `<b>`/`<i>`.
    stack: Vec<(Option<Emphasis>, Vec<RichInline>)>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Emphasis {
    Bold,
    Italic,
}

impl InlineBuilder {
    fn new() -> Self {
        InlineBuilder {
            stack: vec![(None, Vec::new())],
        }
    }

    fn push(&mut self, inline: RichInline) {
        // Stack always holds at least the bottom frame.
        if let Some((_, run)) = self.stack.last_mut() {
            run.push(inline);
        }
    }

    fn open(&mut self, emphasis: Emphasis) {
        self.stack.push((Some(emphasis), Vec::new()));
    }

    fn close(&mut self, emphasis: Emphasis) {
        // Mismatched closes are ignored; only a matching open frame pops.
        if matches!(self.stack.last(), Some((Some(open), _)) if *open == emphasis) {
            let (_, run) = self.stack.pop().unwrap_or((None, Vec::new()));
            self.push(wrap(emphasis, run));
        }
    }

    fn finish(mut self) -> Vec<RichInline> {
        // Unclosed emphasis still wraps what it collected.
        while self.stack.len() > 1 {
            let (emphasis, run) = self.stack.pop().unwrap_or((None, Vec::new()));
            if let Some(emphasis) = emphasis {
                self.push(wrap(emphasis, run));
            }
        }
        self.stack.pop().map(|(_, run)| run).unwrap_or_default()
    }

    fn is_empty(&self) -> bool {
        self.stack.len() == 1 && self.stack[0].1.is_empty()
    }
}

fn wrap(emphasis: Emphasis, run: Vec<RichInline>) -> RichInline {
    match emphasis {
        Emphasis::Bold => RichInline::Bold(run),
        Emphasis::Italic => RichInline::Italic(run),
    }
}

fn emphasis_for(name: &str) -> Option<Emphasis> {
    match name {
        "b" | "strong" => Some(Emphasis::Bold),
        "i" | "em" => Some(Emphasis::Italic),
        _ => None,
    }
}

/// Parses a fragment into blocks. Never fails; garbage degrades to text.
pub fn parse_blocks(fragment: &str) -> Vec<RichBlock> {
    let mut blocks: Vec<RichBlock> = Vec::new();
    let mut para = InlineBuilder::new();

    // Current list context, if any: (ordered, finished items, current item).
    let mut list: Option<(bool, Vec<Vec<RichInline>>, Option<InlineBuilder>)> = None;

    let flush_para = |blocks: &mut Vec<RichBlock>, para: &mut InlineBuilder| {
        if !para.is_empty() {
            let done = std::mem::replace(para, InlineBuilder::new());
            blocks.push(RichBlock::Paragraph(done.finish()));
        }
    };

    for token in tokenize(fragment) {
        let builder = match &mut list {
            Some((_, _, Some(item))) => item,
            Some(_) => {
                // Inside a list but outside any <li>: whitespace between
                // items is dropped, other content degrades below.
                match &token {
                    Token::Text(text) if text.trim().is_empty() => continue,
                    _ => {}
                }
                &mut para
            }
            None => &mut para,
        };

        match token {
            Token::Text(text) => builder.push(RichInline::Text(decode_entities(text))),
            Token::Open { name, raw } => match name.as_str() {
                "ul" | "ol" => {
                    if list.is_none() {
                        flush_para(&mut blocks, &mut para);
                        list = Some((name == "ol", Vec::new(), None));
                    }
                    // Nested lists flatten into the enclosing one.
                }
                "li" => match &mut list {
                    Some((_, items, current)) => {
                        if let Some(open) = current.take() {
                            items.push(open.finish());
                        }
                        *current = Some(InlineBuilder::new());
                    }
                    // An <li> with no enclosing list starts an implicit one.
                    None => {
                        flush_para(&mut blocks, &mut para);
                        list = Some((false, Vec::new(), Some(InlineBuilder::new())));
                    }
                },
                "br" => builder.push(RichInline::Break),
                _ => {
                    if let Some(emphasis) = emphasis_for(&name) {
                        builder.open(emphasis);
                    } else {
                        // Out-of-subset markup renders verbatim.
                        builder.push(RichInline::Text(raw.to_string()));
                    }
                }
            },
            Token::Close { name, raw } => match name.as_str() {
                "ul" | "ol" => match list.take() {
                    Some((ordered, mut items, current)) => {
                        if let Some(open) = current {
                            items.push(open.finish());
                        }
                        blocks.push(RichBlock::List { ordered, items });
                    }
                    // no open list, so the active run is the paragraph
                    None => para.push(RichInline::Text(raw.to_string())),
                },
                "li" => {
                    if let Some((_, items, current)) = &mut list {
                        if let Some(open) = current.take() {
                            items.push(open.finish());
                        }
                    }
                }
                "br" => {}
                _ => {
                    if let Some(emphasis) = emphasis_for(&name) {
                        builder.close(emphasis);
                    } else {
                        builder.push(RichInline::Text(raw.to_string()));
                    }
                }
            },
        }
    }

    // Unterminated list: emit what was collected.
    if let Some((ordered, mut items, current)) = list.take() {
        if let Some(open) = current {
            items.push(open.finish());
        }
        blocks.push(RichBlock::List { ordered, items });
    }
    flush_para(&mut blocks, &mut para);
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> RichInline {
        RichInline::Text(s.to_string())
    }

    #[test]
    fn test_unordered_list() {
        let blocks = parse_blocks("<ul><li>A</li><li>B</li></ul>");
        assert_eq!(
            blocks,
            vec![RichBlock::List {
                ordered: false,
                items: vec![vec![text("A")], vec![text("B")]],
            }]
        );
    }

    #[test]
    fn test_ordered_list() {
        let blocks = parse_blocks("<ol><li>First</li></ol>");
        assert!(matches!(&blocks[0], RichBlock::List { ordered: true, .. }));
    }

    #[test]
    fn test_bare_text_is_paragraph() {
        let blocks = parse_blocks("just a line");
        assert_eq!(blocks, vec![RichBlock::Paragraph(vec![text("just a line")])]);
    }

    #[test]
    fn test_emphasis_nesting() {
        let blocks = parse_blocks("<ul><li><b>bold <i>both</i></b></li></ul>");
        let RichBlock::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(
            items[0],
            vec![RichInline::Bold(vec![
                text("bold "),
                RichInline::Italic(vec![text("both")]),
            ])]
        );
    }

    #[test]
    fn test_break_inside_item() {
        let blocks = parse_blocks("<ul><li>one<br>two</li></ul>");
        let RichBlock::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items[0], vec![text("one"), RichInline::Break, text("two")]);
    }

    #[test]
    fn test_li_without_list_starts_implicit_unordered() {
        let blocks = parse_blocks("<li>stray</li>");
        assert_eq!(
            blocks,
            vec![RichBlock::List {
                ordered: false,
                items: vec![vec![text("stray")]],
            }]
        );
    }

    #[test]
    fn test_unknown_tag_renders_verbatim() {
        let blocks = parse_blocks("<marquee>hi</marquee>");
        assert_eq!(
            blocks,
            vec![RichBlock::Paragraph(vec![
                text("<marquee>"),
                text("hi"),
                text("</marquee>"),
            ])]
        );
    }

    #[test]
    fn test_stray_list_close_stays_in_paragraph() {
        let blocks = parse_blocks("before</ul>after");
        assert_eq!(
            blocks,
            vec![RichBlock::Paragraph(vec![
                text("before"),
                text("</ul>"),
                text("after"),
            ])]
        );
    }

    #[test]
    fn test_unclosed_list_still_yields_items() {
        let blocks = parse_blocks("<ul><li>A</li><li>B");
        let RichBlock::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_entities_decoded_in_text() {
        let blocks = parse_blocks("<ul><li>A &amp; B</li></ul>");
        let RichBlock::List { items, .. } = &blocks[0] else {
            panic!("expected list");
        };
        assert_eq!(items[0], vec![text("A & B")]);
    }

    #[test]
    fn test_inline_text_flattens_emphasis_and_breaks() {
        let run = vec![
            RichInline::Bold(vec![text("A")]),
            RichInline::Break,
            text("B"),
        ];
        assert_eq!(inline_text(&run), "A B");
    }
}
