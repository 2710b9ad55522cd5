// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Markup parsing.
//!
//! Tag groups are written `<tag1,tag2,...>`, each tag being `[!|/]name[=value]`. Spaces inside
//! a group are ignored. A backslash emits the following character literally and carriage returns
//! are dropped.

use alloc::string::String;

use crate::style::{
    hex_color, named_color, EventKind, EventStore, Property, StyleEvent, StyleValue, ValueKind,
};

/// The plain text produced by parsing, and the style events anchored into it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Document {
    pub(crate) text: String,
    /// Length of `text` in characters.
    pub(crate) chars: usize,
    /// Number of characters of `text` that produce a glyph.
    pub(crate) displayable: usize,
    pub(crate) events: EventStore,
}

impl Document {
    pub(crate) fn clear(&mut self) {
        self.text.clear();
        self.chars = 0;
        self.displayable = 0;
        self.events.clear();
    }

    /// Parses `markup`, appending its text and events after the existing ones.
    pub(crate) fn parse(&mut self, markup: &str) {
        let mut rest = markup.chars();
        while let Some(c) = rest.next() {
            match c {
                '<' => {
                    let tail = rest.as_str();
                    let Some(end) = tail.find('>') else {
                        log::debug!(
                            "unterminated tag group at character {}, dropping the rest of the input",
                            self.chars
                        );
                        return;
                    };
                    self.parse_group(&tail[..end]);
                    rest = tail[end + 1..].chars();
                }
                '\r' => {}
                '\\' => match rest.next() {
                    Some('\r') => {}
                    Some(escaped) => self.push_char(escaped),
                    None => self.push_char('\\'),
                },
                c => self.push_char(c),
            }
        }
    }

    fn push_char(&mut self, c: char) {
        self.text.push(c);
        self.chars += 1;
        if !matches!(c, ' ' | '\n' | '\t') {
            self.displayable += 1;
        }
    }

    fn parse_group(&mut self, group: &str) {
        let group: String = group.chars().filter(|&c| c != ' ').collect();
        let mut id = None;
        for tag in group.split(',') {
            let (name, arg) = tag.split_once('=').unwrap_or((tag, ""));
            if name == "id" {
                match arg.parse::<i32>() {
                    Ok(value) => id = Some(value),
                    Err(_) => log::debug!("dropping tag `{tag}`: invalid id"),
                }
                continue;
            }
            let ender = name.len() > 1 && name.starts_with('/');
            let inactive = name.len() > 1 && name.starts_with('!');
            let key = if ender || inactive { &name[1..] } else { name };
            let Some(property) = Property::from_tag(key) else {
                if !tag.is_empty() {
                    log::debug!("ignoring unknown tag `{tag}`");
                }
                continue;
            };
            let kind = if ender {
                EventKind::Ender
            } else if inactive {
                // Placeholders keep a valid argument for when they get activated.
                EventKind::Starter {
                    value: parse_value(property.kind(), arg),
                    active: false,
                }
            } else {
                match parse_value(property.kind(), arg) {
                    Some(value) => EventKind::starter(value),
                    None => {
                        log::debug!("dropping tag `{tag}`: invalid argument");
                        continue;
                    }
                }
            };
            self.events.push(StyleEvent {
                property,
                kind,
                offset: self.chars,
                id,
            });
        }
    }
}

fn parse_value(kind: ValueKind, arg: &str) -> Option<StyleValue> {
    match kind {
        ValueKind::Flag => Some(StyleValue::Flag(arg != "0")),
        ValueKind::Number => arg.parse().ok().map(StyleValue::Number),
        ValueKind::Color => match arg.strip_prefix('#') {
            Some(digits) => hex_color(digits),
            None => named_color(arg),
        }
        .map(StyleValue::Color),
    }
}

#[cfg(test)]
mod tests {
    use super::Document;
    use crate::style::{EventKind, Property, StyleValue};
    use alloc::vec::Vec;
    use peniko::Color;

    fn parse(markup: &str) -> Document {
        let mut doc = Document::default();
        doc.parse(markup);
        doc
    }

    fn summary(doc: &Document) -> Vec<(Property, bool, usize, Option<i32>)> {
        doc.events
            .events()
            .iter()
            .map(|e| (e.property, e.kind == EventKind::Ender, e.offset, e.id))
            .collect()
    }

    #[test]
    fn plain_text_round_trips() {
        let doc = parse("Hello, world!\n\tBye");
        assert_eq!(doc.text, "Hello, world!\n\tBye");
        assert_eq!(doc.chars, 18);
        assert_eq!(doc.displayable, 15);
        assert!(doc.events.events().is_empty());
    }

    #[test]
    fn offsets_are_in_stripped_characters() {
        let doc = parse("A<b>B</b>C");
        assert_eq!(doc.text, "ABC");
        assert_eq!(
            summary(&doc),
            [(Property::Bold, false, 1, None), (Property::Bold, true, 2, None)]
        );
    }

    #[test]
    fn offsets_count_characters_not_bytes() {
        let doc = parse("été<u>x");
        assert_eq!(summary(&doc), [(Property::Underlined, false, 3, None)]);
    }

    #[test]
    fn unterminated_group_drops_the_rest() {
        let doc = parse("Hello <b");
        assert_eq!(doc.text, "Hello ");
        assert!(doc.events.events().is_empty());
    }

    #[test]
    fn escapes() {
        let doc = parse("Price: \\<b>not bold\\</b>");
        assert_eq!(doc.text, "Price: <b>not bold</b>");
        assert!(doc.events.events().is_empty());

        let doc = parse("a\\\\b\\");
        assert_eq!(doc.text, "a\\b\\");
    }

    #[test]
    fn carriage_returns_are_dropped() {
        let doc = parse("a\r\nb\\\r");
        assert_eq!(doc.text, "a\nb");
        assert_eq!(doc.chars, 3);
    }

    #[test]
    fn group_with_spaces_prefixes_and_arguments() {
        let doc = parse("<b = 0, !i, /u, c = #FF000080, ot=1.5, !c>x");
        let events = doc.events.events();
        assert_eq!(events.len(), 6);
        assert_eq!(events[0].kind, EventKind::starter(StyleValue::Flag(false)));
        assert_eq!(
            events[1].kind,
            EventKind::Starter {
                value: Some(StyleValue::Flag(true)),
                active: false
            }
        );
        assert_eq!(events[2].kind, EventKind::Ender);
        assert_eq!(
            events[3].kind,
            EventKind::starter(StyleValue::Color(Color::from_rgba8(255, 0, 0, 128)))
        );
        assert_eq!(events[4].kind, EventKind::starter(StyleValue::Number(1.5)));
        assert_eq!(events[5].kind, EventKind::placeholder());
    }

    #[test]
    fn invalid_arguments_drop_single_tags() {
        let doc = parse("<c=#FF00,c=nope,c,ot=1.5px,lts=,lns=2,zz,u>x");
        assert_eq!(
            summary(&doc),
            [
                (Property::LineSpacing, false, 0, None),
                (Property::Underlined, false, 0, None)
            ]
        );
    }

    #[test]
    fn lone_prefixes_are_unknown_tags() {
        let doc = parse("</,!>x");
        assert!(doc.events.events().is_empty());
        assert_eq!(doc.text, "x");
    }

    #[test]
    fn id_applies_to_following_tags_in_group() {
        let doc = parse("<b,id=3,c=red,oc=blue>x<id=oops,u>y");
        assert_eq!(
            summary(&doc),
            [
                (Property::Bold, false, 0, None),
                (Property::FillColor, false, 0, Some(3)),
                (Property::OutlineColor, false, 0, Some(3)),
                (Property::Underlined, false, 1, None),
            ]
        );
    }

    #[test]
    fn append_continues_offsets() {
        let mut doc = parse("ab <b>c");
        doc.parse("d<i>e");
        assert_eq!(doc.text, "ab cde");
        assert_eq!(doc.displayable, 5);
        assert_eq!(
            summary(&doc),
            [(Property::Bold, false, 3, None), (Property::Italic, false, 5, None)]
        );
    }
}
