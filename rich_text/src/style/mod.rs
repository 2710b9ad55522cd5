// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Style properties and the events that change them.

mod event;

pub use event::{EventKind, StyleEvent};
pub(crate) use event::EventStore;

use peniko::Color;

bitflags::bitflags! {
    /// Boolean style flags.
    ///
    /// Used by the whole-document [`set_style`](crate::RichText::set_style) and by the per-id
    /// style setters, where each flag selects the matching kind of tagged region.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct TextStyle: u8 {
        /// Bold weight.
        const BOLD = 0b0001;
        /// Sheared glyphs.
        const ITALIC = 0b0010;
        /// Underline decoration.
        const UNDERLINED = 0b0100;
        /// Strike-through decoration.
        const STRIKE_THROUGH = 0b1000;
    }
}

/// A style property that markup can override.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Property {
    /// Bold weight, `<b>`.
    Bold,
    /// Italic shear, `<i>`.
    Italic,
    /// Underline decoration, `<u>`.
    Underlined,
    /// Strike-through decoration, `<s>`.
    StrikeThrough,
    /// Glyph and decoration fill color, `<c>`.
    FillColor,
    /// Outline thickness, `<ot>`.
    OutlineThickness,
    /// Outline color, `<oc>`.
    OutlineColor,
    /// Letter spacing factor, `<lts>`.
    LetterSpacing,
    /// Line spacing factor, `<lns>`.
    LineSpacing,
}

impl Property {
    /// Looks up the property for a markup tag name.
    pub fn from_tag(name: &str) -> Option<Self> {
        Some(match name {
            "b" => Self::Bold,
            "i" => Self::Italic,
            "u" => Self::Underlined,
            "s" => Self::StrikeThrough,
            "c" => Self::FillColor,
            "ot" => Self::OutlineThickness,
            "oc" => Self::OutlineColor,
            "lts" => Self::LetterSpacing,
            "lns" => Self::LineSpacing,
            _ => return None,
        })
    }

    /// The flag that selects this property in a [`TextStyle`], for the boolean properties.
    pub fn style_flag(self) -> Option<TextStyle> {
        match self {
            Self::Bold => Some(TextStyle::BOLD),
            Self::Italic => Some(TextStyle::ITALIC),
            Self::Underlined => Some(TextStyle::UNDERLINED),
            Self::StrikeThrough => Some(TextStyle::STRIKE_THROUGH),
            _ => None,
        }
    }

    pub(crate) fn kind(self) -> ValueKind {
        match self {
            Self::Bold | Self::Italic | Self::Underlined | Self::StrikeThrough => ValueKind::Flag,
            Self::FillColor | Self::OutlineColor => ValueKind::Color,
            Self::OutlineThickness | Self::LetterSpacing | Self::LineSpacing => ValueKind::Number,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum ValueKind {
    Flag,
    Number,
    Color,
}

/// The value a starter event pushes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum StyleValue {
    /// Value of a boolean property.
    Flag(bool),
    /// Value of a numeric property.
    Number(f32),
    /// Value of a color property.
    Color(Color),
}

impl StyleValue {
    pub(crate) fn as_flag(self) -> Option<bool> {
        match self {
            Self::Flag(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn as_number(self) -> Option<f32> {
        match self {
            Self::Number(v) => Some(v),
            _ => None,
        }
    }

    pub(crate) fn as_color(self) -> Option<Color> {
        match self {
            Self::Color(v) => Some(v),
            _ => None,
        }
    }
}

/// Looks up one of the color names accepted by the `c` and `oc` tags.
pub fn named_color(name: &str) -> Option<Color> {
    let (r, g, b, a) = match name {
        "black" => (0, 0, 0, 255),
        "white" => (255, 255, 255, 255),
        "red" => (255, 0, 0, 255),
        "green" => (0, 255, 0, 255),
        "blue" => (0, 0, 255, 255),
        "yellow" => (255, 255, 0, 255),
        "magenta" => (255, 0, 255, 255),
        "cyan" => (0, 255, 255, 255),
        "transparent" => (0, 0, 0, 0),
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, a))
}

/// Parses `RRGGBB` or `RRGGBBAA` (without the leading `#`).
pub fn hex_color(digits: &str) -> Option<Color> {
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let code = u32::from_str_radix(digits, 16).ok()?;
    let [r, g, b, a] = if digits.len() == 6 {
        let [_, r, g, b] = code.to_be_bytes();
        [r, g, b, 255]
    } else {
        code.to_be_bytes()
    };
    Some(Color::from_rgba8(r, g, b, a))
}

#[cfg(test)]
mod tests {
    use super::{hex_color, named_color, Property, TextStyle};
    use peniko::Color;

    #[test]
    fn hex_colors_with_and_without_alpha() {
        assert_eq!(hex_color("FF0000"), Some(Color::from_rgba8(255, 0, 0, 255)));
        assert_eq!(hex_color("00ff0080"), Some(Color::from_rgba8(0, 255, 0, 128)));
        assert_eq!(hex_color("FF00"), None);
        assert_eq!(hex_color("FF00001"), None);
        assert_eq!(hex_color("GG0000"), None);
        assert_eq!(hex_color("+F0000"), None);
    }

    #[test]
    fn named_colors() {
        assert_eq!(named_color("green"), Some(Color::from_rgba8(0, 255, 0, 255)));
        assert_eq!(named_color("transparent"), Some(Color::from_rgba8(0, 0, 0, 0)));
        assert_eq!(named_color("Green"), None);
    }

    #[test]
    fn tag_names() {
        assert_eq!(Property::from_tag("lts"), Some(Property::LetterSpacing));
        assert_eq!(Property::from_tag("id"), None);
        assert_eq!(Property::from_tag("B"), None);
        assert_eq!(Property::Underlined.style_flag(), Some(TextStyle::UNDERLINED));
        assert_eq!(Property::FillColor.style_flag(), None);
    }
}
