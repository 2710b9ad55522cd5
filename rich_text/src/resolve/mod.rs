// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolution of nested style regions into the active style.

mod stack;

pub(crate) use stack::PropertyStack;

use peniko::Color;

use crate::style::{Property, StyleEvent, StyleValue, TextStyle};

/// One value stack per property, each seeded with the document-wide base value.
#[derive(Clone, Debug)]
pub(crate) struct VariableStyle {
    pub(crate) bold: PropertyStack<bool>,
    pub(crate) italic: PropertyStack<bool>,
    pub(crate) underlined: PropertyStack<bool>,
    pub(crate) strike_through: PropertyStack<bool>,
    pub(crate) fill_color: PropertyStack<Color>,
    pub(crate) outline_thickness: PropertyStack<f32>,
    pub(crate) outline_color: PropertyStack<Color>,
    pub(crate) letter_spacing: PropertyStack<f32>,
    pub(crate) line_spacing: PropertyStack<f32>,
}

impl Default for VariableStyle {
    fn default() -> Self {
        Self {
            bold: PropertyStack::new(false),
            italic: PropertyStack::new(false),
            underlined: PropertyStack::new(false),
            strike_through: PropertyStack::new(false),
            fill_color: PropertyStack::new(Color::BLACK),
            outline_thickness: PropertyStack::new(0.0),
            outline_color: PropertyStack::new(Color::WHITE),
            letter_spacing: PropertyStack::new(1.0),
            line_spacing: PropertyStack::new(1.0),
        }
    }
}

impl VariableStyle {
    /// Applies `event` and returns its property if the visible value changed.
    pub(crate) fn apply(&mut self, event: &StyleEvent) -> Option<Property> {
        let kind = &event.kind;
        let changed = match event.property {
            Property::Bold => self.bold.apply(kind, StyleValue::as_flag),
            Property::Italic => self.italic.apply(kind, StyleValue::as_flag),
            Property::Underlined => self.underlined.apply(kind, StyleValue::as_flag),
            Property::StrikeThrough => self.strike_through.apply(kind, StyleValue::as_flag),
            Property::FillColor => self.fill_color.apply(kind, StyleValue::as_color),
            Property::OutlineThickness => self.outline_thickness.apply(kind, StyleValue::as_number),
            Property::OutlineColor => self.outline_color.apply(kind, StyleValue::as_color),
            Property::LetterSpacing => self.letter_spacing.apply(kind, StyleValue::as_number),
            Property::LineSpacing => self.line_spacing.apply(kind, StyleValue::as_number),
        };
        changed.then_some(event.property)
    }

    /// Collapses every stack to its base level.
    pub(crate) fn rewind(&mut self) {
        self.bold.rewind();
        self.italic.rewind();
        self.underlined.rewind();
        self.strike_through.rewind();
        self.fill_color.rewind();
        self.outline_thickness.rewind();
        self.outline_color.rewind();
        self.letter_spacing.rewind();
        self.line_spacing.rewind();
    }

    /// The base boolean flags.
    pub(crate) fn base_style(&self) -> TextStyle {
        let mut style = TextStyle::empty();
        style.set(TextStyle::BOLD, self.bold.base());
        style.set(TextStyle::ITALIC, self.italic.base());
        style.set(TextStyle::UNDERLINED, self.underlined.base());
        style.set(TextStyle::STRIKE_THROUGH, self.strike_through.base());
        style
    }

    pub(crate) fn set_base_style(&mut self, style: TextStyle) {
        self.bold.set_base(style.contains(TextStyle::BOLD));
        self.italic.set_base(style.contains(TextStyle::ITALIC));
        self.underlined.set_base(style.contains(TextStyle::UNDERLINED));
        self.strike_through
            .set_base(style.contains(TextStyle::STRIKE_THROUGH));
    }
}
