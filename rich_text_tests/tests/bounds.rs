// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds queries.

use rich_text::{Affine, ErrorKind, Rect, RichText};

use crate::util::TestEnv;

#[test]
fn bounds_local() {
    let env = TestEnv::new();
    let mut text = env.text("ab");
    assert_eq!(text.local_bounds(), Rect::new(0.0, 8.0, 20.0, 25.0));

    let mut text = env.text("<u>ab</u>\nc");
    assert_eq!(text.local_bounds(), Rect::new(0.0, 8.0, 20.0, 49.0));
}

#[test]
fn bounds_include_decorations() {
    let env = TestEnv::new();
    let mut text = env.text("<ot=2,u>ab");
    let bounds = text.local_bounds();
    // The outlined underline reaches below the glyphs and past both ends.
    assert_eq!(bounds.x0, -4.0);
    assert_eq!(bounds.x1, 22.0);
    assert_eq!(bounds.y1, 29.0);
}

#[test]
fn bounds_empty_text() {
    let env = TestEnv::new();
    let mut text = env.text("");
    assert_eq!(text.local_bounds(), Rect::ZERO);
    let mut text = env.text(" \n\t");
    assert_eq!(text.local_bounds(), Rect::ZERO);
}

#[test]
fn bounds_global() {
    let env = TestEnv::new();
    let mut text = env.text("ab");
    text.set_transform(Affine::translate((10.0, 20.0)));
    assert_eq!(text.global_bounds(), Rect::new(10.0, 28.0, 30.0, 45.0));
    text.set_transform(Affine::scale(2.0));
    assert_eq!(text.global_bounds(), Rect::new(0.0, 16.0, 40.0, 50.0));
    assert_eq!(text.layout_generation(), 1);
}

#[test]
fn bounds_character() {
    let env = TestEnv::new();
    let mut text = env.text("a b");
    assert_eq!(
        text.character_bounds(1),
        Ok(Rect::new(20.0, 8.0, 30.0, 25.0))
    );
    // The character limit doesn't hide characters from queries.
    text.set_character_limit(0);
    assert!(text.character_bounds(1).is_ok());
}

#[test]
fn bounds_character_italic() {
    let env = TestEnv::new();
    let mut text = env.text("<i>a");
    assert_eq!(
        text.character_bounds(0),
        Ok(Rect::new(0.0, 8.0, 13.0, 25.0))
    );
}

#[test]
fn bounds_character_errors() {
    let env = TestEnv::new();
    let mut text = env.text("a b");
    let error = text.character_bounds(2).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::CharacterOutOfRange);
    assert_eq!((error.index(), error.available()), (2, 2));
    assert!(error.to_string().contains("character 2"));

    let mut text = RichText::new();
    text.parse_string("ab");
    let error = text.character_bounds(0).unwrap_err();
    assert_eq!(error.kind(), ErrorKind::MissingFont);
    assert_eq!(text.local_bounds(), Rect::ZERO);
}
