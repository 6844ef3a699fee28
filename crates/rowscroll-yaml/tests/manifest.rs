//! Manifest loading from the public API.

use proptest::prelude::*;
use rowscroll_yaml::{Manifest, ParseError};

fn manifest_with_rows(base: u32, hover: u32, expanded: u32) -> String {
    format!(
        r#"rowscroll: "0.1"
layout:
  rows: {{ base: {base}, hover: {hover}, expanded: {expanded} }}
rows:
  - code: "GZ–54"
    title: "Godzilla (1954)"
    author: "Ishirō Honda"
    media_url: "https://www.youtube.com/watch?v=EjNYWCH-fJw"
"#
    )
}

#[test]
fn test_direct_media_row() {
    let yaml = r#"
rowscroll: "0.1"
rows:
  - code: "X–01"
    title: "Local clip"
    author: "Someone"
    media_url: "https://example.com/clip"
    direct_media: "https://cdn.example.com/clip.webm"
"#;
    let config = Manifest::load(yaml).expect("valid manifest");
    let row = &config.dataset.rows()[0];
    assert_eq!(row.media_url, "https://example.com/clip");
    assert!(matches!(
        row.media,
        rowscroll_core::MediaSource::Direct { ref url } if url == "https://cdn.example.com/clip.webm"
    ));
}

#[test]
fn test_empty_rows_allowed() {
    let config = Manifest::load("rowscroll: \"0.1\"\nrows: []\n").expect("valid manifest");
    assert!(config.dataset.is_empty());
}

#[test]
fn test_yaml_syntax_error() {
    let err = Manifest::load("rowscroll: [").expect_err("broken yaml");
    assert!(matches!(err, ParseError::Yaml(_)));
    assert!(err.to_string().starts_with("YAML error"));
}

proptest! {
    #[test]
    fn prop_height_order_decides_validity(base in 1u32..200, hover in 1u32..200, expanded in 1u32..200) {
        let result = Manifest::load(&manifest_with_rows(base, hover, expanded));
        let ordered = base < expanded && expanded < hover;
        prop_assert_eq!(result.is_ok(), ordered);
    }
}
