//! Ready-made datasets and manifests for tests.

use rowscroll_core::{Dataset, RowRecord};
use rowscroll_yaml::{Config, Manifest, SUPPORTED_VERSION};

/// The manifest shipped with `rowscroll-yaml`, validated.
///
/// # Panics
///
/// Panics if the embedded manifest is broken.
pub fn builtin_config() -> Config {
    Manifest::builtin()
        .and_then(Manifest::into_config)
        .expect("builtin manifest is valid")
}

/// Three rows: an embedded watch link with a quote, a direct video file,
/// and a link that resolves to no media.
pub fn three_records() -> Vec<RowRecord> {
    vec![
        RowRecord::new(
            "KK–33",
            "King Kong (1933)",
            "Merian C. Cooper & Ernest B. Schoedsack",
            "https://www.youtube.com/watch?v=MMNICLfHE3M",
        )
        .with_quote("It was beauty killed the beast."),
        RowRecord::new(
            "GZ–54",
            "Gojira (1954)",
            "Ishirō Honda",
            "https://www.youtube.com/watch?v=T4Y-vCGAclo",
        )
        .with_direct_media("https://cdn.example.com/gojira.mp4"),
        RowRecord::new(
            "KK–76",
            "King Kong (1976)",
            "John Guillermin",
            "https://example.com/king-kong-1976",
        ),
    ]
}

/// [`three_records`] as a dataset.
///
/// # Panics
///
/// Never; the records are valid.
pub fn three_films() -> Dataset {
    Dataset::new(three_records()).expect("fixture rows are valid")
}

/// A manifest document holding `rows` and default settings.
///
/// # Panics
///
/// Panics if the manifest cannot be serialized.
pub fn manifest_yaml(rows: Vec<RowRecord>) -> String {
    Manifest {
        rowscroll: SUPPORTED_VERSION.to_string(),
        title: "fixture".to_string(),
        theme: rowscroll_yaml::ThemeConfig::default(),
        layout: rowscroll_yaml::LayoutConfig::default(),
        rows,
    }
    .to_yaml()
    .expect("manifest serializes")
}
