#![cfg(feature = "binary")]
use fontpersona::{
    analyze_path, analyze_paths, analyzers::default_analyzers, collect_font_paths, FeatureKind,
    FontPersonaError, FontStyle, Label, OutlineFormat,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn resources() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
}

#[test]
fn test_analyze_dejavu_serif() -> Result<(), FontPersonaError> {
    let report = analyze_path(&resources().join("DejaVuSerif.ttf"), &default_analyzers())?;
    assert_eq!(report.name.as_deref(), Some("DejaVu Serif"));
    assert_eq!(report.format, OutlineFormat::TrueType);
    assert_eq!(report.features.len(), 8);
    for record in report.features.iter() {
        assert!(record.is_known(), "{} is {}", record.kind, record.label);
    }
    assert_eq!(report.features.style(), Some(FontStyle::Serif));
    assert_eq!(
        report.features.get(FeatureKind::DesignClass).map(|r| &r.label),
        Some(&Label::DesignClass {
            weight: "Regular".into(),
            width: "Normal".into()
        })
    );
    assert!(!report.features.get(FeatureKind::StrokeWidth).map_or(true, |r| r.estimated));
    assert!(!report.personality.description.is_empty());
    Ok(())
}

#[test]
fn test_directory_scan() -> Result<(), FontPersonaError> {
    let paths = collect_font_paths(&[resources()])?;
    assert_eq!(paths, vec![resources().join("DejaVuSerif.ttf")]);
    let results = analyze_paths(&paths, &default_analyzers());
    assert_eq!(results.len(), 1);
    assert!(results[0].1.is_ok());
    Ok(())
}
