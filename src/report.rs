use std::path::{Path, PathBuf};

use serde::Serialize;
use smol_str::SmolStr;

use crate::{
    analyzers::{default_analyzers, FeatureAnalyzer},
    personality::PersonalityProfile,
    FeatureSet, FontPersonaError, OutlineFormat, OutlineSource,
};

/// File extensions picked up when scanning a directory
pub const FONT_EXTENSIONS: &[&str] = &["ttf", "otf", "ttc"];

/// Everything learned about one font
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FontReport {
    /// Full name, or family name, of the font
    pub name: Option<SmolStr>,
    /// Container and outline flavour
    pub format: OutlineFormat,
    /// One record per analyzer, in the order they ran
    pub features: FeatureSet,
    /// The personality derived from the features
    pub personality: PersonalityProfile,
}

/// Run every analyzer over a font and score its personality
pub fn analyze(font: &dyn OutlineSource) -> FontReport {
    analyze_with(font, &default_analyzers())
}

/// Run the given analyzers over a font and score its personality
///
/// Features whose analyzer is not in the list are simply missing, and the
/// personality rules that depend on them do not fire.
pub fn analyze_with(font: &dyn OutlineSource, analyzers: &[Box<dyn FeatureAnalyzer>]) -> FontReport {
    let features: FeatureSet = analyzers.iter().map(|a| a.analyze(font)).collect();
    let personality = PersonalityProfile::from_features(&features);
    FontReport {
        name: font.display_name().map(SmolStr::from),
        format: font.outline_format(),
        features,
        personality,
    }
}

/// Load a font file and analyze it
#[cfg(feature = "binary")]
pub fn analyze_path(
    path: &Path,
    analyzers: &[Box<dyn FeatureAnalyzer>],
) -> Result<FontReport, FontPersonaError> {
    let font = crate::BinaryFont::load(path)?;
    let report = analyze_with(&font, analyzers);
    log::info!(
        "Analyzed {} ({})",
        report.name.as_deref().unwrap_or("unnamed font"),
        path.display()
    );
    Ok(report)
}

/// Analyze many font files, in parallel when the `rayon` feature is enabled
///
/// Each font is opened inside its worker; a font which fails to load does
/// not stop the others.
#[cfg(feature = "binary")]
pub fn analyze_paths(
    paths: &[PathBuf],
    analyzers: &[Box<dyn FeatureAnalyzer>],
) -> Vec<(PathBuf, Result<FontReport, FontPersonaError>)> {
    let run = |path: &PathBuf| {
        let result = analyze_path(path, analyzers);
        if let Err(e) = &result {
            log::warn!("Could not analyze {}: {}", path.display(), e);
        }
        (path.clone(), result)
    };
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        paths.par_iter().map(run).collect()
    }
    #[cfg(not(feature = "rayon"))]
    {
        paths.iter().map(run).collect()
    }
}

/// Expand directories into the font files they contain
///
/// Files are passed through as given; directories are scanned one level
/// deep for files with a [`FONT_EXTENSIONS`] extension, in name order.
pub fn collect_font_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, FontPersonaError> {
    let mut fonts = vec![];
    for path in paths {
        if !path.is_dir() {
            fonts.push(path.clone());
            continue;
        }
        let mut found: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_font_extension(p))
            .collect();
        found.sort();
        log::info!("Found {} fonts in {}", found.len(), path.display());
        fonts.extend(found);
    }
    Ok(fonts)
}

fn has_font_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| FONT_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}
