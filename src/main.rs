use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, Command};
use fontpersona::{
    analyzers::{analyzer_by_name, default_analyzers, FeatureAnalyzer, ANALYZER_NAMES},
    analyze_paths, collect_font_paths, FeatureRecord, FontPersonaError, FontReport,
    FONT_EXTENSIONS,
};
use serde::Serialize;

#[derive(Serialize)]
struct JsonEntry<'a> {
    path: &'a Path,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<&'a FontReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn command() -> Command {
    Command::new("fontpersona")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Describe the personality of fonts from their glyph geometry")
        .arg(
            Arg::new("paths")
                .help("Font files, or directories containing font files")
                .num_args(1..)
                .required_unless_present("help_formats")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print the full analysis as JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Write the full analysis as JSON to this file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .help("Run only these analyzers (comma separated)")
                .value_delimiter(',')
                .value_parser(clap::builder::PossibleValuesParser::new(ANALYZER_NAMES.iter().copied())),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Set the level of verbosity")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("help_formats")
                .long("help-formats")
                .help("List the supported font formats and analyzers")
                .action(ArgAction::SetTrue),
        )
}

fn print_formats() {
    println!("Supported font files:");
    println!("  TrueType outlines (.ttf, .otf): full geometric analysis");
    println!("  CFF outlines (.otf): metadata-based estimates for geometric features");
    println!("  Font collections (.ttc): the first font is analyzed");
    println!("  WOFF/WOFF2: not supported, decompress first");
    println!(
        "Directories are scanned for: {}",
        FONT_EXTENSIONS
            .iter()
            .map(|e| format!(".{e}"))
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Analyzers: {}", ANALYZER_NAMES.join(", "));
}

fn describe_record(record: &FeatureRecord) -> String {
    let mut line = format!("  {:<17} {}", record.kind.to_string(), record.label);
    if let Some(value) = record.value {
        line.push_str(&format!(" ({value:.3})"));
    }
    if let Some(method) = &record.estimation_method {
        let prefix = if record.estimated { "estimated from" } else { "from" };
        line.push_str(&format!(" [{prefix} {method}]"));
    }
    if let Some(reason) = &record.reason {
        line.push_str(&format!(": {reason}"));
    }
    line
}

fn print_report(path: &Path, report: &FontReport) {
    println!(
        "{} ({})",
        report.name.as_deref().unwrap_or("Unnamed font"),
        path.display()
    );
    println!("  {:<17} {}", "format", report.format);
    for record in report.features.iter() {
        println!("{}", describe_record(record));
    }
    let personality = &report.personality;
    println!();
    println!("  {}", personality.description);
    if !personality.dominant_traits.is_empty() {
        println!(
            "  Dominant traits: {}",
            personality
                .dominant_traits
                .iter()
                .map(|(t, v)| format!("{t} ({v:+.1})"))
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    if !personality.suitable_for.is_empty() {
        let uses: Vec<&str> = personality.suitable_for.iter().copied().collect();
        println!("  Suitable for: {}", uses.join(", "));
    }
    if !personality.less_suitable_for.is_empty() {
        let uses: Vec<&str> = personality.less_suitable_for.iter().copied().collect();
        println!("  Less suitable for: {}", uses.join(", "));
    }
    println!();
}

/// Returns whether every font could be analyzed
fn run(args: &clap::ArgMatches) -> Result<bool, FontPersonaError> {
    let analyzers: Vec<Box<dyn FeatureAnalyzer>> = match args.get_many::<String>("only") {
        Some(names) => names
            .map(|name| analyzer_by_name(name))
            .collect::<Result<_, _>>()?,
        None => default_analyzers(),
    };
    let paths: Vec<PathBuf> = args
        .get_many::<PathBuf>("paths")
        .map(|p| p.cloned().collect())
        .unwrap_or_default();
    let paths = collect_font_paths(&paths)?;
    if paths.is_empty() {
        log::warn!("No font files found");
        return Ok(true);
    }
    log::info!("Analyzing {} fonts", paths.len());
    let started = std::time::Instant::now();
    let results = analyze_paths(&paths, &analyzers);
    log::info!("Analysis took {:?}", started.elapsed());

    let all_ok = results.iter().all(|(_, r)| r.is_ok());
    let json_wanted = args.get_flag("json");
    let output = args.get_one::<PathBuf>("output");

    if json_wanted || output.is_some() {
        let entries: Vec<JsonEntry> = results
            .iter()
            .map(|(path, result)| JsonEntry {
                path,
                report: result.as_ref().ok(),
                error: result.as_ref().err().map(|e| e.to_string()),
            })
            .collect();
        let json = serde_json::to_string_pretty(&entries)?;
        if let Some(output) = output {
            std::fs::write(output, &json)?;
            log::info!("Wrote {}", output.display());
        }
        if json_wanted {
            println!("{json}");
        }
    }
    if !json_wanted {
        for (path, result) in &results {
            match result {
                Ok(report) => print_report(path, report),
                Err(e) => log::error!("{}: {}", path.display(), e),
            }
        }
    }
    Ok(all_ok)
}

fn main() {
    let args = command().get_matches();
    env_logger::Builder::new()
        .filter_level(match args.get_count("verbosity") {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        })
        .init();

    if args.get_flag("help_formats") {
        print_formats();
        return;
    }
    match run(&args) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            log::error!("{e}");
            std::process::exit(2);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn test_only_rejects_unknown_analyzers() {
        let result = command().try_get_matches_from(["fontpersona", "--only", "style,colour", "a.ttf"]);
        assert!(result.is_err());
        let matches = command()
            .try_get_matches_from(["fontpersona", "--only", "style,shape", "a.ttf"])
            .map(|m| {
                m.get_many::<String>("only")
                    .map(|v| v.cloned().collect::<Vec<_>>())
                    .unwrap_or_default()
            });
        assert_eq!(matches.ok(), Some(vec!["style".to_string(), "shape".to_string()]));
    }

    #[test]
    fn test_help_formats_needs_no_paths() {
        assert!(command()
            .try_get_matches_from(["fontpersona", "--help-formats"])
            .is_ok());
    }
}
