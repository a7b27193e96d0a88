/// Narrative Linter — parses generated pages and flags structural problems.
///
/// Usage: narrative_linter <file|dir> [--config <file.ron>]
///
/// Every `.txt` file is parsed. Pages with a conclusion header or wrapper
/// are parsed as conclusions; everything else as an encounter.

use encounter_parser::core::conclusion::{CONCLUSION_HEADER, CONCLUSION_WRAPPER};
use encounter_parser::core::parser::EncounterParser;
use encounter_parser::schema::encounter::{Encounter, MechanicKind};
use rustc_hash::FxHashMap;
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

const ROLL_FACES: usize = 6;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: narrative_linter <file|dir> [--config <file.ron>]");
        process::exit(0);
    }

    let target = Path::new(&args[1]);
    let mut config_path = None;

    let mut i = 2;
    while i < args.len() {
        if args[i] == "--config" && i + 1 < args.len() {
            i += 1;
            config_path = Some(PathBuf::from(&args[i]));
        }
        i += 1;
    }

    let mut builder = EncounterParser::builder();
    if let Some(ref path) = config_path {
        builder = builder.config_path(path);
    }
    let parser = match builder.build() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("ERROR: Failed to load config: {}", e);
            process::exit(1);
        }
    };

    let mut files = Vec::new();
    if target.is_file() {
        files.push(target.to_path_buf());
    } else if target.is_dir() {
        collect_pages(target, &mut files);
        files.sort();
    } else {
        eprintln!("ERROR: Path '{}' does not exist", target.display());
        process::exit(1);
    }

    println!("Found {} narrative files", files.len());

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut kinds: FxHashMap<MechanicKind, usize> = FxHashMap::default();

    for path in &files {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                errors.push(format!("{}: unreadable: {}", path.display(), e));
                continue;
            }
        };

        let label = path.display().to_string();
        if is_conclusion(&text) {
            let encounter = parser.parse_conclusion(&text, "");
            *kinds.entry(encounter.mechanic_kind).or_default() += 1;
            warnings.extend(lint_conclusion(&encounter).into_iter().map(|w| format!("{}: {}", label, w)));
            continue;
        }

        match parser.parse(&text, "") {
            Ok(encounter) => {
                *kinds.entry(encounter.mechanic_kind).or_default() += 1;
                warnings.extend(lint_encounter(&encounter).into_iter().map(|w| format!("{}: {}", label, w)));
            }
            Err(e) => errors.push(format!("{}: {}", label, e)),
        }
    }

    // Print report
    println!("\n=== Narrative Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!("\nMechanics:");
    for kind in MechanicKind::ALL {
        if let Some(count) = kinds.get(&kind) {
            println!("  {:<14} {}", kind.name(), count);
        }
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn collect_pages(dir: &Path, files: &mut Vec<PathBuf>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                collect_pages(&path, files);
            } else if path.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(path);
            }
        }
    }
}

// The wrapper is optional, so the header alone also marks a conclusion.
fn is_conclusion(text: &str) -> bool {
    text.contains(CONCLUSION_WRAPPER) || text.lines().any(|line| line.starts_with(CONCLUSION_HEADER))
}

fn lint_encounter(encounter: &Encounter) -> Vec<String> {
    let mut warnings = Vec::new();

    if encounter.introduction.is_empty() {
        warnings.push("empty introduction".to_string());
    }
    if encounter.description.is_empty() {
        warnings.push("empty description".to_string());
    }

    match encounter.mechanic_kind {
        MechanicKind::Roll if encounter.options.len() < ROLL_FACES => {
            warnings.push(format!(
                "roll has only {} faces ({} expected)",
                encounter.options.len(),
                ROLL_FACES
            ));
        }
        MechanicKind::Riddle if !encounter.options.iter().any(|o| o.outcome == "Correct") => {
            warnings.push("riddle has no correct answer".to_string());
        }
        MechanicKind::Luck => {
            for (i, option) in encounter.options.iter().enumerate() {
                if option.text.is_empty() || option.outcome.is_empty() {
                    warnings.push(format!("luck scenario {} is incomplete", i + 1));
                }
            }
        }
        MechanicKind::PlainOptions if encounter.options.is_empty() => {
            warnings.push("no numbered options found".to_string());
        }
        _ => {}
    }

    warnings
}

fn lint_conclusion(encounter: &Encounter) -> Vec<String> {
    let mut warnings = Vec::new();
    if encounter.name.is_empty() {
        warnings.push("conclusion has no header".to_string());
    }
    if encounter.introduction.is_empty() {
        warnings.push("conclusion has no body".to_string());
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conclusion_detected_by_header_or_wrapper() {
        assert!(is_conclusion("### Conclusion: Home\nYou rest."));
        assert!(is_conclusion("^^conclusion^^\nYou rest."));
        assert!(!is_conclusion("### ADV01: Gate\n**Introduction:**\nHi"));
    }

    #[test]
    fn headerless_conclusion_is_flagged() {
        let encounter = EncounterParser::default().parse_conclusion("^^conclusion^^\nYou rest.", "");
        assert_eq!(lint_conclusion(&encounter), vec!["conclusion has no header"]);
    }

    #[test]
    fn short_roll_is_flagged() {
        let page = "### ADV01: Stair\n**Introduction:**\nHi\n**Encounter Description:**\nSteps\n\
            **Image Generation:**\nStairs\n**Mechanics:**\n$$Roll$$\n1. Fall (x)\n2. Slip (y)";
        let encounter = EncounterParser::default().parse(page, "").unwrap();
        assert_eq!(lint_encounter(&encounter), vec!["roll has only 2 faces (6 expected)"]);
    }
}
