/// Preview — parse a single generated page and print the result.
///
/// Usage: preview <file> [--image <ref>] [--conclusion] [--ron] [--config <file.ron>]
///
/// Options:
///   --image <ref>         image reference stored on the record
///   --conclusion          parse the page as an end-of-story message
///   --ron                 print the record as RON instead of text
///   --config <file.ron>   parser configuration

use encounter_parser::core::image::{conclusion_image_prompt, encounter_image_prompt};
use encounter_parser::core::parser::EncounterParser;
use encounter_parser::schema::encounter::Encounter;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        print_usage();
        return;
    }

    let file = &args[1];
    let mut image_ref = String::new();
    let mut conclusion = false;
    let mut as_ron = false;
    let mut config_path = None;

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--image" if i + 1 < args.len() => {
                i += 1;
                image_ref = args[i].clone();
            }
            "--conclusion" => conclusion = true,
            "--ron" => as_ron = true,
            "--config" if i + 1 < args.len() => {
                i += 1;
                config_path = Some(args[i].clone());
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let text = match std::fs::read_to_string(file) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("ERROR: Failed to read '{}': {}", file, e);
            std::process::exit(1);
        }
    };

    let mut builder = EncounterParser::builder();
    if let Some(ref path) = config_path {
        builder = builder.config_path(Path::new(path));
    }
    let parser = match builder.build() {
        Ok(parser) => parser,
        Err(e) => {
            eprintln!("ERROR: Failed to load config: {}", e);
            std::process::exit(1);
        }
    };

    let (encounter, prompt) = if conclusion {
        (
            parser.parse_conclusion(&text, &image_ref),
            conclusion_image_prompt(&text),
        )
    } else {
        match parser.parse(&text, &image_ref) {
            Ok(encounter) => (encounter, encounter_image_prompt(&text)),
            Err(e) => {
                eprintln!("ERROR: {}", e);
                std::process::exit(1);
            }
        }
    };

    if as_ron {
        match ron::ser::to_string_pretty(&encounter, ron::ser::PrettyConfig::default()) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("ERROR: Failed to serialize: {}", e);
                std::process::exit(1);
            }
        }
    } else {
        print_encounter(&encounter, prompt.as_deref());
    }
}

fn print_usage() {
    println!("Usage: preview <file> [--image <ref>] [--conclusion] [--ron] [--config <file.ron>]");
    println!();
    println!("Options:");
    println!("  --image <ref>         image reference stored on the record");
    println!("  --conclusion          parse the page as an end-of-story message");
    println!("  --ron                 print the record as RON instead of text");
    println!("  --config <file.ron>   parser configuration");
}

fn print_encounter(encounter: &Encounter, prompt: Option<&str>) {
    println!("\n--- {}: {} ---", encounter.number, encounter.name);
    println!("\n{}", encounter.introduction);
    if !encounter.description.is_empty() {
        println!("\n{}", encounter.description);
    }
    if let Some(prompt) = prompt {
        println!("\nImage prompt: {}", prompt);
    }

    println!("\nMechanic: {}", encounter.mechanic_kind.name());
    if !encounter.mechanic_info.is_empty() {
        println!("  {}", encounter.mechanic_info);
    }
    for (i, option) in encounter.options.iter().enumerate() {
        println!("  {}. {}  =>  {}", i + 1, option.text, option.outcome);
    }

    let stats = encounter.stats;
    println!(
        "\nStats: health={} luck={} skill={}",
        stats.health, stats.luck, stats.skill_modifier
    );
    println!("--- End ---\n");
}
