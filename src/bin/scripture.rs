//! Command-line interface for usfm-scripture
//! Builds a scripture model from tokenized USFM (JSON) and queries it.
//!
//! Usage:
//!   scripture build `<path>` [--format `<format>`]             - Print the built scripture
//!   scripture resolve `<path>` `<reference>`                   - Print the verses a reference selects
//!   scripture section `<path>` (--id `<id>` | --at `<c:v>`)    - Print one translation section
//!
//! Every subcommand accepts `--config <file>` to layer a TOML file over the defaults.

use clap::{Arg, ArgGroup, ArgMatches, Command};
use serde::Serialize;
use usfm_scripture::scripture::config::{ConfigLoader, EngineConfig, OutputFormat};
use usfm_scripture::scripture::loader::ScriptureLoader;
use usfm_scripture::scripture::model::{CleanVerse, Scripture, TranslationSection};
use usfm_scripture::scripture::navigation::SectionNavigator;
use usfm_scripture::scripture::reference::{self, ReferenceResolver};
use usfm_scripture::scripture::render;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let matches = cli().get_matches();

    match matches.subcommand() {
        Some(("build", sub)) => handle_build_command(sub),
        Some(("resolve", sub)) => handle_resolve_command(sub),
        Some(("section", sub)) => handle_section_command(sub),
        _ => unreachable!("subcommand is required"),
    }
}

fn cli() -> Command {
    let path = Arg::new("path")
        .help("Path to the tokenized book (JSON)")
        .required(true)
        .index(1);
    let config = Arg::new("config")
        .long("config")
        .short('c')
        .help("TOML file layered over the built-in defaults")
        .global(true);

    Command::new("scripture")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Build and query scripture models from tokenized USFM")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(config)
        .subcommand(
            Command::new("build")
                .about("Build the scripture model and print it")
                .arg(path.clone())
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format: json, yaml or text (default: from config)")
                        .value_parser(["json", "yaml", "text"]),
                ),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the verses a reference selects, e.g. 'JON 1:17-2:1'")
                .arg(path.clone())
                .arg(
                    Arg::new("reference")
                        .help("Reference to resolve")
                        .required(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("section")
                .about("Print one translation section with its verses")
                .arg(path)
                .arg(Arg::new("id").long("id").help("Section id (e.g. '2')"))
                .arg(
                    Arg::new("at")
                        .long("at")
                        .value_name("CHAPTER:VERSE")
                        .help("Find the section containing this verse"),
                )
                .group(ArgGroup::new("selector").args(["id", "at"]).required(true)),
        )
}

/// Handle the build command
fn handle_build_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let scripture = load_scripture(matches, &config);

    let format = match matches.get_one::<String>("format") {
        Some(name) => OutputFormat::parse(name).unwrap_or(config.output.format),
        None => config.output.format,
    };

    let output = match format {
        OutputFormat::Json => to_json(&scripture, config.output.pretty),
        OutputFormat::Yaml => to_yaml(&scripture),
        OutputFormat::Text => render::to_plain_text(&scripture),
    };
    println!("{}", output);
}

/// Handle the resolve command
fn handle_resolve_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let scripture = load_scripture(matches, &config);
    let input = required(matches, "reference");

    let Some(reference) = reference::parse(input) else {
        eprintln!("Not a reference: '{}'", input);
        eprintln!("Expected BOOK chapter:verse[-[chapter:]verse], e.g. 'JON 1:3-5'");
        std::process::exit(1);
    };

    let verses = ReferenceResolver::from_config(&config).resolve(&scripture, &reference);
    if verses.is_empty() {
        log::warn!("{} selects no verses", reference);
    }
    print_verses(&verses, config.output.format, config.output.pretty);
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SectionOutput<'s> {
    section: &'s TranslationSection,
    previous: Option<&'s str>,
    next: Option<&'s str>,
    verses: Vec<&'s CleanVerse>,
}

/// Handle the section command
fn handle_section_command(matches: &ArgMatches) {
    let config = load_config(matches);
    let scripture = load_scripture(matches, &config);
    let navigator = SectionNavigator::new(&scripture);

    let section = if let Some(id) = matches.get_one::<String>("id") {
        navigator.by_id(id)
    } else {
        let at = required(matches, "at");
        let Some((chapter, verse)) = parse_position(at) else {
            eprintln!("Expected CHAPTER:VERSE, got '{}'", at);
            std::process::exit(1);
        };
        navigator.by_reference(chapter, verse)
    };

    let Some(section) = section else {
        eprintln!("No such section");
        std::process::exit(1);
    };

    let report = SectionOutput {
        section,
        previous: navigator.previous(&section.id).map(|s| s.id.as_str()),
        next: navigator.next(&section.id).map(|s| s.id.as_str()),
        verses: navigator.verses(section),
    };
    let output = match config.output.format {
        OutputFormat::Json => to_json(&report, config.output.pretty),
        OutputFormat::Yaml => to_yaml(&report),
        OutputFormat::Text => render_section(&report),
    };
    println!("{}", output);
}

fn load_config(matches: &ArgMatches) -> EngineConfig {
    let mut loader = ConfigLoader::new();
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }
    loader.build().unwrap_or_else(|e| {
        eprintln!("Configuration error: {}", e);
        std::process::exit(1);
    })
}

fn load_scripture(matches: &ArgMatches, config: &EngineConfig) -> Scripture {
    let path = required(matches, "path");
    ScriptureLoader::from_path(path)
        .and_then(|loader| loader.build_with(config))
        .unwrap_or_else(|e| {
            eprintln!("Error loading {}: {}", path, e);
            std::process::exit(1);
        })
}

fn required<'m>(matches: &'m ArgMatches, name: &str) -> &'m str {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .unwrap_or_else(|| {
            eprintln!("Missing argument: {}", name);
            std::process::exit(1);
        })
}

fn parse_position(input: &str) -> Option<(u32, u32)> {
    let (chapter, verse) = input.trim().split_once(':')?;
    Some((chapter.trim().parse().ok()?, verse.trim().parse().ok()?))
}

fn render_section(output: &SectionOutput<'_>) -> String {
    let section = output.section;
    let end = section.end_reference.as_deref().unwrap_or("end");
    let mut lines = vec![format!(
        "{} ({} - {})",
        section.title, section.start_reference, end
    )];
    lines.extend(output.verses.iter().map(|verse| verse.to_string()));
    lines.push(format!(
        "previous: {}, next: {}",
        output.previous.unwrap_or("none"),
        output.next.unwrap_or("none")
    ));
    lines.join("\n")
}

fn print_verses(verses: &[&CleanVerse], format: OutputFormat, pretty: bool) {
    let output = match format {
        OutputFormat::Json => to_json(&verses, pretty),
        OutputFormat::Yaml => to_yaml(&verses),
        OutputFormat::Text => verses
            .iter()
            .map(|verse| format!("{} {}", verse.reference, verse.text))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    println!("{}", output);
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> String {
    let result = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    result.unwrap_or_else(|e| {
        eprintln!("Error formatting JSON: {}", e);
        std::process::exit(1);
    })
}

fn to_yaml<T: Serialize>(value: &T) -> String {
    serde_yaml::to_string(value).unwrap_or_else(|e| {
        eprintln!("Error formatting YAML: {}", e);
        std::process::exit(1);
    })
}
