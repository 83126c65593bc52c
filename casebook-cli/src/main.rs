// Command-line interface for casebook
//
// The casebook binary is the shell around the casebook-text library: it reads card text
// from files or stdin, runs the annotation pipeline with the configured ruleset and
// builds the published dataset from crawled data and hand-maintained overrides.
//
// Usage:
//  casebook annotate [<path>|-]                            - Annotate ability text (stdin by default)
//  casebook card <path>|-                                  - Compose a card's fields into {html, plain, special_keys}
//  casebook build-data [--source <dir>] [--out <dir>]      - Merge overrides and write the dataset
//  casebook rules                                          - Print the effective ruleset as JSON
//
// Configuration:
//
// Built-in defaults are layered with casebook.toml from the working directory (when present)
// and then with --config <path>. --rules <path> replaces the whole ruleset.
// Logging goes to stderr; RUST_LOG overrides the configured level.

use casebook_config::{CasebookConfig, Loader};
use casebook_text::dataset::{self, DatasetOptions, SourceReport};
use casebook_text::{compose, Annotator, CardDecorations, CardFields};
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use tracing_subscriber::filter::{Directive, LevelFilter};
use tracing_subscriber::EnvFilter;

fn build_cli() -> Command {
    Command::new("casebook")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Annotate card text and build the casebook dataset")
        .long_about(
            "casebook turns crawled card text into tooltip-annotated HTML and builds the\n\
            published card dataset.\n\n\
            Commands:\n  \
            - annotate:   Annotate ability text\n  \
            - card:       Compose and annotate all ability fields of a card\n  \
            - build-data: Merge crawled data with override files\n  \
            - rules:      Print the effective ruleset\n\n\
            Examples:\n  \
            echo '[登场时]获得1个证据。' | casebook annotate\n  \
            casebook card card.json\n  \
            casebook build-data --source ../data --out data\n  \
            casebook rules --rules my-rules.toml",
        )
        .arg_required_else_help(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a casebook.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("rules")
                .long("rules")
                .value_name("PATH")
                .help("Ruleset file replacing the built-in rule tables")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("annotate")
                .about("Annotate ability text")
                .long_about(
                    "Run the mechanics, bracket and brace passes over the input text and\n\
                    print the resolved HTML.\n\n\
                    The whole input is one annotation job, so each mechanics term is\n\
                    explained once. Reads stdin when no path (or '-') is given.",
                )
                .arg(
                    Arg::new("input")
                        .help("Input file path, '-' for stdin")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("card")
                .about("Compose a card's ability fields")
                .long_about(
                    "Read a card as a JSON object with the fields feature, henso (disguise),\n\
                    cut-in and hirameki (inspiration), and print a JSON object with the\n\
                    annotated html, the search text and the special keys.",
                )
                .arg(
                    Arg::new("input")
                        .help("Card JSON file, '-' for stdin")
                        .required(true)
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("build-data")
                .about("Merge crawled data with override files and write the dataset")
                .arg(
                    Arg::new("source")
                        .long("source")
                        .value_name("DIR")
                        .help("Directory with <name>.json and <name>.additional*.json")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("out")
                        .long("out")
                        .value_name("DIR")
                        .help("Output directory")
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("compact")
                        .long("compact")
                        .help("Write compact JSON instead of pretty-printed")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("rules").about("Print the effective ruleset as JSON"))
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        matches.get_one::<String>("rules").map(|s| s.as_str()),
    );
    init_logging(&config.log.level);
    tracing::debug!(
        config = matches.get_one::<String>("config").map(String::as_str),
        "configuration loaded"
    );

    match matches.subcommand() {
        Some(("annotate", sub_matches)) => {
            let input = sub_matches.get_one::<String>("input").map(|s| s.as_str());
            handle_annotate_command(input, &config);
        }
        Some(("card", sub_matches)) => {
            let input = sub_matches
                .get_one::<String>("input")
                .expect("input is required");
            handle_card_command(input, &config);
        }
        Some(("build-data", sub_matches)) => {
            let options = dataset_options(sub_matches, &config);
            handle_build_data_command(&options);
        }
        Some(("rules", _)) => {
            handle_rules_command(&config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_logging(level: &str) {
    let default_directive = level
        .parse::<Directive>()
        .unwrap_or_else(|_| LevelFilter::WARN.into());
    let filter = EnvFilter::builder()
        .with_default_directive(default_directive)
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

/// Handle the annotate command
fn handle_annotate_command(input: Option<&str>, config: &CasebookConfig) {
    let annotator = build_annotator(config);
    let source = read_input(input);
    let html = annotator.annotate(source.trim_end_matches(&['\r', '\n'][..]));
    println!("{html}");
}

/// Handle the card command
fn handle_card_command(input: &str, config: &CasebookConfig) {
    let annotator = build_annotator(config);
    let source = read_input(Some(input));
    let fields: CardFields = serde_json::from_str(&source).unwrap_or_else(|e| {
        eprintln!("Invalid card JSON: {e}");
        std::process::exit(1);
    });

    let decorations = CardDecorations::from(&config.card);
    let text = compose(&annotator, &fields, &decorations);
    let output = serde_json::to_string_pretty(&text).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{output}");
}

/// Handle the build-data command
fn handle_build_data_command(options: &DatasetOptions) {
    tracing::info!(
        source = %options.source_dir.display(),
        out = %options.out_dir.display(),
        "building dataset"
    );
    let reports = dataset::build(options).unwrap_or_else(|e| {
        eprintln!("Dataset build failed: {e}");
        std::process::exit(1);
    });

    for report in &reports {
        println!("{}", report_line(report));
    }
}

/// Handle the rules command
fn handle_rules_command(config: &CasebookConfig) {
    let rules = config.ruleset().unwrap_or_else(|e| {
        eprintln!("Failed to load rules: {e}");
        std::process::exit(1);
    });
    let output = serde_json::to_string_pretty(&rules).unwrap_or_else(|e| {
        eprintln!("Serialization error: {e}");
        std::process::exit(1);
    });
    println!("{output}");
}

fn load_cli_config(explicit_path: Option<&str>, rules_path: Option<&str>) -> CasebookConfig {
    let loader = Loader::new().with_optional_file("casebook.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };
    let loader = match rules_path {
        Some(path) => loader.set_override("rules_file", path).unwrap_or_else(|err| {
            eprintln!("Invalid --rules value: {err}");
            std::process::exit(1);
        }),
        None => loader,
    };

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn build_annotator(config: &CasebookConfig) -> Annotator {
    let rules = config.ruleset().unwrap_or_else(|err| {
        eprintln!("Failed to load rules: {err}");
        std::process::exit(1);
    });
    tracing::debug!(
        source = %config
            .rules_file
            .as_deref()
            .map_or_else(|| "built-in".into(), |path| path.display().to_string()),
        bracket = rules.bracket.len(),
        brace = rules.brace.len(),
        mechanics = rules.mechanics.len(),
        "loaded ruleset"
    );
    Annotator::new(&rules).unwrap_or_else(|err| {
        eprintln!("Invalid ruleset: {err}");
        std::process::exit(1);
    })
}

fn dataset_options(matches: &ArgMatches, config: &CasebookConfig) -> DatasetOptions {
    let mut options = DatasetOptions::from(&config.dataset);
    if let Some(source) = matches.get_one::<String>("source") {
        options.source_dir = PathBuf::from(source);
    }
    if let Some(out) = matches.get_one::<String>("out") {
        options.out_dir = PathBuf::from(out);
    }
    if matches.get_flag("compact") {
        options.pretty = false;
    }
    options
}

fn read_input(path: Option<&str>) -> String {
    match path {
        None | Some("-") => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).unwrap_or_else(|e| {
                eprintln!("Error reading stdin: {e}");
                std::process::exit(1);
            });
            buffer
        }
        Some(path) => fs::read_to_string(path).unwrap_or_else(|e| {
            eprintln!("Error reading file '{path}': {e}");
            std::process::exit(1);
        }),
    }
}

fn report_line(report: &SourceReport) -> String {
    let mut line = format!("{}: {} entries", report.name, report.entries);
    if !report.merged.is_empty() {
        line.push_str(&format!(", merged {}", report.merged.join(", ")));
    }
    if !report.skipped.is_empty() {
        line.push_str(&format!(", skipped {}", report.skipped.join(", ")));
    }
    line
}
