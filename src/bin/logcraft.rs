//! Command-line interface for logcraft
//! This binary expands directive comments in Python sources into logging
//! statements.
//!
//! Usage:
//!   logcraft expand `<path>` [-o `<output>`]              - Expand a whole file
//!   logcraft extract `<path>` --from `<n>` --to `<m>`     - Expand one annotated definition
//!   logcraft tokens `<path>`                              - Dump the positioned token stream

use std::fs;
use std::path::Path;

use clap::{Arg, ArgAction, ArgMatches, Command};

use logcraft::{
    expand_definition, expand_file, DeclarationSpan, ExpandConfig, ExpandOptions, FileSource,
    SourceProvider,
};

fn main() {
    let matches = Command::new("logcraft")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Expands directive comments into logging statements")
        .arg_required_else_help(true)
        .subcommand(
            Command::new("expand")
                .about("Rewrite the directive comments of a whole file")
                .arg(source_arg())
                .args(options_args())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .help("Write the result here instead of stdout"),
                ),
        )
        .subcommand(
            Command::new("extract")
                .about("Expand one annotated definition given by its line span")
                .arg(source_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("First line of the definition, 1-based, the marker line")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Last line of the definition, 1-based, inclusive")
                        .required(true)
                        .value_parser(clap::value_parser!(u32)),
                )
                .args(options_args()),
        )
        .subcommand(
            Command::new("tokens")
                .about("Dump the positioned token stream as JSON")
                .arg(source_arg()),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("expand", sub)) => handle_expand_command(sub),
        Some(("extract", sub)) => handle_extract_command(sub),
        Some(("tokens", sub)) => handle_tokens_command(sub),
        _ => unreachable!("arg_required_else_help guarantees a subcommand"),
    }
}

fn source_arg() -> Arg {
    Arg::new("path")
        .help("Path to the source file")
        .required(true)
        .index(1)
}

fn options_args() -> Vec<Arg> {
    vec![
        Arg::new("config")
            .long("config")
            .short('c')
            .help("Path to a YAML configuration file"),
        Arg::new("logger")
            .long("logger")
            .help("Receiver of the logging calls (default: logging)"),
        Arg::new("callable")
            .long("callable")
            .help("Callable invoked by the bare directive (default: print)"),
        Arg::new("echo")
            .long("echo")
            .help("Echo the original and expanded text to stderr")
            .action(ArgAction::SetTrue),
    ]
}

/// Resolve config file and flag overrides into pipeline options.
fn resolve_options(matches: &ArgMatches) -> ExpandOptions {
    let mut options = match matches.get_one::<String>("config") {
        Some(path) => ExpandConfig::load(Path::new(path))
            .unwrap_or_else(|e| {
                eprintln!("Configuration error: {}", e);
                std::process::exit(1);
            })
            .into_options(),
        None => ExpandOptions::default(),
    };
    if let Some(logger) = matches.get_one::<String>("logger") {
        options.bindings.logger = logger.clone();
    }
    if let Some(callable) = matches.get_one::<String>("callable") {
        options.bindings.callable = callable.clone();
    }
    if matches.get_flag("echo") {
        options.echo = true;
    }
    options
}

fn read_source(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {}", path, e);
        std::process::exit(1);
    })
}

/// Handle the expand command
fn handle_expand_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").expect("path is required");
    let options = resolve_options(matches);
    let source = read_source(path);
    let expanded = expand_file(&source, &options).unwrap_or_else(|e| {
        eprintln!("Expansion error in {}: {}", path, e);
        std::process::exit(1);
    });
    match matches.get_one::<String>("output") {
        Some(output) => {
            if let Err(e) = fs::write(output, expanded) {
                eprintln!("Cannot write {}: {}", output, e);
                std::process::exit(1);
            }
        }
        None => print!("{}", expanded),
    }
}

/// Handle the extract command
fn handle_extract_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").expect("path is required");
    let from = *matches.get_one::<u32>("from").expect("from is required");
    let to = *matches.get_one::<u32>("to").expect("to is required");
    if from > to {
        eprintln!("Invalid span: --from {} is past --to {}", from, to);
        std::process::exit(1);
    }
    let options = resolve_options(matches);
    let span = DeclarationSpan::new(path, from, to);
    let captured = FileSource.retrieve(&span).unwrap_or_else(|e| {
        eprintln!("Cannot read {}: {}", path, e);
        std::process::exit(1);
    });
    let expanded = expand_definition(&captured, &options).unwrap_or_else(|e| {
        eprintln!("Expansion error in {}:{}..{}: {}", path, from, to, e);
        std::process::exit(1);
    });
    print!("{}", expanded);
}

/// Handle the tokens command
fn handle_tokens_command(matches: &ArgMatches) {
    let path = matches.get_one::<String>("path").expect("path is required");
    let source = read_source(path);
    let tokens = logcraft::lexing::lex(&source).unwrap_or_else(|e| {
        eprintln!("Lex error in {}: {}", path, e);
        std::process::exit(1);
    });
    let json = serde_json::to_string_pretty(&tokens).unwrap_or_else(|e| {
        eprintln!("Error formatting tokens: {}", e);
        std::process::exit(1);
    });
    println!("{}", json);
}
