// Command-line interface for folio
//
// This binary turns plain-text manuscripts into typeset books. The work happens in two stages,
// both provided by the folio-babel crate:
//
//  1. normalize: a raw manuscript (blank lines, hard-wrapped sentences, ambiguous quotes) is
//     rewritten into canonical text, one paragraph per line.
//  2. compile: canonical text is compiled into a XeLaTeX document.
//
// Usage:
//  folio <files...>                    - Compile each file (default)
//  folio compile <files...> [--font-name <font>] ...  - Same as above (explicit)
//  folio normalize <files...>          - Normalize each file into <stem>.new.txt
//  folio inspect <path> [<transform>]  - Print an intermediate view (defaults to "document-json")
//
// Every file in a batch is converted independently. A failing file is reported and the batch
// moves on; the exit status is non-zero if any file failed.
//
// Settings come from the embedded defaults, then ./folio.toml, then --config, then flags.

mod transforms;

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use folio_babel::batch::{run_batch, BatchReport};
use folio_config::{ConfigError, FolioConfig, Loader};
use std::fs;

const SUBCOMMANDS: &[&str] = &["normalize", "compile", "inspect", "help"];

fn files_arg() -> Arg {
    Arg::new("files")
        .help("Manuscript files (.txt)")
        .required(true)
        .num_args(1..)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for normalizing manuscripts and compiling them to LaTeX")
        .long_about(
            "folio is a command-line tool for turning plain-text manuscripts into books.\n\n\
            Commands:\n  \
            - normalize: Rewrite raw manuscripts into canonical text\n  \
            - compile:   Compile canonical text into XeLaTeX (default command)\n  \
            - inspect:   View intermediate representations\n\n\
            Examples:\n  \
            folio normalize draft.txt              # Writes draft.new.txt\n  \
            folio draft.new.txt                    # Writes draft.new.tex\n  \
            folio compile *.txt --font-size 12     # Compile a batch with a smaller font\n  \
            folio inspect book.txt events          # View the event stream",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a folio.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("normalize")
                .about("Normalize raw manuscripts into canonical text")
                .long_about(
                    "Rewrite raw manuscripts into canonical text.\n\n\
                    Blank lines are dropped, hard-wrapped sentences are joined, runs of\n\
                    whitespace collapse to one space and quotation marks are paired.\n\
                    Each input <stem>.txt is written to <stem>.new.txt.",
                )
                .arg(files_arg()),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile canonical manuscripts into XeLaTeX (default command)")
                .long_about(
                    "Compile canonical manuscripts into XeLaTeX documents.\n\n\
                    Each input <stem>.txt is written to <stem>.tex. The output is only put\n\
                    in place when the whole file compiled; on failure the partial output\n\
                    stays in <stem>.tex.part.\n\n\
                    Examples:\n  \
                    folio compile book.txt\n  \
                    folio compile book.txt --font-name \"Noto Serif CJK SC\" --font-size 12\n  \
                    folio book.txt                         # 'compile' is optional",
                )
                .arg(files_arg())
                .arg(
                    Arg::new("font-name")
                        .long("font-name")
                        .value_name("FONT")
                        .help("CJK body font"),
                )
                .arg(
                    Arg::new("fallback-font-name")
                        .long("fallback-font-name")
                        .value_name("FONT")
                        .help("Font for glyphs missing from the body font"),
                )
                .arg(
                    Arg::new("title-font-name")
                        .long("title-font-name")
                        .value_name("FONT")
                        .help("CJK font for the title page and headings"),
                )
                .arg(
                    Arg::new("font-size")
                        .long("font-size")
                        .value_name("PT")
                        .help("Base font size in points")
                        .value_parser(clap::value_parser!(u32).range(1..)),
                ),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate representations of a manuscript")
                .arg(
                    Arg::new("path")
                        .help("Path to the manuscript")
                        .required_unless_present("list-transforms")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("View to print. Defaults to 'document-json'")
                        .required(false)
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            transforms::AVAILABLE_TRANSFORMS,
                        ))
                        .index(2)
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("list-transforms")
                        .long("list-transforms")
                        .help("List available views")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = std::env::args().collect();

    // Bare file arguments mean "compile"
    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            let Some(index) = first_positional(&args) else {
                e.exit();
            };
            if SUBCOMMANDS.contains(&args[index].as_str()) {
                e.exit();
            }
            let mut new_args = vec![args[0].clone(), "compile".to_string()];
            new_args.extend_from_slice(&args[1..]);
            match cli.try_get_matches_from(&new_args) {
                Ok(m) => m,
                Err(e2) => e2.exit(),
            }
        }
    };

    let config_path = matches.get_one::<String>("config").map(|s| s.as_str());

    match matches.subcommand() {
        Some(("normalize", sub_matches)) => {
            let config = load_cli_config(config_path, None);
            let files = collect_files(sub_matches);
            exit_with(run_batch(&files, &config.normalize_job()));
        }
        Some(("compile", sub_matches)) => {
            let config = load_cli_config(config_path, Some(sub_matches));
            let files = collect_files(sub_matches);
            exit_with(run_batch(&files, &config.compile_job()));
        }
        Some(("inspect", sub_matches)) => {
            if sub_matches.get_flag("list-transforms") {
                handle_list_transforms_command();
                return;
            }
            let Some(path) = sub_matches.get_one::<String>("path") else {
                eprintln!("Error: inspect needs a manuscript path");
                std::process::exit(2);
            };
            let transform = sub_matches
                .get_one::<String>("transform")
                .map(|s| s.as_str())
                .unwrap_or(transforms::DEFAULT_TRANSFORM);
            handle_inspect_command(path, transform);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

/// Index of the first argument that is neither a flag nor the value of `--config`.
fn first_positional(args: &[String]) -> Option<usize> {
    let mut index = 1;
    while index < args.len() {
        let arg = &args[index];
        if arg == "--config" {
            index += 2;
        } else if arg.starts_with('-') {
            index += 1;
        } else {
            return Some(index);
        }
    }
    None
}

fn collect_files(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("files")
        .map(|files| files.cloned().collect())
        .unwrap_or_default()
}

fn exit_with(report: BatchReport) {
    log::info!(
        "{} converted, {} skipped, {} failed",
        report.converted.len(),
        report.skipped.len(),
        report.failed.len()
    );
    if !report.is_success() {
        std::process::exit(1);
    }
}

/// Handle the inspect command
fn handle_inspect_command(path: &str, transform: &str) {
    let source = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    });

    let output = transforms::execute_transform(&source, transform).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    });

    print!("{output}");
}

fn handle_list_transforms_command() {
    println!("Available transforms:");
    for transform_name in transforms::AVAILABLE_TRANSFORMS {
        println!("  {transform_name}");
    }
}

/// Layers ./folio.toml, then `--config`, then the compile flags over the built-in defaults.
fn load_cli_config(explicit_path: Option<&str>, compile_flags: Option<&ArgMatches>) -> FolioConfig {
    let loader = Loader::new().with_optional_file("folio.toml");
    let loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    let loader = match compile_flags {
        Some(matches) => apply_flag_overrides(loader, matches),
        None => Ok(loader),
    };
    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}

fn apply_flag_overrides(mut loader: Loader, matches: &ArgMatches) -> Result<Loader, ConfigError> {
    for (flag, key) in [
        ("font-name", "latex.main_font"),
        ("fallback-font-name", "latex.fallback_font"),
        ("title-font-name", "latex.heading_font"),
    ] {
        if let Some(value) = matches.get_one::<String>(flag) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }
    if let Some(size) = matches.get_one::<u32>("font-size") {
        loader = loader.set_override("latex.font_size", i64::from(*size))?;
    }
    Ok(loader)
}
