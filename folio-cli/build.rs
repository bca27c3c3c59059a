use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the transforms from src/transforms.rs
// We need to duplicate this here since build scripts can't access src/ modules
const AVAILABLE_TRANSFORMS: &[&str] = &["document-json", "events", "normalized"];

fn files_arg() -> Arg {
    Arg::new("files")
        .help("Manuscript files (.txt)")
        .required(true)
        .num_args(1..)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    println!("cargo:rerun-if-changed=build.rs");

    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A tool for normalizing manuscripts and compiling them to LaTeX")
        .arg_required_else_help(true)
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
                .arg(files_arg()),
        )
        .subcommand(
            Command::new("compile")
                .about("Compile canonical manuscripts into XeLaTeX")
                .arg(files_arg())
                .arg(Arg::new("font-name").long("font-name").value_name("FONT"))
                .arg(
                    Arg::new("fallback-font-name")
                        .long("fallback-font-name")
                        .value_name("FONT"),
                )
                .arg(
                    Arg::new("title-font-name")
                        .long("title-font-name")
                        .value_name("FONT"),
                )
                .arg(Arg::new("font-size").long("font-size").value_name("PT")),
        )
        .subcommand(
            Command::new("inspect")
                .about("Inspect intermediate representations of a manuscript")
                .arg(
                    Arg::new("path")
                        .help("Path to the manuscript")
                        .index(1)
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("transform")
                        .help("View to print")
                        .value_parser(clap::builder::PossibleValuesParser::new(
                            AVAILABLE_TRANSFORMS,
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
        );

    // Generate completions for bash
    generate_to(Bash, &mut cmd, "folio", &outdir)?;

    // Generate completions for zsh
    generate_to(Zsh, &mut cmd, "folio", &outdir)?;

    // Generate completions for fish
    generate_to(Fish, &mut cmd, "folio", &outdir)?;

    Ok(())
}
