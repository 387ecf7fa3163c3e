//! # jaspresults
//!
//! A CLI for rendering and building analysis results tables.
//!
//! ## Overview
//!
//! jaspresults is built on top of jaspresultslib. It restores table and plot
//! snapshots and prints them, and it builds tables from JSON operation
//! scripts, which makes it handy for inspecting cached results and for
//! trying out the mutation engine by hand.
//!
//! ## Usage
//!
//! ```bash
//! # Render a cached table snapshot as text
//! jaspresults render table.json
//!
//! # Same, as HTML, reading the snapshot from stdin
//! cat table.json | jaspresults render - --output html
//!
//! # Build a table from a script and keep its snapshot
//! jaspresults build ops.json --output snapshot > table.json
//!
//! # Display document with a nested name
//! jaspresults build ops.json -o document --name descriptives_table
//! ```

use std::io::Read;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use console::style;
use jaspresultslib::{OutputFormat, RenderOptions};
use log::LevelFilter;

mod render;

/// Input argument that reads from stdin
const STDIN_ARG: &str = "-";

/// Arguments shared by every subcommand
fn output_args() -> [Arg; 3] {
    [
        Arg::new("output")
            .short('o')
            .long("output")
            .default_value("text")
            .value_parser(["text", "html", "document", "snapshot"])
            .help("Output format"),
        Arg::new("prefix")
            .long("prefix")
            .help("Prefix for every line of text output"),
        Arg::new("name")
            .long("name")
            .help("Nested name written into display documents"),
    ]
}

/// Build the clap Command structure
fn build_command() -> Command {
    Command::new("jaspresults")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Render and build analysis results tables")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .global(true)
                .help("Increase log verbosity (-v info, -vv debug, -vvv trace)"),
        )
        .subcommand(
            Command::new("render")
                .about("Restore a table or plot snapshot and print it")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Snapshot file, or - for stdin"),
                )
                .args(output_args()),
        )
        .subcommand(
            Command::new("build")
                .about("Run an operation script on a fresh table and print it")
                .arg(
                    Arg::new("input")
                        .required(true)
                        .help("Script file, or - for stdin"),
                )
                .args(output_args()),
        )
}

/// Map the number of -v flags to a log level
fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(level_for(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

/// Read a file, or stdin for `-`
fn read_input(path: &str) -> anyhow::Result<String> {
    if path == STDIN_ARG {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read stdin")?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read '{}'", path))
}

/// Extract render options from matches
fn render_options(matches: &ArgMatches) -> anyhow::Result<RenderOptions> {
    let format: OutputFormat = matches
        .get_one::<String>("output")
        .map(|s| s.as_str())
        .unwrap_or("text")
        .parse()
        .map_err(anyhow::Error::msg)?;
    let prefix = matches.get_one::<String>("prefix").cloned().unwrap_or_default();
    let name = matches.get_one::<String>("name").cloned().unwrap_or_default();

    Ok(RenderOptions::new().format(format).prefix(prefix).name(name))
}

fn input_arg(matches: &ArgMatches) -> &str {
    matches
        .get_one::<String>("input")
        .map(|s| s.as_str())
        .unwrap_or(STDIN_ARG)
}

/// Handler for render command
fn render_handler(matches: &ArgMatches) -> anyhow::Result<String> {
    let options = render_options(matches)?;
    let json = read_input(input_arg(matches))?;
    render::render_snapshot(&json, &options)
}

/// Handler for build command
fn build_handler(matches: &ArgMatches) -> anyhow::Result<String> {
    let options = render_options(matches)?;
    let script = read_input(input_arg(matches))?;
    render::build_table(&script, &options)
}

fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("render", sub)) => render_handler(sub),
        Some(("build", sub)) => build_handler(sub),
        Some((other, _)) => Err(anyhow::anyhow!("unknown command '{}'", other)),
        None => Err(anyhow::anyhow!("no command given")),
    }
}

fn main() -> ExitCode {
    let matches = build_command().get_matches();
    init_logging(matches.get_count("verbose"));

    match run(&matches) {
        Ok(output) => {
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{} {:#}", style("Error:").red().bold().for_stderr(), e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_is_valid() {
        build_command().debug_assert();
    }

    #[test]
    fn test_level_for_verbosity() {
        assert_eq!(level_for(0), LevelFilter::Warn);
        assert_eq!(level_for(2), LevelFilter::Debug);
        assert_eq!(level_for(9), LevelFilter::Trace);
    }

    #[test]
    fn test_render_options_from_args() {
        let matches = build_command().get_matches_from([
            "jaspresults",
            "build",
            "ops.json",
            "-o",
            "document",
            "--name",
            "anova_table",
        ]);
        let (_, sub) = matches.subcommand().unwrap();
        let options = render_options(sub).unwrap();
        assert_eq!(options.format, OutputFormat::Document);
        assert_eq!(options.name, "anova_table");
        assert_eq!(input_arg(sub), "ops.json");
    }
}
