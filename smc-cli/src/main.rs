//! Command-line interface for smc
//! This binary compiles `.sm` state machine descriptions into code with one of the registered
//! backends.
//!
//! Prints the path of every written file on stdout.
//!
//! Usage:
//!   smc `<input.sm>` [-o `<dir>`] [-b `<backend>`] [--debug] [--force] [--config `<file>`] [-v]
//!   smc --list-backends                                  - List all available backends
//!
//! Settings come from the embedded defaults, then `smc.toml` beside the input, then
//! `--config`, then the flags. Logging goes to
//! stderr and is controlled by `-v`/`-vv` or the `SMC_LOG` environment variable.

mod driver;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use driver::{DriverError, Job, Outcome};
use smc_codegen::BackendRegistry;
use smc_config::Loader;
use smc_parser::smc::error::format_source_context;
use smc_parser::smc::lexing::parse_line_marker;
use smc_parser::smc::loader::LoaderError;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    Command::new("smc")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compile state machine descriptions into State pattern code")
        .arg_required_else_help(true)
        .arg(
            Arg::new("input")
                .help("Path to the .sm file")
                .required_unless_present("list-backends")
                .value_parser(value_parser!(PathBuf))
                .index(1),
        )
        .arg(
            Arg::new("output")
                .long("output")
                .short('o')
                .help("Directory for generated files (default: the input's directory)")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("backend")
                .long("backend")
                .short('b')
                .help("Code generation backend (default: cpp, see --list-backends)"),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Annotate generated code with source lines and guard numbers")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("force")
                .long("force")
                .help("Regenerate even if the outputs are newer than the input")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("TOML file layered over the built-in defaults")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("More logging on stderr (-v info, -vv debug)")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("list-backends")
                .long("list-backends")
                .help("List available code generation backends")
                .action(ArgAction::SetTrue),
        )
}

fn main() -> ExitCode {
    let matches = cli().get_matches();
    init_logging(matches.get_count("verbose"));

    let registry = BackendRegistry::with_defaults();
    if matches.get_flag("list-backends") {
        handle_list_backends_command(&registry);
        return ExitCode::SUCCESS;
    }

    let Some(input) = matches.get_one::<PathBuf>("input") else {
        eprintln!("error: no input file");
        return ExitCode::FAILURE;
    };

    match handle_compile_command(input, &matches, &registry) {
        Ok(Outcome::Generated(paths)) => {
            for path in paths {
                println!("{}", path.display());
            }
            ExitCode::SUCCESS
        }
        Ok(Outcome::UpToDate) => ExitCode::SUCCESS,
        Err(err) => {
            report(input, &err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_env("SMC_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Handle the compile command
fn handle_compile_command(
    input: &Path,
    matches: &ArgMatches,
    registry: &BackendRegistry,
) -> Result<Outcome, DriverError> {
    let project_dir = match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut loader = Loader::new().with_project_dir(project_dir);
    if let Some(path) = matches.get_one::<PathBuf>("config") {
        loader = loader.with_file(path);
    }
    if let Some(backend) = matches.get_one::<String>("backend") {
        loader = loader.set_override("generator.backend", backend.as_str())?;
    }
    if matches.get_flag("debug") {
        loader = loader.set_override("generator.debug", true)?;
    }
    if matches.get_flag("force") {
        loader = loader.set_override("generator.force", true)?;
    }
    let config = loader.build()?;

    let job = Job {
        input: input.to_path_buf(),
        output_dir: matches.get_one::<PathBuf>("output").cloned(),
        backend: config.generator.backend.clone(),
        force: config.generator.force,
        options: config.generate_options(),
    };
    driver::run(&job, registry)
}

/// Print the error, with the offending lines for syntax errors in the input itself
fn report(input: &Path, err: &DriverError) {
    eprintln!("error: {}", err);

    let DriverError::Load(LoaderError::Syntax(syntax)) = err else {
        return;
    };
    let in_input = syntax
        .location
        .path
        .as_deref()
        .map_or(true, |path| path == input);
    if !in_input {
        return;
    }
    let Ok(source) = fs::read_to_string(input) else {
        return;
    };
    // Marker-adjusted lines do not index the file on disk.
    if !has_line_markers(&source) {
        eprint!("{}", format_source_context(&source, syntax.line()));
    }
}

fn has_line_markers(source: &str) -> bool {
    source
        .lines()
        .any(|line| parse_line_marker(line.trim_start()).is_some())
}

/// Handle the list-backends command
fn handle_list_backends_command(registry: &BackendRegistry) {
    println!("Available backends:\n");
    for (name, description) in registry.descriptions() {
        println!("  {}", name);
        println!("    {}", description);
        println!();
    }
}
