//! placefmt CLI - format a pattern from the command line

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use placefmt::{tokenize, Catalog, Engine, Value};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Write};
#[cfg(feature = "cli")]
use std::process::ExitCode;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "placefmt")]
#[command(version)]
#[command(about = "Format a placeholder pattern with positional arguments", long_about = None)]
struct Cli {
    /// Pattern, e.g. "{} is {:%.1f} km away"
    pattern: String,

    /// Positional arguments
    args: Vec<String>,

    /// Parse each argument as JSON (numbers, booleans, null, strings)
    #[arg(long)]
    json: bool,

    /// Load expression namespaces from a TOML catalog
    #[arg(long, value_name = "FILE")]
    catalog: Option<String>,

    /// Print the lexer tokens as JSON instead of formatting
    #[arg(long)]
    tokens: bool,

    /// Exit with an error instead of printing the error as output
    #[arg(long)]
    strict: bool,
}

#[cfg(feature = "cli")]
fn parse_args(raw: &[String], json: bool) -> Result<Vec<Value>, String> {
    if !json {
        return Ok(raw.iter().map(Value::from).collect());
    }
    raw.iter()
        .map(|arg| {
            serde_json::from_str::<serde_json::Value>(arg)
                .map(Value::from)
                .map_err(|e| format!("argument {:?} is not valid JSON: {}", arg, e))
        })
        .collect()
}

#[cfg(feature = "cli")]
fn build_engine(catalog: Option<&str>) -> Result<Engine, String> {
    let mut engine = Engine::new();
    if let Some(path) = catalog {
        let source =
            fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path, e))?;
        let catalog = Catalog::from_toml_str(&source)
            .map_err(|e| format!("invalid catalog {}: {}", path, e))?;
        catalog.apply(&mut engine);
    }
    Ok(engine)
}

#[cfg(feature = "cli")]
fn run(cli: &Cli) -> Result<String, String> {
    if cli.tokens {
        let tokens = tokenize(&cli.pattern).map_err(|e| e.to_string())?;
        return serde_json::to_string_pretty(&tokens).map_err(|e| e.to_string());
    }

    let engine = build_engine(cli.catalog.as_deref())?;
    let args = parse_args(&cli.args, cli.json)?;

    if cli.strict {
        engine
            .try_format(&cli.pattern, &args)
            .map_err(|e| e.to_string())
    } else {
        Ok(engine.format(&cli.pattern, &args))
    }
}

#[cfg(feature = "cli")]
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            let mut stdout = io::stdout().lock();
            if writeln!(stdout, "{}", output).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install placefmt --features cli");
    eprintln!("  placefmt [OPTIONS] <PATTERN> [ARGS]...");
}
