// Entry point: builds a choice list from arguments or JSON, then either
// prints it once (--print) or runs the interactive session and prints the
// checked values as JSON.

use clap::Parser;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;
use tickbox::run::{Session, run};
use tickbox::{Checkbox, ChoiceError, Choices, Options};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(name = "tickbox", version, about = "Pick values from a checklist in the terminal")]
struct Cli {
    /// Choices to list; ignored when --json is given
    choices: Vec<String>,

    /// JSON array of choices (strings or objects); "-" reads stdin
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,

    /// JSON options file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "Choose")]
    message: String,

    /// Add "all" and "none" rows
    #[arg(long)]
    radio: bool,

    /// Print checked choices as objects instead of values
    #[arg(long)]
    objects: bool,

    /// Rows shown before paginating
    #[arg(long)]
    limit: Option<usize>,

    #[arg(long)]
    pointer: Option<String>,

    /// Hide the checkbox glyphs
    #[arg(long)]
    no_symbols: bool,

    /// Check a choice by key before starting (repeatable)
    #[arg(long = "check", value_name = "KEY")]
    check: Vec<String>,

    /// Render the list once and print the checked values without prompting
    #[arg(long)]
    print: bool,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn read_json(path: &Path) -> Result<Value, ChoiceError> {
    let mut raw = String::new();
    let res = if path == Path::new("-") {
        std::io::stdin().read_to_string(&mut raw)
    } else {
        std::fs::File::open(path).and_then(|mut f| f.read_to_string(&mut raw))
    };
    res.map_err(|source| ChoiceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok(serde_json::from_str(&raw)?)
}

fn build(cli: &Cli) -> Result<Choices, ChoiceError> {
    let mut options = match &cli.config {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };
    options.radio |= cli.radio;
    options.objects |= cli.objects;
    if cli.limit.is_some() {
        options.limit = cli.limit;
    }
    if cli.pointer.is_some() {
        options.pointer = cli.pointer.clone();
    }
    if cli.no_symbols {
        options.checkbox = Checkbox::Hidden;
    }
    debug!(?options, "options resolved");

    let mut choices = match &cli.json {
        Some(path) => Choices::from_json(read_json(path)?, options)?,
        None => Choices::new(cli.choices.iter().map(String::as_str), options)?,
    };
    if !cli.check.is_empty() {
        choices.check(cli.check.clone());
    }
    Ok(choices)
}

fn print_checked(choices: &Choices) -> Result<(), ChoiceError> {
    println!("{}", serde_json::to_string(&Value::Array(choices.checked()))?);
    Ok(())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    let mut choices = match build(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    };

    if cli.print {
        println!("? {}{}", cli.message, choices.render(0));
        if let Err(e) = print_checked(&choices) {
            eprintln!("{e}");
            process::exit(2);
        }
        return;
    }

    match run(Session::new(cli.message, choices)).await {
        Ok(Some(done)) => {
            if let Err(e) = print_checked(&done) {
                eprintln!("{e}");
                process::exit(2);
            }
        }
        Ok(None) => process::exit(1),
        Err(e) => {
            eprintln!("{e}");
            process::exit(2);
        }
    }
}
