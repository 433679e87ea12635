use anyhow::{Context, Result};
use clap::Parser;
use keycalc::calculator::{Calculator, KeyEvent, Readout, copy_to_clipboard, tokenize};
use keycalc::config::{Config, OutputFormat};
use keycalc::keymap::Keymap;
use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

/// Pocket calculator driven by key presses.
///
/// Keys are keypad labels (0-9 . + − × ÷ = AC C ⌫ +/- %), either separated
/// by spaces or packed together like `12+3×4=`. Without KEYS, scripts are
/// read from stdin one line at a time.
#[derive(Parser)]
#[command(name = "keycalc")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Key script to run
    keys: Vec<String>,

    /// Treat each word as a keyboard key name (Enter, Escape, *, ...)
    #[arg(short, long)]
    keyboard: bool,

    /// Print a readout after every key instead of once per script
    #[arg(short, long)]
    trace: bool,

    /// Output format (defaults to the config file, then text)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Turns input text into key presses and prints readouts.
struct Session {
    calculator: Calculator,
    keymap: Option<Keymap>,
    format: OutputFormat,
    show_operator: bool,
    trace: bool,
}

impl Session {
    fn parse(&self, line: &str) -> Result<Vec<KeyEvent>> {
        let Some(keymap) = &self.keymap else {
            return Ok(tokenize(line)?);
        };

        Ok(line
            .split_whitespace()
            .filter_map(|name| {
                let key = keymap.translate(name);
                if key.is_none() {
                    debug!(name, "Ignoring unbound key");
                }
                key
            })
            .collect())
    }

    fn run_line(&mut self, line: &str) -> Result<()> {
        let keys = self.parse(line)?;

        if self.trace {
            for key in keys {
                let readout = self.calculator.handle_key(key);
                self.print(&readout)?;
            }
            Ok(())
        } else {
            let readout = self.calculator.handle_keys(keys);
            self.print(&readout)
        }
    }

    fn print(&self, readout: &Readout) -> Result<()> {
        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(readout)?);
            }
            OutputFormat::Text => match readout.operator {
                Some(op) if self.show_operator => println!("{} {}", op, readout.display),
                _ => println!("{}", readout.display),
            },
        }
        Ok(())
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;

    let keymap = if cli.keyboard {
        let keymap =
            Keymap::with_overrides(&config.keys).context("Invalid key binding in config")?;
        info!(bindings = keymap.len(), "Keyboard mode");
        Some(keymap)
    } else {
        None
    };

    let mut session = Session {
        calculator: Calculator::new(),
        keymap,
        format: cli.format.unwrap_or(config.output.format),
        show_operator: config.output.show_operator,
        trace: cli.trace,
    };

    if cli.keys.is_empty() {
        for line in io::stdin().lock().lines() {
            let line = line.context("Failed to read stdin")?;
            if let Err(e) = session.run_line(&line) {
                // Keep the session alive on a bad line
                eprintln!("Error: {:#}", e);
            }
        }
    } else {
        session.run_line(&cli.keys.join(" "))?;
    }

    if cli.copy {
        let shown = session.calculator.state().display();
        copy_to_clipboard(&shown)?;
        debug!(display = %shown, "Copied display to clipboard");
    }

    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_writer(io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
