//! CLI entry point for chord-layout
//!
//! Provides command-line interface for checking, listing, exporting
//! and previewing chord layouts.

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use colored::*;
use chord_layout::{
    config::{expand_path, load_layout, write_atomic},
    core::{check, check_strict, current_output, resolve, Config, KeyId, Severity},
    export::ExportFormat,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "chord-layout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the chord layout file
    #[arg(short, long, global = true, default_value = "~/.config/chord-layout/layout.cfg")]
    layout: PathBuf,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the layout for duplicate chords and other problems
    Check {
        /// Also require a single-key chord for every physical key
        #[arg(long)]
        strict: bool,

        /// Print diagnostics as JSON
        #[arg(long)]
        json: bool,
    },

    /// List all chords in canonical form
    List,

    /// Export the layout for firmware or other tools
    Export {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = ExportFormat::Json)]
        format: ExportFormat,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Refuse to export a layout with errors
        #[arg(long)]
        strict: bool,
    },

    /// Show what each next key press completes to
    Preview {
        /// Keys currently held, e.g. LP,LR
        #[arg(short, long, value_delimiter = ',')]
        keys: Vec<KeyId>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    let path = expand_path(&cli.layout)?;

    match cli.command {
        Commands::Check { strict, json } => check_layout(&path, strict, json)?,
        Commands::List => list_chords(&path)?,
        Commands::Export {
            format,
            output,
            strict,
        } => export_layout(&path, format, output.as_deref(), strict)?,
        Commands::Preview { keys } => preview_keys(&path, &keys)?,
    }

    Ok(())
}

/// Installs the stderr log subscriber
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Read and parse the layout, with the path in any error
fn load(path: &Path) -> anyhow::Result<Config> {
    load_layout(path).with_context(|| format!("Failed to load layout {}", path.display()))
}

/// Check layout for problems
fn check_layout(path: &Path, strict: bool, json: bool) -> anyhow::Result<()> {
    let config = load(path)?;
    let report = if strict {
        check_strict(&config)
    } else {
        check(&config)
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        if report.has_errors() {
            std::process::exit(1);
        }
        return Ok(());
    }

    println!("{} Checking layout: {}", "→".cyan(), path.display());
    println!("{} Found {} chords\n", "✓".green(), config.len());

    if report.is_clean() {
        println!("{} {}", "✓".green().bold(), "No problems detected!".bold());
        return Ok(());
    }

    for diagnostic in &report.diagnostics {
        let label = match diagnostic.severity {
            Severity::Error => "error".red().bold(),
            Severity::Warning => "warning".yellow().bold(),
        };
        let lines = if diagnostic.lines.is_empty() {
            String::new()
        } else {
            let lines = diagnostic
                .lines
                .iter()
                .map(|l| l.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!(" {}", format!("(line {})", lines).dimmed())
        };

        println!("{}: {}{}", label, diagnostic.message, lines);
    }

    let errors = report.errors().count();
    let warnings = report.warnings().count();
    println!(
        "\n{} error{}, {} warning{}",
        errors,
        if errors == 1 { "" } else { "s" },
        warnings,
        if warnings == 1 { "" } else { "s" },
    );

    if errors > 0 {
        println!("{}", "⚠ Chords with errors are ambiguous and must not be exported!".yellow());
        std::process::exit(1);
    }

    Ok(())
}

/// List all chords in the layout
fn list_chords(path: &Path) -> anyhow::Result<()> {
    let config = load(path)?;

    println!("{}", format!("Chords from: {}\n", path.display()).bold());

    let index = config.index();
    for chord in config.chords() {
        let marker = if index.has_collision(&chord.keys) {
            "⚠".red().bold()
        } else {
            " ".normal()
        };
        println!(
            "{} {} {} {} {}",
            format!("{:>4}", chord.line).dimmed(),
            marker,
            format!("{:<8}", chord.keys.to_string()).cyan().bold(),
            "→".dimmed(),
            chord.output.green(),
        );
    }

    println!(
        "\n{} Total: {} chords, {} distinct key sets",
        "✓".green(),
        config.len(),
        index.distinct_chords()
    );

    Ok(())
}

/// Export the layout in the selected format
fn export_layout(
    path: &Path,
    format: ExportFormat,
    output: Option<&Path>,
    strict: bool,
) -> anyhow::Result<()> {
    let config = load(path)?;

    if strict {
        let report = check(&config);
        if report.has_errors() {
            for diagnostic in report.errors() {
                eprintln!("{}: {}", "error".red().bold(), diagnostic.message);
            }
            anyhow::bail!("Layout has {} error(s); refusing to export", report.errors().count());
        }
    }

    let rendered = format.render(&config)?;

    match output {
        Some(output) => {
            let output = expand_path(output)?;
            write_atomic(&output, &rendered)?;
            eprintln!("{} Wrote {}", "✓".green(), output.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Show the next-key preview for the held keys
fn preview_keys(path: &Path, keys: &[KeyId]) -> anyhow::Result<()> {
    let config = load(path)?;

    let preview = resolve(&config, keys.iter().copied())?;
    let current = current_output(&config, keys.iter().copied())?;

    let held = keys.iter().map(|k| k.to_string()).collect::<Vec<_>>().join("+");
    println!(
        "{} {}",
        "Held:".bold(),
        if held.is_empty() { "(none)".dimmed() } else { held.cyan() }
    );

    for (key, output) in KeyId::ALL.iter().zip(preview.iter()) {
        let slot = if keys.contains(key) {
            "held".dimmed()
        } else {
            match output {
                Some(output) => output.green(),
                None => "·".dimmed(),
            }
        };
        println!("  {} {}", key.to_string().cyan(), slot);
    }

    match current {
        Some(output) => println!("{} {}", "Current chord outputs:".bold(), output.green().bold()),
        None => println!("{} {}", "Current chord outputs:".bold(), "nothing".dimmed()),
    }

    Ok(())
}
