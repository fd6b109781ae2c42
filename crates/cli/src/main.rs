mod render;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fleet_sim_core::{Notifier, Session, SimulationReport, interpret};
use fleet_sim_diagnostics::{self as diag, Severity};
use fleet_sim_inventory::{
    Equipment, FileSource, InventoryCache, InventoryConfig, RetryConfig, import_inventory_file,
};

use crate::render::{Format, Outcome, print_json, print_ledger, print_tally, render_outcome};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "fleetsim",
    version,
    about = "Forklift fleet simulator: check and simulate movement commands like F10R90L90B5"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Interpret a command without recording it.
    Check { command: String },

    /// Run commands through one session and print the resulting ledger.
    Simulate {
        /// Inventory JSON or CSV file. Without it every run records unknown equipment.
        #[arg(long)]
        inventory: Option<PathBuf>,
        /// Model number of the forklift to drive.
        #[arg(long)]
        equipment: Option<String>,
        /// Commands, simulated in order.
        #[arg(required = true)]
        commands: Vec<String>,
    },

    /// Import and normalize an inventory file (.json or .csv).
    Inventory { file: PathBuf },

    /// Explain a diagnostic ID (e.g. FSM2003).
    Explain { id: String },
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    let format = Format::resolve_or_detect(cli.output.as_deref());

    match run(cli.cmd, format) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            report_failure(&err, format);
            process::exit(1);
        }
    }
}

/// Returns `Ok(false)` when the command ran but rejected its input.
fn run(cmd: Cmd, format: Format) -> Result<bool> {
    match cmd {
        Cmd::Check { command } => cmd_check(&command, format),
        Cmd::Simulate {
            inventory,
            equipment,
            commands,
        } => cmd_simulate(inventory.as_deref(), equipment, &commands, format),
        Cmd::Inventory { file } => cmd_inventory(&file, format),
        Cmd::Explain { id } => cmd_explain(&id, format),
    }
}

fn report_failure(err: &anyhow::Error, format: Format) {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            if print_json(&out).is_err() {
                eprintln!("error: {err:#}");
            }
        }
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn cmd_check(command: &str, format: Format) -> Result<bool> {
    let result = interpret(command);

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": result.ok,
                "message": result.error.map(|e| e.user_message()),
                "actions": result.actions,
                "diagnostics": result.diagnostics,
            });
            print_json(&out)?;
        }
        Format::Pretty => render_outcome(&Outcome::checked(command, &result)),
    }

    Ok(result.ok)
}

fn cmd_simulate(
    inventory_path: Option<&Path>,
    equipment: Option<String>,
    commands: &[String],
    format: Format,
) -> Result<bool> {
    let inventory = match inventory_path {
        Some(path) => load_inventory(path)?,
        None => Vec::new(),
    };

    let mut session = Session::new();
    if let Some(model) = equipment {
        session.select_equipment(model);
    }

    let mut notifier = StderrNotifier { format };
    let mut reports: Vec<SimulationReport> = Vec::with_capacity(commands.len());
    for command in commands {
        session.set_command_text(command.as_str());
        let report = session.simulate(&inventory, &mut notifier);
        if format == Format::Pretty {
            let actions = report
                .run_id
                .and_then(|_| session.ledger().latest())
                .map_or(&[][..], |run| run.actions.as_slice());
            render_outcome(&Outcome::simulated(command, &report, actions));
        }
        reports.push(report);
    }

    let all_ok = reports.iter().all(|r| r.ok);
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "ok": all_ok,
                "reports": reports,
                "ledger": session.ledger(),
            });
            print_json(&out)?;
        }
        Format::Pretty => {
            print_tally(session.ledger().len(), commands.len());
            print_ledger(session.ledger());
        }
    }

    Ok(all_ok)
}

/// Read an inventory file through the snapshot cache.
///
/// A local file either exists or not, so the cache makes a single attempt.
fn load_inventory(path: &Path) -> Result<Vec<Equipment>> {
    let config = InventoryConfig::default().with_retry(RetryConfig::immediate(1));
    let mut cache = InventoryCache::new(FileSource::new(path), config);
    let records = cache
        .get()
        .with_context(|| format!("failed to load inventory '{}'", path.display()))?;
    Ok(records.to_vec())
}

fn cmd_inventory(file: &Path, format: Format) -> Result<bool> {
    let records = import_inventory_file(file)
        .with_context(|| format!("failed to import inventory '{}'", file.display()))?;

    match format {
        Format::Json => print_json(&records)?,
        Format::Pretty => {
            for e in &records {
                println!("{}\t{}\t{}", e.model_number, e.name, e.manufacturing_date);
            }
            eprintln!("{} record(s)", records.len());
        }
    }
    Ok(true)
}

fn cmd_explain(id: &str, format: Format) -> Result<bool> {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "explanation": diag::explain(id),
            });
            print_json(&out)?;
        }
        Format::Pretty => {
            // Explanation is the expected output, so it goes to stdout.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{}: (no explanation available)", id);
            }
        }
    }
    Ok(true)
}

// ── Notifications ───────────────────────────────────────────────────────

/// Prints session notifications to stderr.
struct StderrNotifier {
    format: Format,
}

impl Notifier for StderrNotifier {
    fn notify_error(&mut self, message: &str) {
        self.print(Severity::Error, message);
    }

    fn notify_success(&mut self, message: &str) {
        self.print(Severity::Info, message);
    }
}

impl StderrNotifier {
    fn print(&self, severity: Severity, message: &str) {
        use ariadne::{Color, Fmt};

        match (self.format, &severity) {
            (Format::Json, _) => eprintln!("{severity}: {message}"),
            (Format::Pretty, Severity::Error) => eprintln!("{}", message.fg(Color::Red)),
            (Format::Pretty, _) => eprintln!("{}", message.fg(Color::Green)),
        }
    }
}
