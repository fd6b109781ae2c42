//! Terminal output for `fleetsim`.
//!
//! A rejected command becomes one ariadne report against the command text:
//! the header is the aggregate [`SimulationError`] with its code, and every
//! offending step is a label underneath naming its token and motion class.
//! An accepted command prints a header with its action count followed by the
//! numbered actions. JSON output goes through [`print_json`].

use std::io::{self, IsTerminal};
use std::ops::Range;

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use fleet_sim_core::{Action, Interpretation, Ledger, SimulationError, SimulationReport};
use fleet_sim_diagnostics::{self as diag, Diagnostic, Severity};
use serde::Serialize;

/// Name the command text is reported under.
const COMMAND_SOURCE: &str = "<command>";

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, else pretty on a TTY and JSON in a pipe.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            _ if io::stdout().is_terminal() => Format::Pretty,
            _ => Format::Json,
        }
    }
}

// ── Per-command outcome ─────────────────────────────────────────────────

/// Everything printed for one command, from either `check` or `simulate`.
pub(crate) struct Outcome<'a> {
    command: &'a str,
    run_id: Option<u64>,
    error: Option<SimulationError>,
    actions: &'a [Action],
    diagnostics: &'a [Diagnostic],
}

impl<'a> Outcome<'a> {
    /// A stand-alone interpretation (nothing recorded).
    pub(crate) fn checked(command: &'a str, result: &'a Interpretation) -> Self {
        Self {
            command,
            run_id: None,
            error: result.error,
            actions: &result.actions,
            diagnostics: &result.diagnostics,
        }
    }

    /// A session simulation; `actions` are those of the recorded run, if any.
    pub(crate) fn simulated(
        command: &'a str,
        report: &'a SimulationReport,
        actions: &'a [Action],
    ) -> Self {
        Self {
            command,
            run_id: report.run_id,
            error: report.error,
            actions,
            diagnostics: &report.diagnostics,
        }
    }
}

/// Print one command's outcome.
///
/// Rejections go to stderr, accepted action lists to stdout. Non-error
/// diagnostics (e.g. unknown equipment) follow as one-line notes.
pub(crate) fn render_outcome(outcome: &Outcome<'_>) {
    match outcome.error {
        Some(error) => render_rejection(outcome.command, error, outcome.diagnostics),
        None => render_accepted(outcome),
    }
    for d in outcome.diagnostics.iter().filter(|d| !d.is_error()) {
        let (word, color) = severity_style(&d.severity);
        eprintln!("  {}[{}]: {}", word.fg(color), d.id, d.message);
    }
}

fn render_accepted(outcome: &Outcome<'_>) {
    let head = match outcome.run_id {
        Some(id) => format!("#{id} {}", outcome.command),
        None => outcome.command.to_string(),
    };
    println!(
        "{} {}",
        head.fg(Color::Green),
        count(outcome.actions.len(), "action").fg(Color::Cyan)
    );
    print_actions(outcome.actions);
}

fn render_rejection(command: &str, error: SimulationError, diagnostics: &[Diagnostic]) {
    let labels: Vec<(Range<usize>, String)> = diagnostics
        .iter()
        .filter(|d| d.is_error())
        .filter_map(|d| Some((clamp_span(d, command)?, step_label(d))))
        .collect();

    let Some(anchor) = labels.first().map(|(range, _)| range.clone()) else {
        // Nothing to point at (no selection, empty command).
        eprintln!("{}[{}]: {error}", "error".fg(Color::Red), error.code());
        for d in diagnostics.iter().filter(|d| d.id != error.code()) {
            eprintln!("  - {}", step_label(d));
        }
        if let Some(help) = diag::explain(error.code()) {
            eprintln!("  = help: {help}");
        }
        return;
    };

    let mut report = Report::build(ReportKind::Error, (COMMAND_SOURCE, anchor))
        .with_config(Config::default().with_compact(false))
        .with_code(error.code())
        .with_message(error.user_message())
        .with_labels(labels.into_iter().enumerate().map(|(i, (range, msg))| {
            Label::new((COMMAND_SOURCE, range))
                .with_message(msg)
                .with_color(Color::Red)
                .with_order(i32::try_from(i).unwrap_or(i32::MAX))
        }));
    if let Some(help) = diag::explain(error.code()) {
        report = report.with_help(help);
    }
    report
        .finish()
        .eprint((COMMAND_SOURCE, Source::from(command)))
        .ok();
}

/// Byte range of a diagnostic within the command, if it has a usable span.
fn clamp_span(d: &Diagnostic, command: &str) -> Option<Range<usize>> {
    let span = d.span?;
    if command.is_empty() {
        return None;
    }
    let start = span.start.min(command.len());
    let end = span.end.min(command.len()).max(start);
    Some(start..end)
}

/// Label text for one rejected step.
///
/// Range failures read `R45: rotational step, not a multiple of 90 [FSM2003]`;
/// grammar failures fall back to the diagnostic message.
fn step_label(d: &Diagnostic) -> String {
    let Some(ctx) = d.context.as_ref() else {
        return format!("{} [{}]", d.message, d.id);
    };
    let reason = if let Some(max) = ctx.get("max") {
        format!("over {max} degrees")
    } else if let Some(step) = ctx.get("step") {
        format!("not a multiple of {step}")
    } else {
        d.message.clone()
    };
    match (ctx.get("token"), ctx.get("class")) {
        (Some(token), Some(class)) => format!("{token}: {class} step, {reason} [{}]", d.id),
        _ => format!("{reason} [{}]", d.id),
    }
}

fn severity_style(severity: &Severity) -> (&'static str, Color) {
    match severity {
        Severity::Error => ("error", Color::Red),
        Severity::Warn => ("warning", Color::Yellow),
        Severity::Info => ("note", Color::Blue),
        _ => ("note", Color::White),
    }
}

fn count(n: usize, noun: &str) -> String {
    let s = if n == 1 { "" } else { "s" };
    format!("({n} {noun}{s})")
}

// ── Session totals and ledger ───────────────────────────────────────────

/// Print how many of the submitted commands were recorded, to stderr.
pub(crate) fn print_tally(recorded: usize, submitted: usize) {
    let line = format!("{recorded} of {submitted} command(s) recorded");
    let color = if recorded == submitted {
        Color::Green
    } else {
        Color::Yellow
    };
    eprintln!("{}", line.fg(color));
}

/// Print compiled actions as a numbered list, to stdout.
pub(crate) fn print_actions(actions: &[Action]) {
    for (i, action) in actions.iter().enumerate() {
        println!("  {:>2}. {action}", i + 1);
    }
}

/// Print the ledger newest first, to stdout.
pub(crate) fn print_ledger(ledger: &Ledger) {
    if ledger.is_empty() {
        println!("(no simulations recorded)");
        return;
    }
    for run in ledger {
        let ts = run
            .timestamp
            .to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
        println!(
            "#{} {} {} {}",
            run.id,
            ts.fg(Color::Cyan),
            run.equipment_label(),
            count(run.actions.len(), "action")
        );
        println!("  command: {}", run.command);
        print_actions(&run.actions);
    }
}

// ── JSON ────────────────────────────────────────────────────────────────

/// Print any serializable value as pretty JSON to stdout.
pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
