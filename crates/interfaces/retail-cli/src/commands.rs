use std::io::{BufRead, Write};

use anyhow::Context;
use retail_app_core::{
    Action, ActionEvaluating, Clock, Evaluation, Evaluator, OrderClaimPort, StateKind,
    ViewCycleEvaluating, WorkflowSettings,
};
use retail_core::fixtures::seed_order;

use crate::render::render_screen;
use crate::tokens::ActionToken;
use crate::CliOutput;

/// How a scripted or interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub final_state: StateKind,
    pub dismissed: bool,
    pub ignored: usize,
}

fn write_screen<C, P, W>(ev: &Evaluator<C, P>, out: &mut W, output: CliOutput) -> anyhow::Result<()>
where
    C: Clock,
    P: OrderClaimPort,
    W: Write,
{
    let fields = ev.translator().fields();
    match output {
        CliOutput::Text => writeln!(out, "{}", render_screen(&fields))?,
        CliOutput::Json => writeln!(out, "{}", serde_json::to_string(&fields)?)?,
    }
    Ok(())
}

/// Applies one action and redraws when the state changed.
fn step<C, P, W>(
    ev: &mut Evaluator<C, P>,
    action: Option<Action>,
    out: &mut W,
    output: CliOutput,
) -> anyhow::Result<Evaluation>
where
    C: Clock,
    P: OrderClaimPort,
    W: Write,
{
    let outcome = ev.evaluate(action);
    match outcome {
        Evaluation::Transitioned => write_screen(ev, out, output)?,
        Evaluation::Ignored => {
            if output == CliOutput::Text {
                writeln!(out, ":: Nothing to do on this screen")?;
            }
        }
        Evaluation::DismissRequested => {
            if output == CliOutput::Text {
                writeln!(out, ":: Screen dismissed")?;
            }
        }
    }
    Ok(outcome)
}

fn open_screen<C, P, W>(ev: &mut Evaluator<C, P>, out: &mut W, output: CliOutput) -> anyhow::Result<()>
where
    C: Clock,
    P: OrderClaimPort,
    W: Write,
{
    ev.view_did_appear();
    write_screen(ev, out, output)
}

/// Runs `tokens` against a fresh evaluator, stopping at the first bad token
/// or once the screen is dismissed.
pub fn play<C, P, W>(
    mut ev: Evaluator<C, P>,
    tokens: &[String],
    out: &mut W,
    output: CliOutput,
) -> anyhow::Result<SessionSummary>
where
    C: Clock,
    P: OrderClaimPort,
    W: Write,
{
    open_screen(&mut ev, out, output)?;

    let mut summary = SessionSummary {
        final_state: ev.state().kind(),
        dismissed: false,
        ignored: 0,
    };

    for raw in tokens {
        let token: ActionToken = raw
            .parse()
            .with_context(|| format!("Invalid action '{raw}'"))?;
        let action = token
            .resolve(&ev)
            .with_context(|| format!("Cannot apply '{raw}'"))?;
        if output == CliOutput::Text {
            writeln!(out, "\n> {raw}")?;
        }
        match step(&mut ev, action, out, output)? {
            Evaluation::Transitioned => {}
            Evaluation::Ignored => summary.ignored += 1,
            Evaluation::DismissRequested => {
                summary.dismissed = true;
                break;
            }
        }
    }

    summary.final_state = ev.state().kind();
    Ok(summary)
}

/// Reads one token per line until EOF, `quit`, or dismissal. Bad tokens are
/// reported and skipped; in JSON mode the report goes to the log so stdout
/// stays one snapshot per line.
pub fn interactive<C, P, R, W>(
    mut ev: Evaluator<C, P>,
    input: R,
    out: &mut W,
    output: CliOutput,
) -> anyhow::Result<SessionSummary>
where
    C: Clock,
    P: OrderClaimPort,
    R: BufRead,
    W: Write,
{
    open_screen(&mut ev, out, output)?;

    let mut summary = SessionSummary {
        final_state: ev.state().kind(),
        dismissed: false,
        ignored: 0,
    };

    for line in input.lines() {
        let line = line.context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("quit") || line.eq_ignore_ascii_case("exit") {
            break;
        }

        let resolved = line
            .parse::<ActionToken>()
            .and_then(|token| token.resolve(&ev));
        let action = match resolved {
            Ok(action) => action,
            Err(e) => {
                match output {
                    CliOutput::Text => writeln!(out, ":: {e}")?,
                    CliOutput::Json => tracing::warn!(line, "skipping input: {e}"),
                }
                continue;
            }
        };
        let outcome = step(&mut ev, action, out, output)?;

        match outcome {
            Evaluation::Transitioned => {}
            Evaluation::Ignored => summary.ignored += 1,
            Evaluation::DismissRequested => {
                summary.dismissed = true;
                break;
            }
        }
    }

    summary.final_state = ev.state().kind();
    Ok(summary)
}

pub fn cmd_order<W: Write>(out: &mut W) -> anyhow::Result<()> {
    let order = seed_order();
    writeln!(out, "{}", serde_json::to_string_pretty(&order)?)?;
    Ok(())
}

pub fn cmd_settings<W: Write>(out: &mut W) -> anyhow::Result<()> {
    let settings = WorkflowSettings::default();
    writeln!(out, "{}", serde_json::to_string_pretty(&settings)?)?;
    Ok(())
}

pub fn cmd_play(tokens: Vec<String>, output: CliOutput) -> anyhow::Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = play(Evaluator::default(), &tokens, &mut out, output)?;
    tracing::info!(
        state = ?summary.final_state,
        dismissed = summary.dismissed,
        ignored = summary.ignored,
        "session finished"
    );
    Ok(())
}

pub fn cmd_interactive(output: CliOutput) -> anyhow::Result<()> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let summary = interactive(Evaluator::default(), stdin.lock(), &mut out, output)?;
    tracing::info!(
        state = ?summary.final_state,
        dismissed = summary.dismissed,
        ignored = summary.ignored,
        "session finished"
    );
    Ok(())
}
