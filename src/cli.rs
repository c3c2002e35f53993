use clap::Parser;
use hostai::dispatcher::DispatchError;
use hostai::{
    AppResult, DispatchOutcome, Dispatcher, GateOptions, GateOutcome, QueryResponse,
    StructuredAction, ValidationFailure,
};
use std::io::Write;
use std::path::PathBuf;

/// ai: natural-language CLI assistant
#[derive(Parser, Debug)]
#[command(name = "ai", version, about = "ai: Natural-language CLI assistant")]
pub struct Args {
    /// Natural language prompt
    #[arg(required = true)]
    pub prompt: Vec<String>,

    /// Auto confirm the suggested command
    #[arg(short = 'y', long = "yes")]
    pub yes: bool,

    /// Don't execute; show the suggested command only
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Print the query response as JSON and stop
    #[arg(long)]
    pub json: bool,

    /// Config file (defaults to ~/.config/hostai/config.toml)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Args {
    pub fn prompt_text(&self) -> String {
        self.prompt.join(" ")
    }

    pub fn gate_options(&self) -> GateOptions {
        GateOptions {
            auto_confirm: self.yes,
            dry_run: self.dry_run,
        }
    }
}

/// Run one prompt and write the report to `out`, returning the exit code
///
/// When the audit entry cannot be written the decided outcome is written
/// first and the error is returned afterwards.
pub async fn run_prompt<W: Write>(
    dispatcher: &Dispatcher,
    args: &Args,
    out: &mut W,
) -> AppResult<i32> {
    let prompt = args.prompt_text();

    if args.json {
        let response = dispatcher.query(&prompt).await?;
        writeln!(out, "{}", serde_json::to_string_pretty(&response)?)?;
        let code = match response {
            QueryResponse::Success { .. } => 0,
            QueryResponse::Failure { .. } => 1,
        };
        return Ok(code);
    }

    writeln!(out, "Sending to AI server...")?;
    out.flush()?;

    let action = match dispatcher.propose(&prompt).await {
        Ok(action) => action,
        Err(DispatchError::OutputFormat(failure)) => {
            render_format_failure(out, &failure)?;
            return Ok(1);
        }
        Err(e) => return Err(e.into()),
    };

    render_proposal(out, &action)?;
    out.flush()?;

    match dispatcher.route(action, args.gate_options()).await {
        Ok(outcome) => {
            render_dispatch(out, &outcome)?;
            Ok(0)
        }
        Err(err) => {
            render_gate_outcome(out, err.outcome())?;
            Err(err.into())
        }
    }
}

/// The model answered with something that is not a valid action
pub fn render_format_failure<W: Write>(
    out: &mut W,
    failure: &ValidationFailure,
) -> std::io::Result<()> {
    writeln!(out, "AI server error: {}", failure.code())?;
    writeln!(out, "Raw output: {}", failure.raw_text())
}

pub fn render_proposal<W: Write>(out: &mut W, action: &StructuredAction) -> std::io::Result<()> {
    writeln!(
        out,
        "== Model reasoning ==\n{}\n== End reasoning ==\n",
        action.reasoning()
    )?;
    if let StructuredAction::RunCommand { command, .. } = action {
        writeln!(out, "Suggested: {}", command)?;
    }
    Ok(())
}

pub fn render_dispatch<W: Write>(out: &mut W, outcome: &DispatchOutcome) -> std::io::Result<()> {
    match outcome {
        DispatchOutcome::Reply { message, .. } => writeln!(out, "Assistant: {}", message),
        DispatchOutcome::Command { outcome, .. } => render_gate_outcome(out, outcome),
    }
}

/// Notice first, if any, then the command output block
pub fn render_gate_outcome<W: Write>(out: &mut W, outcome: &GateOutcome) -> std::io::Result<()> {
    if let Some(notice) = outcome.notice() {
        writeln!(out, "{}", notice)?;
    }
    writeln!(out, "=== Command output ===\n{}", outcome.message())
}
