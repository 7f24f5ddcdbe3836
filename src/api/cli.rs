use clap::{Parser, Subcommand};
use thiserror::Error;

use super::inputs::{GoalArgs, InputError, LumpsumArgs, RetirementArgs, SipArgs, SwpArgs};
use super::{build_projection_response, run_http_server};

#[derive(Parser, Debug)]
#[command(
    name = "sipcalc",
    about = "Projection calculator for SIP, lumpsum, retirement, SWP and goal-based plans"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Serve the JSON projection API
    Serve {
        #[arg(long, default_value_t = 8080)]
        port: u16,
    },
    /// Systematic investment plan: fixed monthly contribution
    Sip(SipArgs),
    /// One-time investment compounding annually
    Lumpsum(LumpsumArgs),
    /// Monthly contribution needed to fund retirement
    Retirement(RetirementArgs),
    /// Systematic withdrawal plan drawn from a corpus
    Swp(SwpArgs),
    /// Monthly contribution needed to reach a savings goal
    Goal(GoalArgs),
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode result: {0}")]
    Json(#[from] serde_json::Error),
}

pub async fn run_cli(cli: Cli) -> Result<(), AppError> {
    let strategy = match cli.command {
        Command::Serve { port } => return Ok(run_http_server(port).await?),
        Command::Sip(args) => args.into_strategy()?,
        Command::Lumpsum(args) => args.into_strategy()?,
        Command::Retirement(args) => args.into_strategy()?,
        Command::Swp(args) => args.into_strategy()?,
        Command::Goal(args) => args.into_strategy()?,
    };

    log::debug!("projecting {strategy:?}");
    let response = build_projection_response(&strategy);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
