use clap::{Args, Parser, Subcommand, ValueEnum};
use client::util::delta::{DeltaType, format_relative_amount};
use client::util::empty_state::{EmptyState, in_docker};
use client::{ApiClient, ClientConfig, FetchError, LoginError, MemoryRouter, Navigator, Payload, Resource, SessionController};
use serde_json::{Value, json};
use session::AuthPhase;

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("missing password; pass --password or set DOUGHBOX_PASSWORD")]
    MissingPassword,
    #[error("login rejected: {0}")]
    Login(#[from] LoginError),
    #[error("request failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("session is not authenticated")]
    NotAuthenticated,
    #[error("unexpected response for {0}")]
    UnexpectedPayload(&'static str),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "doughbox-cli", about = "Doughbox session and report CLI")]
struct Cli {
    #[arg(long, env = "DOUGHBOX_BASE_URL", default_value = client::net::api::DEFAULT_BASE_URL)]
    base_url: String,

    #[arg(long, env = "DOUGHBOX_API_TOKEN")]
    api_token: Option<String>,

    #[arg(long, env = "DOUGHBOX_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe the session and show where the router would go.
    Status {
        #[arg(long, default_value = "/")]
        location: String,
    },
    Login,
    Logout,
    /// Print one report as JSON.
    Fetch(FetchArgs),
    /// Portfolio totals with change buckets.
    Summary,
}

#[derive(Args, Debug)]
struct FetchArgs {
    resource: ResourceKind,

    /// Positions snapshot date (YYYY-MM-DD).
    #[arg(long)]
    date: Option<String>,

    /// Earliest timeline event (YYYY-MM-DD).
    #[arg(long, required_if_eq("resource", "timeline"))]
    start_date: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ResourceKind {
    Portfolio,
    Pl,
    Performance,
    Dividends,
    Taxation,
    Positions,
    Timeline,
}

impl ResourceKind {
    fn into_resource(self, date: Option<String>, start_date: Option<String>) -> Resource {
        match self {
            Self::Portfolio => Resource::Portfolio,
            Self::Pl => Resource::Pl,
            Self::Performance => Resource::Performance,
            Self::Dividends => Resource::Dividends,
            Self::Taxation => Resource::Taxation,
            Self::Positions => Resource::Positions { date },
            Self::Timeline => Resource::Timeline { start_date: start_date.unwrap_or_default() },
        }
    }
}

struct CliContext {
    password: Option<String>,
    controller: SessionController<MemoryRouter>,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let cli = Cli::parse();
    let config = ClientConfig::new(cli.base_url).with_api_token(cli.api_token);
    let api = ApiClient::new(config)?;

    let location = match &cli.command {
        Command::Status { location } => location.clone(),
        Command::Login => "/login".to_owned(),
        _ => "/dashboard".to_owned(),
    };
    let mut ctx = CliContext { password: cli.password, controller: SessionController::new(api, MemoryRouter::new(&location)) };

    match cli.command {
        Command::Status { location } => run_status(&mut ctx, &location).await,
        Command::Login => run_login(&mut ctx).await,
        Command::Logout => run_logout(&mut ctx).await,
        Command::Fetch(args) => run_fetch(&mut ctx, args).await,
        Command::Summary => run_summary(&mut ctx).await,
    }
}

async fn run_status(ctx: &mut CliContext, location: &str) -> Result<(), CliError> {
    let probe = ctx.controller.probe_with_retry().await;
    let navigation = ctx.controller.preview(location);
    print_json(&json!({
        "phase": ctx.controller.phase(),
        "probe": probe,
        "location": location,
        "navigation": navigation,
    }))
}

async fn run_login(ctx: &mut CliContext) -> Result<(), CliError> {
    let password = ctx.password.clone().ok_or(CliError::MissingPassword)?;
    ctx.controller.probe().await;
    ctx.controller.login(&password).await?;
    print_json(&json!({
        "phase": ctx.controller.phase(),
        "location": ctx.controller.navigator().location(),
    }))
}

async fn run_logout(ctx: &mut CliContext) -> Result<(), CliError> {
    ensure_session(ctx).await?;
    ctx.controller.logout().await?;
    print_json(&json!({
        "phase": ctx.controller.phase(),
        "location": ctx.controller.navigator().location(),
        "cached_entries": ctx.controller.cache().len(),
    }))
}

async fn run_fetch(ctx: &mut CliContext, args: FetchArgs) -> Result<(), CliError> {
    ensure_session(ctx).await?;
    let resource = args.resource.into_resource(args.date, args.start_date);
    match ctx.controller.load(&resource).await {
        Ok(Payload::Json(value)) => print_json(&value),
        Ok(Payload::Text(text)) => {
            println!("{text}");
            Ok(())
        }
        Err(FetchError::Api(err)) if err.is_not_found() => {
            let state = EmptyState::for_failure(&resource, &err);
            println!("{}", state.message());
            if let Some(instruction) = state.instruction(in_docker(&err)) {
                println!("  {instruction}");
            }
            Ok(())
        }
        Err(err) => Err(err.into()),
    }
}

async fn run_summary(ctx: &mut CliContext) -> Result<(), CliError> {
    ensure_session(ctx).await?;
    let payload = ctx.controller.load(&Resource::Portfolio).await?;
    let value = payload.into_json().ok_or(CliError::UnexpectedPayload("portfolio"))?;
    let summary = PortfolioSummary::from_json(&value);
    println!("{}", summary.render());
    Ok(())
}

/// Probe, and log in with the configured password when the probe says the
/// session is gone.
async fn ensure_session(ctx: &mut CliContext) -> Result<(), CliError> {
    ctx.controller.probe_with_retry().await;
    match ctx.controller.phase() {
        AuthPhase::Authenticated => Ok(()),
        AuthPhase::Unauthenticated => {
            let password = ctx.password.clone().ok_or(CliError::MissingPassword)?;
            ctx.controller.login(&password).await?;
            Ok(())
        }
        AuthPhase::Unknown => Err(CliError::NotAuthenticated),
    }
}

// =============================================================================
// SUMMARY
// =============================================================================

#[derive(Debug, Clone, PartialEq)]
struct PortfolioSummary {
    total_value: f64,
    total_return_abs: f64,
    total_return_rel: f64,
    positions: usize,
}

impl PortfolioSummary {
    fn from_json(value: &Value) -> Self {
        Self {
            total_value: number_field(value, "total_value").unwrap_or_default(),
            total_return_abs: number_field(value, "total_return_abs").unwrap_or_default(),
            total_return_rel: number_field(value, "total_return_rel").unwrap_or_default(),
            positions: value.get("positions").and_then(Value::as_array).map_or(0, Vec::len),
        }
    }

    fn delta(&self) -> DeltaType {
        DeltaType::from_change(self.total_return_rel)
    }

    fn render(&self) -> String {
        let delta = self.delta();
        format!(
            "portfolio value: {:.2}\nreturn: {:.2} ({} {}, {})\npositions: {}",
            self.total_value,
            self.total_return_abs,
            delta.symbol(),
            format_relative_amount(self.total_return_rel),
            delta.as_str(),
            self.positions,
        )
    }
}

/// Numeric field that may arrive as a JSON number or a decimal string.
fn number_field(value: &Value, key: &str) -> Option<f64> {
    match value.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)?;
    println!("{text}");
    Ok(())
}
