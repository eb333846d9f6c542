use anyhow::Context;
use clap::Parser;
use fundgenius_core::domain::profile::ClientProfile;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "fundgenius_cli")]
struct Args {
    /// Client risk tolerance (Conservative, Low, Moderate, High, Aggressive).
    /// Anything else is treated as Moderate.
    #[arg(long)]
    risk: String,

    /// Investment horizon in years.
    #[arg(long)]
    horizon: f64,

    /// Financial goal, e.g. "Wealth Creation".
    #[arg(long)]
    goal: String,

    /// Amount to invest.
    #[arg(long)]
    amount: f64,

    /// JSON catalog to use instead of CATALOG_PATH / the built-in table.
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// JSON preset weight table to use instead of OVERRIDES_PATH / the built-in presets.
    #[arg(long)]
    overrides: Option<PathBuf>,

    /// Rescale weights to sum to exactly 100.
    #[arg(long)]
    normalize: bool,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let mut settings = fundgenius_core::config::Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    if let Some(path) = args.catalog.clone() {
        settings.catalog_path = Some(path);
    }
    if let Some(path) = args.overrides.clone() {
        settings.overrides_path = Some(path);
    }
    settings.normalize_weights |= args.normalize;

    if let Err(err) = run(&settings, &args) {
        sentry_anyhow::capture_anyhow(&err);
        tracing::error!(error = %err, "advice run failed");
        return Err(err);
    }
    Ok(())
}

fn run(settings: &fundgenius_core::config::Settings, args: &Args) -> anyhow::Result<()> {
    let advisor = settings.build_advisor()?;
    let profile = ClientProfile::from_labels(&args.risk, args.horizon, &args.goal, args.amount)
        .context("invalid client profile")?;

    let advice = advisor.advise(&profile)?;
    if advice.recommendation.is_empty() {
        tracing::warn!(
            risk_tier = %profile.risk_tier,
            goal = %profile.goal,
            "no recommendation, consult an advisor"
        );
    }
    if !advice.reconciliation.is_exact() {
        tracing::info!(
            drift = advice.reconciliation.drift,
            "allocated total differs from requested amount"
        );
    }

    let out = serde_json::to_string_pretty(&advice).context("serialize advice failed")?;
    println!("{out}");
    Ok(())
}

fn init_sentry(settings: &fundgenius_core::config::Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
