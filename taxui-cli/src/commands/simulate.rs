//! `taxui simulate` - replay an event script against a page snapshot.
//!
//! The final page state goes to stdout as JSON; alerts and navigation are
//! reported on stderr so pipelines can consume the snapshot cleanly. Year
//! fetches are served from an optional fixture file (a JSON map of
//! association id to year list) instead of the network, keeping runs
//! reproducible.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use taxui_core::event::parse_script;
use taxui_core::prefs::MemoryStore;
use taxui_core::Page;
use taxui_widgets::{standard_engine, StaticCompanies, StaticYears};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Path to the page snapshot (JSON)
    pub page: PathBuf,

    /// Event script to replay (JSON array of events)
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Year fixtures: JSON map of association id to year list
    #[arg(long)]
    pub years_fixture: Option<PathBuf>,
}

pub async fn run_simulate(args: SimulateArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read page snapshot: {}", args.page.display()))?;
    let mut page = Page::from_json(&raw)?;
    let initial_location = page.location.clone();

    let years = match &args.years_fixture {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read year fixture: {}", path.display()))?;
            let fixture: BTreeMap<String, Vec<String>> =
                serde_json::from_str(&raw).context("Year fixture must map ids to year lists")?;
            StaticYears::new(fixture)
        }
        None => StaticYears::empty(),
    };

    let mut engine = standard_engine(
        Arc::new(years),
        Arc::new(StaticCompanies::new()),
        Box::new(MemoryStore::new()),
        chrono::Utc::now().timestamp_millis(),
    );

    let active = engine.load(&mut page).await?;
    info!(enhancers = active.len(), "page loaded");

    if let Some(script_path) = &args.script {
        let raw = fs::read_to_string(script_path)
            .with_context(|| format!("Failed to read event script: {}", script_path.display()))?;
        let events = parse_script(&raw)?;
        info!(events = events.len(), "replaying script");
        for event in events {
            engine.dispatch(&mut page, event).await?;
        }
    }

    for alert in engine.alerts() {
        eprintln!("alert: {alert}");
    }
    if page.location != initial_location {
        eprintln!("navigated: {}", page.location);
    }

    println!("{}", page.to_json_pretty()?);
    Ok(())
}
