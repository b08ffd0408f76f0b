//! `taxui inspect` - which enhancers would activate on a snapshot.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;

use taxui_core::prefs::NoopStore;
use taxui_core::Page;
use taxui_widgets::{standard_engine, StaticCompanies, StaticYears};

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Path to the page snapshot (JSON)
    pub page: PathBuf,
}

pub fn run_inspect(args: InspectArgs) -> Result<()> {
    let raw = fs::read_to_string(&args.page)
        .with_context(|| format!("Failed to read page snapshot: {}", args.page.display()))?;
    let page = Page::from_json(&raw)?;

    let mut engine = standard_engine(
        Arc::new(StaticYears::empty()),
        Arc::new(StaticCompanies::new()),
        Box::new(NoopStore),
        chrono::Utc::now().timestamp_millis(),
    );
    let active = engine.activate(&page);

    if active.is_empty() {
        println!("(no enhancers activate on this page)");
    } else {
        for name in active {
            println!("{name}");
        }
    }
    Ok(())
}
