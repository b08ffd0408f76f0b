//! `taxui years` - live tax-year lookup against a running backend.

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use taxui_net::HttpGateway;
use taxui_widgets::{FormFlavor, YearSource};

use crate::config::TaxuiConfig;
use crate::ui;

#[derive(Args, Debug)]
pub struct YearsArgs {
    /// Form flavor: extension-form or form-1120h
    #[arg(long, default_value = "extension-form")]
    pub form: FormFlavor,

    /// Association id to look up
    #[arg(long)]
    pub association: String,

    /// Backend base URL (overrides the config file)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run_years(args: YearsArgs) -> Result<()> {
    let config = TaxuiConfig::load()?;
    let base_url = args.base_url.unwrap_or(config.base_url);
    let gateway = HttpGateway::new(&base_url)
        .with_context(|| format!("Failed to build HTTP client for {base_url}"))?;

    let spinner = ui::spinner(format!(
        "Fetching {} tax years for association {}...",
        args.form.as_str(),
        args.association
    ));
    let years = gateway.tax_years(args.form, &args.association).await;
    ui::finish(spinner);

    let years = years.with_context(|| {
        format!(
            "Failed to fetch tax years from {base_url}{}",
            args.form.path()
        )
    })?;

    if years.is_empty() {
        info!("no tax years available for this association");
    }
    for year in years {
        println!("{year}");
    }
    Ok(())
}
