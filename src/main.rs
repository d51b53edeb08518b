mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing::info;

use invest_report::api::InvestClient;
use invest_report::config::Config;
use invest_report::report::{fetch_operations, fetch_portfolio, write_report};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = cli::Cli::parse();

    let config = Config::load(cli.config.as_deref())?;
    let client = InvestClient::new(&config.token)?;

    let account_id = match cli.account_id.or(config.account_id) {
        Some(id) => id,
        None => {
            let accounts = client.get_accounts().await?;
            accounts
                .into_iter()
                .next()
                .map(|account| account.id)
                .context("No accounts available for this token")?
        }
    };

    info!("Building report for account {}", account_id);

    let positions = fetch_portfolio(&client, &account_id).await?;
    let operations = fetch_operations(&client, &account_id, cli.days).await?;

    let written = write_report(&positions, &operations, &cli.output)?;

    println!("{} Report saved: {}", "✓".green().bold(), written.display());

    Ok(())
}
