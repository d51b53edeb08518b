use std::path::PathBuf;

use clap::Parser;

use invest_report::report::operations::DEFAULT_LOOKBACK_DAYS;

#[derive(Parser)]
#[command(name = "invest-report")]
#[command(
    version,
    about = "T-Invest portfolio and operations history Excel report"
)]
#[command(
    long_about = "Fetch the portfolio positions and executed operation history of a T-Invest brokerage account and save them as a formatted two-sheet Excel report."
)]
pub struct Cli {
    /// Path to the TOML config with the API token (default: ~/.invest-report/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Account id to report on (default: the token's first account)
    #[arg(long)]
    pub account_id: Option<String>,

    /// Output file path
    #[arg(short, long, default_value = "invest_report.xlsx")]
    pub output: PathBuf,

    /// Operations lookback window in days
    #[arg(long, default_value_t = DEFAULT_LOOKBACK_DAYS)]
    pub days: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["invest-report"]);
        assert!(cli.config.is_none());
        assert!(cli.account_id.is_none());
        assert_eq!(cli.output, PathBuf::from("invest_report.xlsx"));
        assert_eq!(cli.days, 3650);
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::parse_from([
            "invest-report",
            "--account-id",
            "2000123456",
            "--output",
            "report.xlsx",
            "--days",
            "30",
        ]);
        assert_eq!(cli.account_id.as_deref(), Some("2000123456"));
        assert_eq!(cli.output, PathBuf::from("report.xlsx"));
        assert_eq!(cli.days, 30);
    }
}
