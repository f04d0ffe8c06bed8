use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use jiff::Timestamp;
use jiff::civil::Date;
use pricedrift_core::ClassifyOptions;
use pricedrift_fastspring::client::DEFAULT_BASE_URL;
use pricedrift_fastspring::subscriptions::DEFAULT_PAGE_SIZE;
use pricedrift_fastspring::{ClientConfig, Credentials, DateWindow, RetryPolicy};
use pricedrift_scan::ScanOptions;

const CREDENTIALS_HELP: &str = "\
Provide the credentials for access to the FastSpring API.

These are not the username and password you use to log in to the FastSpring
website. They are the username/password pair your backend uses when talking
to the FastSpring API. If you don't have an API integration yet, create a pair
at https://app.fastspring.com/ under Integrations > API Credentials.

Example: pricedrift yourusername yourpassword";

/// Find subscriptions whose unit price changed during their lifetime.
#[derive(Debug, Clone, Parser)]
#[command(name = "pricedrift", version, after_help = CREDENTIALS_HELP)]
pub struct Args {
    /// FastSpring API username
    #[arg(env = "FASTSPRING_API_USERNAME")]
    pub username: String,

    /// FastSpring API password
    #[arg(env = "FASTSPRING_API_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Directory the three CSV reports are written to
    #[arg(short = 'o', long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Only audit subscriptions created on or after this date
    #[arg(long, default_value = "2009-10-01")]
    pub begin: Date,

    /// Only audit subscriptions created before this date
    #[arg(long, default_value = "2022-10-15")]
    pub end: Date,

    /// Subscriptions per listing page, sent to the API as the page limit
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, value_parser = clap::value_parser!(u64).range(1..))]
    pub page_size: u64,

    /// Base URL of the FastSpring API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base: String,

    /// Attempts per request before giving up
    #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..))]
    pub attempts: u32,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Price increases from this instant on count as the 2022 overcharge issue
    #[arg(long, default_value = "2022-01-01T00:00:00Z")]
    pub overcharge_since: Timestamp,
}

impl Args {
    pub fn window(&self) -> eyre::Result<DateWindow> {
        if self.begin > self.end {
            eyre::bail!("--begin {} is after --end {}", self.begin, self.end);
        }
        Ok(DateWindow {
            begin: self.begin,
            end: self.end,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api_base.clone(),
            credentials: Credentials::new(&self.username, &self.password),
            retry: RetryPolicy::with_max_attempts(self.attempts),
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn scan_options(&self) -> eyre::Result<ScanOptions> {
        Ok(ScanOptions {
            window: self.window()?,
            page_size: self.page_size,
            classify: ClassifyOptions {
                overcharge_since: self.overcharge_since,
            },
        })
    }
}
