//! This module provides the command line interface of woodpecker.
//!
//! ```shell
//! $ woodpecker --help
//! Usage: woodpecker [OPTIONS] <BASE_URL>
//!
//! Arguments:
//!   <BASE_URL>  Base URL of the service under test, e.g. http://localhost:8080
//!
//! Options:
//!   -c, --count <COUNT>   Number of rounds to run [default: 100]
//!   -r, --report <REPORT> File to write the detailed report to
//!   -t, --type <TYPE>     Format of the report file [possible values: json, csv]
//!   -p, --pecks <PECKS>   Directory searched recursively for peck files [default: pecks]
//!   -s, --seed <SEED>     Seed for the firing decisions
//!       --no-color        Disable colors in the console table
//!   -h, --help            Print help
//!   -V, --version         Print version
//! ```
use std::{
    fs::File,
    io::{BufWriter, Write, stdout},
    path::PathBuf,
};

use anyhow::Context;
use clap::{
    Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use crossterm::tty::IsTty;

use crate::{
    error::ConfigError,
    executor::HttpExecutor,
    loader,
    reporter::{ReportType, ResultReporter, TableReporter},
    runner::{RunOpts, Runner},
    selection::Selector,
};

#[derive(Parser, Clone, Debug)]
#[clap(
    name = "woodpecker",
    version,
    about = "Fire declarative pecks at an HTTP service and report per-peck latency and success",
    styles(Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Cyan.on_default())
    )
)]
#[allow(missing_docs)]
pub struct PeckCli {
    /// Base URL of the service under test, e.g. http://localhost:8080
    ///
    /// Trailing slashes are stripped.
    pub base_url: String,

    /// Number of rounds to run
    ///
    /// Every round gives each peck one chance to fire.
    #[clap(long, short = 'c', default_value_t = 100)]
    pub count: u64,

    /// File to write the detailed report to
    ///
    /// When omitted, only the console table is printed.
    #[clap(long, short = 'r')]
    pub report: Option<PathBuf>,

    /// Format of the report file
    ///
    /// Defaults to json. Only valid together with --report.
    #[clap(long = "type", short = 't', value_enum, ignore_case = true, requires = "report")]
    pub report_type: Option<ReportType>,

    /// Directory searched recursively for peck files
    #[clap(long, short = 'p', default_value = "pecks")]
    pub pecks: PathBuf,

    /// Seed for the firing decisions
    ///
    /// Runs with the same seed and pecks fire the same sequence of requests.
    #[clap(long, short = 's')]
    pub seed: Option<u64>,

    /// Disable colors in the console table
    #[clap(long)]
    pub no_color: bool,
}

impl PeckCli {
    /// The validated base URL, without trailing slashes.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        let base = self.base_url.trim_end_matches('/');
        if base.is_empty() {
            return Err(ConfigError::MissingBaseUrl);
        }

        let url = url::Url::parse(base)
            .map_err(|source| ConfigError::InvalidBaseUrl { url: base.to_owned(), source })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ConfigError::UnsupportedScheme { scheme: url.scheme().to_owned() });
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(ConfigError::BaseUrlQuery { url: base.to_owned() });
        }
        Ok(base.to_owned())
    }

    /// Format of the report file.
    pub fn report_type(&self) -> ReportType {
        self.report_type.unwrap_or_default()
    }

    /// Options for the run engine.
    pub fn run_opts(&self) -> Result<RunOpts, ConfigError> {
        Ok(RunOpts { base_url: self.base_url()?, count: self.count })
    }

    fn colored(&self) -> bool {
        !self.no_color && stdout().is_tty()
    }
}

/// Load the pecks, run them and report the results.
///
/// The configuration is validated before any peck is loaded or prepared.
pub async fn run(cli: PeckCli) -> anyhow::Result<()> {
    let opts = cli.run_opts()?;
    tracing::info!(version = env!("CARGO_PKG_VERSION"), base_url = %opts.base_url, "woodpecker");

    let pecks = loader::load_dir(&cli.pecks)?;
    if pecks.is_empty() {
        tracing::warn!(dir = %cli.pecks.display(), "no pecks found");
    }

    let selector = match cli.seed {
        Some(seed) => Selector::seeded(seed),
        None => Selector::from_entropy(),
    };
    let mut runner = Runner::new(opts, pecks, HttpExecutor::new(), selector);
    let results = runner.run().await?.finalize();

    TableReporter { colored: cli.colored() }.print(&mut stdout(), &results)?;

    if let Some(path) = &cli.report {
        let file = File::create(path).with_context(|| format!("failed to create report '{}'", path.display()))?;
        let mut w = BufWriter::new(file);
        cli.report_type().reporter().print(&mut w, &results)?;
        w.flush()?;
        tracing::info!(path = %path.display(), format = %cli.report_type(), "report written");
    }

    Ok(())
}
