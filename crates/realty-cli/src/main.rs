mod api;
mod commands;
mod config;
mod context;
mod input;
mod output;
mod session;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::auth::LoginArgs;
use commands::contact::ContactCommand;
use commands::emi::EmiArgs;
use commands::faq::FaqCommand;
use commands::pricing::{FormatCurrencyArgs, NormalizePriceArgs};
use commands::property::PropertyCommand;
use commands::team::TeamCommand;
use config::SiteConfig;
use context::Context;

/// Loan quotes, listings and the back-office from the command line
#[derive(Parser)]
#[command(
    name = "realty",
    version,
    about = "Loan quotes, listings and the back-office from the command line",
    long_about = "A CLI for the real-estate site: monthly instalment quotes with decimal \
                  precision, rupee price formatting, the public catalogue (listings, FAQs, \
                  team, contact form) and the admin back-office behind a stored sign-in."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Path to a YAML config file
    #[arg(long, global = true)]
    config: Option<String>,

    /// Backend base URL (overrides the config file)
    #[arg(long, env = "REALTY_API_URL", global = true)]
    api_url: Option<String>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the monthly instalment for a home loan
    Emi(EmiArgs),
    /// Turn a displayed price into a plain amount
    NormalizePrice(NormalizePriceArgs),
    /// Render an amount with currency grouping
    FormatCurrency(FormatCurrencyArgs),
    /// Property listings
    #[command(subcommand)]
    Properties(PropertyCommand),
    /// Frequently asked questions
    #[command(subcommand)]
    Faqs(FaqCommand),
    /// Team members
    #[command(subcommand)]
    Team(TeamCommand),
    /// Contact form enquiries
    #[command(subcommand)]
    Contacts(ContactCommand),
    /// Sign in as an administrator and store the session
    Login(LoginArgs),
    /// Forget the stored admin session
    Logout,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    if let Commands::Version = cli.command {
        println!("realty {}", env!("CARGO_PKG_VERSION"));
        return;
    }
    init_tracing(cli.verbose);

    let config = match SiteConfig::load(cli.config.as_deref()) {
        Ok(config) => config.with_api_url(cli.api_url),
        Err(e) => fail(&*e),
    };
    if !config.display.color {
        colored::control::set_override(false);
    }
    let ctx = Context::new(config);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::emi::run_emi(args, &ctx),
        Commands::NormalizePrice(args) => commands::pricing::run_normalize_price(args),
        Commands::FormatCurrency(args) => commands::pricing::run_format_currency(args),
        Commands::Properties(cmd) => commands::property::run_property(cmd, &ctx),
        Commands::Faqs(cmd) => commands::faq::run_faq(cmd, &ctx),
        Commands::Team(cmd) => commands::team::run_team(cmd, &ctx),
        Commands::Contacts(cmd) => commands::contact::run_contact(cmd, &ctx),
        Commands::Login(args) => commands::auth::run_login(args, &ctx),
        Commands::Logout => commands::auth::run_logout(&ctx),
        Commands::Version => Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value, &ctx.config.display);
            process::exit(0);
        }
        Err(e) => fail(&*e),
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins over `-v`.
fn init_tracing(verbosity: u8) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = match verbosity {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
        format!("realty={level},realty_core={level}").into()
    });

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn fail(e: &dyn std::error::Error) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}
