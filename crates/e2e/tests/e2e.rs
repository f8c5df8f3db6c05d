//! E2E harness entry point
//!
//! Runs the registered API and UI scenarios against the live demo services.
//! Without `--live` it only lists the selected scenarios, so a plain
//! `cargo test` stays offline.
//! Run with: cargo test --package qaguru-e2e --test e2e -- --live

use std::path::PathBuf;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use qaguru_common::User;
use qaguru_e2e::playwright::{check_playwright_installed, Browser};
use qaguru_e2e::runner::Selection;
use qaguru_e2e::{scenarios, E2eResult, SuiteConfig, TestRunner};

#[derive(Parser, Debug)]
#[command(name = "qaguru-e2e")]
#[command(about = "E2E scenarios for the Airport Gap API and the RealWorld app")]
struct Args {
    /// Run only scenarios whose name contains this text
    filter: Option<String>,

    /// TOML configuration file
    #[arg(short, long, env = "QAGURU_E2E_CONFIG")]
    config: Option<PathBuf>,

    /// Run against the live services instead of listing scenarios
    #[arg(long, env = "QAGURU_E2E_LIVE")]
    live: bool,

    /// Run only scenarios with this tag (api, ui, smoke)
    #[arg(short, long)]
    tag: Option<String>,

    /// Scenarios running at the same time
    #[arg(short, long, default_value = "4")]
    workers: usize,

    /// Airport Gap API root
    #[arg(long, env = "AIRPORTGAP_BASE_URL")]
    airport_base_url: Option<String>,

    /// Airport Gap account email
    #[arg(long, env = "AIRPORTGAP_EMAIL")]
    airport_email: Option<String>,

    /// Airport Gap account password
    #[arg(long, env = "AIRPORTGAP_PASSWORD", hide_env_values = true)]
    airport_password: Option<String>,

    /// RealWorld application root
    #[arg(long, env = "REALWORLD_BASE_URL")]
    realworld_base_url: Option<String>,

    /// Username of a registered RealWorld account
    #[arg(long, env = "REALWORLD_USER_NAME")]
    user_name: Option<String>,

    /// Email of a registered RealWorld account
    #[arg(long, env = "REALWORLD_USER_EMAIL")]
    user_email: Option<String>,

    /// Password of a registered RealWorld account
    #[arg(long, env = "REALWORLD_USER_PASSWORD", hide_env_values = true)]
    user_password: Option<String>,

    /// Browser to use (chromium, firefox, webkit)
    #[arg(long)]
    browser: Option<String>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// Output directory for results
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Error: failed to create tokio runtime: {}", e);
            std::process::exit(2);
        }
    };

    match rt.block_on(async_main(args)) {
        Ok(true) => std::process::exit(0),
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}

fn build_config(args: &Args) -> E2eResult<SuiteConfig> {
    let mut config = SuiteConfig::load(args.config.as_deref())?;

    if let Some(url) = &args.airport_base_url {
        config.airport.base_url = url.clone();
    }
    if let Some(email) = &args.airport_email {
        config.airport.email = Some(email.clone());
    }
    if let Some(password) = &args.airport_password {
        config.airport.password = Some(password.clone());
    }
    if let Some(url) = &args.realworld_base_url {
        config.realworld.base_url = url.clone();
    }
    if let (Some(name), Some(email), Some(password)) = (&args.user_name, &args.user_email, &args.user_password) {
        config.realworld.account = Some(User {
            name: name.clone(),
            email: email.clone(),
            password: password.clone(),
        });
    }
    if let Some(browser) = &args.browser {
        config.playwright.browser = browser.parse::<Browser>()?;
    }
    if args.headed {
        config.playwright.headless = false;
    }
    if let Some(output) = &args.output {
        config.output_dir = output.clone();
    }

    Ok(config)
}

async fn async_main(args: Args) -> E2eResult<bool> {
    let config = build_config(&args)?;
    let selection = Selection {
        name: args.filter.clone(),
        tag: args.tag.clone(),
    };

    let all = scenarios::all();

    if !args.live {
        info!("Listing scenarios (pass --live or set QAGURU_E2E_LIVE=1 to run them):");
        for scenario in selection.apply(&all) {
            info!("  {} [{}] - {}", scenario.name, scenario.tags.join(", "), scenario.description);
        }
        return Ok(true);
    }

    if selection.apply(&all).iter().any(|s| s.has_tag("ui")) {
        if let Err(e) = check_playwright_installed(&config.playwright).await {
            warn!("{}; UI scenarios will fail", e);
        }
    }

    let runner = TestRunner::new(config, args.workers)?;
    let results = runner.run(&all, &selection).await;
    runner.write_results(&results)?;

    Ok(results.success())
}
