//! wasend CLI - send a WhatsApp message via WhatsApp Web

use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use wasend::browser::{open_session, send_url};
use wasend::config::{Config, SETTLE_DELAY_MS};
use wasend::contacts::{resolve_phone, LabelStore};
use wasend::dispatch::send_message;
use wasend::readiness::ReadinessMonitor;
use wasend::release::{BlockingHttp, ReleaseResolver};
use wasend::upgrade::{check_and_upgrade, UpgradeOutcome};
use wasend::{Error, Result};

/// Send a WhatsApp message via WhatsApp Web
#[derive(Parser, Debug)]
#[command(name = "wasend")]
#[command(about = "Send a WhatsApp message via WhatsApp Web")]
struct Cli {
    /// Phone number with country code, or a saved label
    mobile_no: Option<String>,

    /// Message text to send
    text: Vec<String>,

    /// Path for the WhatsApp Web session profile
    #[arg(long, default_value = "~/.whatsapp-web")]
    profile: String,

    /// Timeout in seconds to wait for login/send
    #[arg(long, default_value_t = 120)]
    timeout: u64,

    /// Clear the saved WhatsApp Web session
    #[arg(short = 'c', long)]
    clear: bool,

    /// Save a contact label to the config
    #[arg(short = 'a', long = "add-label", num_args = 2, value_names = ["LABEL", "NUMBER"])]
    add_label: Option<Vec<String>>,

    /// Check the latest release and self-upgrade if newer
    #[arg(long)]
    update: bool,
}

fn main() {
    // Initialize logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::default();

    // Single exit boundary: every failure becomes one line on stderr
    if let Err(err) = run(cli, &config) {
        eprintln!("{}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli, config: &Config) -> Result<()> {
    if let Some(pair) = &cli.add_label {
        if cli.mobile_no.is_some() || !cli.text.is_empty() || cli.update {
            return Err(Error::Config("Use --add-label by itself.".to_string()));
        }
        let mut store = LabelStore::load(config)?;
        store.add_label(&pair[0], &pair[1])?;
        println!(
            "Saved label '{}' in {}",
            pair[0].trim(),
            store.config_path().display()
        );
        return Ok(());
    }

    if cli.update {
        if cli.mobile_no.is_some() || !cli.text.is_empty() {
            return Err(Error::Config("Use --update by itself.".to_string()));
        }
        return cmd_update(config);
    }

    let profile_dir = expand_tilde(&cli.profile);
    if cli.clear {
        if profile_dir.exists() {
            let _ = std::fs::remove_dir_all(&profile_dir);
        }
        if cli.mobile_no.is_none() && cli.text.is_empty() {
            println!("Session cleared.");
            return Ok(());
        }
    }

    let target = cli.mobile_no.ok_or_else(|| {
        Error::Config("Phone number is required unless using --clear only.".to_string())
    })?;

    let text = cli.text.join(" ").trim().to_string();
    if text.is_empty() {
        let _ = Cli::command().print_help();
        return Ok(());
    }

    let store = LabelStore::load(config)?;
    let phone = resolve_phone(&store, &target)?;

    let url = send_url(&phone, &text);
    let (browser, page) = open_session(&profile_dir, &url)?;

    let mut monitor = ReadinessMonitor::new(Duration::from_secs(cli.timeout));
    monitor.wait(&page)?;

    send_message(&page, &text)?;

    // Give the client a moment to hand the message off before Chrome goes away
    std::thread::sleep(Duration::from_millis(SETTLE_DELAY_MS));
    drop(browser);

    println!("Message sent.");
    Ok(())
}

fn cmd_update(config: &Config) -> Result<()> {
    // Token injected from the environment here, never read deeper down
    let token = std::env::var("WASEND_GITHUB_TOKEN").ok().filter(|t| !t.is_empty());

    let resolver = ReleaseResolver::new(BlockingHttp::new()?, &config.release_url, token);
    match check_and_upgrade(config, &resolver)? {
        UpgradeOutcome::AlreadyLatest(version) => {
            println!("Already on the latest version ({}).", version);
        }
        UpgradeOutcome::Upgraded => {
            println!("Upgrade complete.");
        }
    }
    Ok(())
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
