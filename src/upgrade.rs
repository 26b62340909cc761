//! Self-upgrade - combine the release lookup with the version compare
//!
//! The upgrade procedure itself (cargo install) is idempotent and
//! authoritative, so an unanswerable "what is the latest version?" does
//! not block it: when the lookup comes back empty we upgrade anyway.

use crate::config::{Config, UNKNOWN_VERSION};
use crate::error::{Error, Result};
use crate::release::{HttpFetch, ReleaseResolver};
use crate::version::is_newer;
use std::process::Command;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeOutcome {
    AlreadyLatest(String),
    Upgraded,
}

/// Whether an upgrade is warranted given the resolved latest tag.
///
/// No tag, or no trustworthy current version, means proceed.
pub fn upgrade_needed(latest: Option<&str>, current: &str) -> bool {
    match latest {
        None => true,
        Some(tag) => {
            if current.is_empty() || current == UNKNOWN_VERSION {
                return true;
            }
            is_newer(tag, current)
        }
    }
}

/// Run the update check and, when warranted, the upgrade procedure.
pub fn check_and_upgrade<H: HttpFetch>(
    config: &Config,
    resolver: &ReleaseResolver<H>,
) -> Result<UpgradeOutcome> {
    // A metadata-fetch problem is soft here: downgrade it to absence and
    // let the idempotent installer be the authority.
    let latest = match resolver.fetch_latest() {
        Ok(latest) => latest,
        Err(err) => {
            warn!("Update check failed ({}); upgrading anyway", err);
            None
        }
    };

    if !upgrade_needed(latest.as_deref(), &config.current_version) {
        return Ok(UpgradeOutcome::AlreadyLatest(config.current_version.clone()));
    }

    if let Some(tag) = &latest {
        info!("Upgrading {} -> {}", config.current_version, tag);
    }
    run_upgrade(config)?;
    Ok(UpgradeOutcome::Upgraded)
}

/// Invoke the external upgrade procedure and propagate its exit status
pub fn run_upgrade(config: &Config) -> Result<()> {
    let status = Command::new(&config.cargo)
        .args(["install", "wasend", "--locked"])
        .status()
        .map_err(|e| Error::Upgrade(format!("could not run {}: {}", config.cargo.display(), e)))?;

    if !status.success() {
        return Err(Error::Upgrade(format!(
            "cargo install exited with {}",
            status.code().unwrap_or(-1)
        )));
    }
    Ok(())
}
