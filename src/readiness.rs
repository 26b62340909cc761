//! Session readiness - polls the page until a message can go out
//!
//! WhatsApp Web reaches "ready" through different visual cues depending
//! on UI revision and session state: sometimes a send button, sometimes
//! one of several compose-box variants. Readiness is therefore the OR of
//! independent probes, recomputed every tick, so a redesigned selector
//! degrades one probe instead of breaking the whole run.

use crate::config::{HEARTBEAT_INTERVAL_SECS, POLL_INTERVAL_MS};
use crate::error::{Error, Result};
use crate::page::{find_visible, PageSurface, COMPOSE_SELECTORS, QR_SELECTORS, SEND_BUTTON};
use std::time::{Duration, Instant};
use tracing::debug;

/// Transient classification of the page, recomputed per tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadinessSignal {
    NotReady,
    QrPending,
    ComposeReady,
    SendReady,
}

/// Which cue unlocked dispatch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadyPath {
    SendControl,
    ComposeBox,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Waiting,
    Ready(ReadyPath),
    TimedOut,
}

/// Operator-facing notices emitted while waiting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    ScanQr,
    Heartbeat,
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Notice::ScanQr => write!(
                f,
                "Waiting for WhatsApp Web to be ready. If this is your first run, scan the QR code."
            ),
            Notice::Heartbeat => write!(f, "Still waiting for WhatsApp Web..."),
        }
    }
}

/// Classify the current page state. Probe order matters: a visible send
/// button wins over a compose box, and the QR check only runs when
/// neither ready cue is present.
pub fn classify(page: &dyn PageSurface) -> Result<ReadinessSignal> {
    if page.is_visible(SEND_BUTTON)? {
        return Ok(ReadinessSignal::SendReady);
    }
    if find_visible(page, COMPOSE_SELECTORS)?.is_some() {
        return Ok(ReadinessSignal::ComposeReady);
    }
    if find_visible(page, QR_SELECTORS)?.is_some() {
        return Ok(ReadinessSignal::QrPending);
    }
    Ok(ReadinessSignal::NotReady)
}

/// Polling state machine gating dispatch.
///
/// `poll` is a single deterministic step driven by the caller's clock;
/// `wait` is the real driver that sleeps between steps.
pub struct ReadinessMonitor {
    timeout: Duration,
    qr_informed: bool,
    last_heartbeat: Option<Duration>,
}

impl ReadinessMonitor {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            qr_informed: false,
            last_heartbeat: None,
        }
    }

    /// One tick: deadline check first, then the probes.
    pub fn poll(
        &mut self,
        page: &dyn PageSurface,
        elapsed: Duration,
    ) -> Result<(MonitorState, Vec<Notice>)> {
        if elapsed >= self.timeout {
            return Ok((MonitorState::TimedOut, Vec::new()));
        }

        match classify(page)? {
            ReadinessSignal::SendReady => {
                Ok((MonitorState::Ready(ReadyPath::SendControl), Vec::new()))
            }
            ReadinessSignal::ComposeReady => {
                Ok((MonitorState::Ready(ReadyPath::ComposeBox), Vec::new()))
            }
            signal => {
                let mut notices = Vec::new();

                // First-run hint, once per monitor lifetime
                if signal == ReadinessSignal::QrPending && !self.qr_informed {
                    self.qr_informed = true;
                    notices.push(Notice::ScanQr);
                }

                let heartbeat_due = match self.last_heartbeat {
                    None => true,
                    Some(at) => elapsed.saturating_sub(at)
                        >= Duration::from_secs(HEARTBEAT_INTERVAL_SECS),
                };
                if heartbeat_due {
                    self.last_heartbeat = Some(elapsed);
                    notices.push(Notice::Heartbeat);
                }

                Ok((MonitorState::Waiting, notices))
            }
        }
    }

    /// Block until the page is ready or the deadline passes.
    pub fn wait(&mut self, page: &dyn PageSurface) -> Result<ReadyPath> {
        let start = Instant::now();
        loop {
            let (state, notices) = self.poll(page, start.elapsed())?;
            for notice in notices {
                eprintln!("{}", notice);
            }
            match state {
                MonitorState::Ready(path) => {
                    debug!("Page ready via {:?} after {:?}", path, start.elapsed());
                    return Ok(path);
                }
                MonitorState::TimedOut => return Err(Error::ReadinessTimeout),
                MonitorState::Waiting => {
                    std::thread::sleep(Duration::from_millis(POLL_INTERVAL_MS))
                }
            }
        }
    }
}
