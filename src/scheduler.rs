use std::path::Path;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use log::{debug, error};
use rand::Rng;

use crate::host::{HostBridge, ShutdownMonitor};
use crate::model::asset::Asset;
use crate::repository::userdata::Userdata;
use crate::sportcast_error::SportcastError;

/// How long the service sleeps between abort checks.
const WAKE_INTERVAL: Duration = Duration::from_secs(10);

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum AlertDisposition {
    /// Event went live recently enough to offer playback now.
    Prompt,
    /// Not started yet, check again next tick.
    Keep,
    /// Missed or expired, forget it.
    Drop,
}

pub fn classify_alert(asset: &Asset, now: DateTime<Utc>, grace_secs: u64) -> AlertDisposition {
    let start = asset.effective_start();
    if asset.is_streaming {
        let since_start = (now - start).num_seconds();
        if (0..=grace_secs as i64).contains(&since_start) {
            return AlertDisposition::Prompt;
        }
    }
    if start > now {
        AlertDisposition::Keep
    } else {
        AlertDisposition::Drop
    }
}

/// One checker tick over the pending alert set. The surviving set is
/// persisted before any prompt is shown; a prompted id is gone regardless of
/// the answer, and every watch attempt is guarded so one failure never stops
/// the remaining prompts.
pub fn run_alert_check<F, W>(
    userdata: &mut Userdata,
    userdata_path: &Path,
    grace_secs: u64,
    now: DateTime<Utc>,
    host: &dyn HostBridge,
    fetch_event: F,
    mut watch: W,
) -> Result<(), SportcastError>
where
    F: Fn(&str) -> Result<Asset, SportcastError>,
    W: FnMut(&Asset) -> Result<(), SportcastError>,
{
    if userdata.alerts.is_empty() {
        return Ok(());
    }

    let mut pending = IndexSet::new();
    let mut prompts: Vec<Asset> = Vec::new();

    for id in &userdata.alerts {
        match fetch_event(id) {
            Ok(asset) => match classify_alert(&asset, now, grace_secs) {
                AlertDisposition::Prompt => prompts.push(asset),
                AlertDisposition::Keep => {
                    pending.insert(id.clone());
                }
                AlertDisposition::Drop => debug!("alert {id} expired"),
            },
            Err(err) => {
                // transient lookup failure, try again next tick
                error!("alert check failed for {id}: {err}");
                pending.insert(id.clone());
            }
        }
    }

    userdata.alerts = pending;
    userdata.save(userdata_path)?;

    for asset in prompts {
        if host.confirm(&format!("{} has started", asset.title), "Watch", "Close") {
            if let Err(err) = watch(&asset) {
                error!("watch failed for {}: {err}", asset.id);
                host.show_message(err.message());
            }
        }
    }

    Ok(())
}

/// Background service loop: random startup jitter, then short abort-aware
/// sleeps, running a tick whenever the configured interval has elapsed.
/// Returns promptly once the monitor signals shutdown.
pub fn run_service<T: FnMut()>(monitor: &ShutdownMonitor, interval: Duration, mut tick: T) {
    let jitter = rand::rng().random_range(5..=30);
    if monitor.wait_for_abort(Duration::from_secs(jitter)) {
        return;
    }

    let mut last_run: Option<Instant> = None;
    while !monitor.wait_for_abort(WAKE_INTERVAL) {
        if last_run.map_or(true, |t| t.elapsed() >= interval) {
            tick();
            last_run = Some(Instant::now());
        }
    }
}
