//! Periodic background jobs.
//!
//! Each job owns a thread that waits on its shutdown channel with a timeout
//! equal to the job interval; a timeout runs one tick, a message or a closed
//! channel ends the loop. Ticks never run before the first interval elapses.

use crate::registry::{self, SharedRegistry};
use crate::scanner::{AutoFixOutcome, ProactiveFileScanner, ScanSummary};
use chrono::Utc;
use ew_common::{Error, Result};
use ew_config::ScheduleSettings;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

pub const HEALTH_JOB: &str = "health-refresh";
pub const PRUNE_JOB: &str = "critical-log-prune";
pub const SCAN_JOB: &str = "project-scan";

/// Scanner as shared with the scan job.
pub type SharedScanner = Arc<Mutex<ProactiveFileScanner>>;

struct Job {
    name: String,
    stop: Sender<()>,
    runs: Arc<AtomicU64>,
    handle: JoinHandle<()>,
}

/// Named periodic jobs on background threads.
#[derive(Default)]
pub struct Scheduler {
    jobs: Vec<Job>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `tick` every `interval` on a dedicated thread.
    pub fn spawn<F>(&mut self, name: &str, interval: Duration, mut tick: F) -> Result<()>
    where
        F: FnMut() + Send + 'static,
    {
        let (stop, stopped) = mpsc::channel::<()>();
        let runs = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&runs);
        let job_name = name.to_string();

        let handle = thread::Builder::new()
            .name(format!("errwatch-{name}"))
            .spawn(move || {
                debug!(target: "daemon", job = %job_name, ?interval, "job started");
                loop {
                    match stopped.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => {
                            tick();
                            counter.fetch_add(1, Ordering::Relaxed);
                        }
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!(target: "daemon", job = %job_name, "job stopped");
            })
            .map_err(|e| Error::TaskSpawn(format!("{name}: {e}")))?;

        self.jobs.push(Job {
            name: name.to_string(),
            stop,
            runs,
            handle,
        });
        Ok(())
    }

    /// Names of running jobs, in start order.
    pub fn job_names(&self) -> Vec<&str> {
        self.jobs.iter().map(|j| j.name.as_str()).collect()
    }

    /// Completed ticks of a job.
    pub fn runs(&self, name: &str) -> Option<u64> {
        self.jobs
            .iter()
            .find(|j| j.name == name)
            .map(|j| j.runs.load(Ordering::Relaxed))
    }

    /// Signal every job and wait for its thread to exit.
    pub fn shutdown(self) {
        for job in &self.jobs {
            // A job that already exited has dropped its receiver.
            let _ = job.stop.send(());
        }
        for job in self.jobs {
            if job.handle.join().is_err() {
                warn!(target: "daemon", job = %job.name, "job panicked");
            }
        }
        info!(target: "daemon", "scheduler stopped");
    }
}

/// One health refresh.
pub fn health_tick(registry: &SharedRegistry) {
    let metrics = registry::shared::lock(registry).refresh_health(Utc::now());
    debug!(
        target: "daemon.health",
        uptime = metrics.uptime,
        error_rate = metrics.error_rate,
        "health refreshed"
    );
}

/// One critical-log prune.
pub fn prune_tick(registry: &SharedRegistry) -> usize {
    let dropped = registry::shared::lock(registry).prune_critical_log(Utc::now());
    if dropped > 0 {
        info!(target: "daemon.prune", dropped, "critical log pruned");
    }
    dropped
}

/// One project scan followed by the auto-fix pass.
pub fn scan_tick(scanner: &SharedScanner) -> (ScanSummary, AutoFixOutcome) {
    let mut scanner = scanner.lock().unwrap_or_else(PoisonError::into_inner);
    let summary = scanner.scan_project();
    let fixes = scanner.auto_fix_violations();
    (summary, fixes)
}

fn secs(n: u64) -> Duration {
    Duration::from_secs(n)
}

/// Start the three standard jobs.
pub fn start_default_jobs(
    schedule: &ScheduleSettings,
    registry: SharedRegistry,
    scanner: SharedScanner,
) -> Result<Scheduler> {
    let mut scheduler = Scheduler::new();

    let health = Arc::clone(&registry);
    scheduler.spawn(HEALTH_JOB, secs(schedule.health_interval_secs), move || {
        health_tick(&health)
    })?;

    let prune = registry;
    scheduler.spawn(PRUNE_JOB, secs(schedule.prune_interval_secs), move || {
        prune_tick(&prune);
    })?;

    scheduler.spawn(SCAN_JOB, secs(schedule.scan_interval_secs), move || {
        scan_tick(&scanner);
    })?;

    info!(
        target: "daemon",
        health_secs = schedule.health_interval_secs,
        prune_secs = schedule.prune_interval_secs,
        scan_secs = schedule.scan_interval_secs,
        "started {} periodic jobs",
        scheduler.jobs.len()
    );
    Ok(scheduler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ErrorPatternRegistry;
    use crate::scanner::builtin_rules;
    use std::path::PathBuf;
    use std::time::Instant;

    fn wait_for(scheduler: &Scheduler, name: &str, at_least: u64) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if scheduler.runs(name).unwrap_or(0) >= at_least {
                return true;
            }
            thread::sleep(Duration::from_millis(5));
        }
        false
    }

    #[test]
    fn job_ticks_until_shutdown() {
        let hits = Arc::new(AtomicU64::new(0));
        let seen = Arc::clone(&hits);
        let mut s = Scheduler::new();
        s.spawn("counter", Duration::from_millis(10), move || {
            seen.fetch_add(1, Ordering::SeqCst);
        })
        .unwrap();

        assert!(wait_for(&s, "counter", 3));
        s.shutdown();
        let after = hits.load(Ordering::SeqCst);
        thread::sleep(Duration::from_millis(40));
        assert_eq!(hits.load(Ordering::SeqCst), after);
    }

    #[test]
    fn long_interval_job_never_ticks_before_shutdown() {
        let mut s = Scheduler::new();
        s.spawn("slow", Duration::from_secs(3600), || {}).unwrap();
        let start = Instant::now();
        assert_eq!(s.runs("slow"), Some(0));
        s.shutdown();
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[test]
    fn health_tick_stores_metrics() {
        let shared = registry::share(ErrorPatternRegistry::with_defaults().unwrap());
        assert!(registry::shared::lock(&shared).metrics().is_none());
        health_tick(&shared);
        let guard = registry::shared::lock(&shared);
        assert_eq!(guard.metrics().unwrap().uptime, 100.0);
    }

    #[test]
    fn default_jobs_start_with_configured_names() {
        let dir = tempfile::TempDir::new().unwrap();
        let shared = registry::share(ErrorPatternRegistry::with_defaults().unwrap());
        let scanner = Arc::new(Mutex::new(ProactiveFileScanner::new(
            builtin_rules(&[]).unwrap(),
            dir.path(),
            vec![PathBuf::from("A.tsx")],
        )));
        let schedule = ScheduleSettings {
            health_interval_secs: 3600,
            prune_interval_secs: 3600,
            scan_interval_secs: 3600,
        };
        let s = start_default_jobs(&schedule, shared, scanner).unwrap();
        assert_eq!(s.job_names(), vec![HEALTH_JOB, PRUNE_JOB, SCAN_JOB]);
        s.shutdown();
    }

    #[test]
    fn scan_tick_scans_then_proposes_fixes() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("A.tsx"), "console.log('x')\n").unwrap();
        let scanner = Arc::new(Mutex::new(ProactiveFileScanner::new(
            builtin_rules(&[]).unwrap(),
            dir.path(),
            vec![PathBuf::from("A.tsx")],
        )));
        let (summary, fixes) = scan_tick(&scanner);
        assert_eq!(summary.violations, 1);
        assert_eq!(fixes.fixable, 1);
    }
}
