//! The recurring post scheduler.
//!
//! Owns one timer task per registered job. Each task sleeps until the next
//! occurrence of its slot in the configured timezone, invokes the posting
//! callback, then re-arms from a fresh `now`. Registering a job id that
//! already exists replaces the previous registration, so a logical slot
//! never accumulates duplicate timers.

use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use futures::FutureExt;
use tokio::sync::{Mutex, watch};

use crate::dayset::DaySet;
use crate::error::SchedulerError;
use crate::jitter::{self, DEFAULT_JITTER_MINUTES};
use crate::occurrence::next_occurrence;

pub const MORNING_JOB_ID: &str = "morning_post";
pub const EVENING_JOB_ID: &str = "evening_post";

pub type BoxedPostFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>> + Send>>;

/// The posting action supplied by the orchestrator. A failed invocation is
/// logged and the timer simply waits for the next natural fire; the
/// scheduler never retries on its own.
pub type PostCallback = Arc<dyn Fn() -> BoxedPostFuture + Send + Sync>;

#[derive(Debug, Clone)]
pub struct JobSpec {
    pub id: String,
    pub name: String,
    pub hour: u32,
    pub minute: u32,
    pub days: DaySet,
}

struct Job {
    spec: JobSpec,
    callback: PostCallback,
    /// Present while the job's timer task is alive. Dropping or signalling
    /// the sender stops the task at its next sleep, never mid-callback.
    cancel: Option<watch::Sender<bool>>,
}

struct Inner {
    jobs: HashMap<String, Job>,
    running: bool,
}

pub struct PostScheduler {
    tz: Tz,
    inner: Mutex<Inner>,
}

impl PostScheduler {
    /// Fails fast on an unknown timezone name, before anything is armed.
    pub fn new(timezone: &str) -> Result<Self, SchedulerError> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| SchedulerError::UnknownTimezone(timezone.to_string()))?;

        Ok(Self {
            tz,
            inner: Mutex::new(Inner {
                jobs: HashMap::new(),
                running: false,
            }),
        })
    }

    /// Register the two daily slots, every day, with one independent random
    /// offset of up to ±30 minutes drawn per slot at registration time.
    /// Calling this again re-draws the jitter and replaces both jobs.
    pub async fn schedule_daily_posts(
        &self,
        callback: PostCallback,
        morning_time: &str,
        evening_time: &str,
    ) -> Result<(), SchedulerError> {
        let (morning_hour, morning_minute) = parse_hhmm(morning_time)?;
        let (evening_hour, evening_minute) = parse_hhmm(evening_time)?;

        // Scoped so the RNG is gone before the first await.
        let (morning_offset, evening_offset) = {
            let mut rng = rand::thread_rng();
            (
                jitter::draw_offset(&mut rng, DEFAULT_JITTER_MINUTES),
                jitter::draw_offset(&mut rng, DEFAULT_JITTER_MINUTES),
            )
        };

        let (hour, minute) = jitter::apply_offset(morning_hour, morning_minute, morning_offset);
        self.register(
            JobSpec {
                id: MORNING_JOB_ID.to_string(),
                name: "Morning LinkedIn Post".to_string(),
                hour,
                minute,
                days: DaySet::every_day(),
            },
            callback.clone(),
        )
        .await;
        tracing::info!(base = morning_time, offset_min = morning_offset, "scheduled daily morning post");

        let (hour, minute) = jitter::apply_offset(evening_hour, evening_minute, evening_offset);
        self.register(
            JobSpec {
                id: EVENING_JOB_ID.to_string(),
                name: "Evening LinkedIn Post".to_string(),
                hour,
                minute,
                days: DaySet::every_day(),
            },
            callback,
        )
        .await;
        tracing::info!(base = evening_time, offset_min = evening_offset, "scheduled daily evening post");

        Ok(())
    }

    /// Arbitrary recurring slot, same replace-on-reuse semantics as the
    /// daily jobs. No jitter is applied here.
    pub async fn schedule_custom_post(
        &self,
        callback: PostCallback,
        hour: u32,
        minute: u32,
        days: DaySet,
        job_id: &str,
    ) -> Result<(), SchedulerError> {
        if hour >= 24 || minute >= 60 {
            return Err(SchedulerError::TimeOutOfRange { hour, minute });
        }

        self.register(
            JobSpec {
                id: job_id.to_string(),
                name: job_id.to_string(),
                hour,
                minute,
                days,
            },
            callback,
        )
        .await;
        tracing::info!(job_id, hour, minute, "scheduled custom post");

        Ok(())
    }

    async fn register(&self, spec: JobSpec, callback: PostCallback) {
        let mut inner = self.inner.lock().await;

        if let Some(old) = inner.jobs.remove(&spec.id) {
            if let Some(cancel) = old.cancel {
                let _ = cancel.send(true);
            }
            tracing::debug!(job_id = %spec.id, "replacing existing registration");
        }

        let cancel = inner
            .running
            .then(|| spawn_job(self.tz, spec.clone(), callback.clone()));

        inner.jobs.insert(spec.id.clone(), Job { spec, callback, cancel });
    }

    /// Arm a timer task for every registered job. No-op while running.
    pub async fn start(&self) {
        let mut inner = self.inner.lock().await;
        if inner.running {
            return;
        }
        inner.running = true;

        for job in inner.jobs.values_mut() {
            job.cancel = Some(spawn_job(self.tz, job.spec.clone(), job.callback.clone()));
        }
        tracing::info!(jobs = inner.jobs.len(), "scheduler started");
    }

    /// Halt future fires promptly. A callback already in flight runs to
    /// completion. No-op unless running; `start` re-arms afterwards.
    pub async fn stop(&self) {
        let mut inner = self.inner.lock().await;
        if !inner.running {
            return;
        }
        inner.running = false;

        for job in inner.jobs.values_mut() {
            if let Some(cancel) = job.cancel.take() {
                let _ = cancel.send(true);
            }
        }
        tracing::info!("scheduler stopped");
    }

    pub async fn is_running(&self) -> bool {
        self.inner.lock().await.running
    }

    /// Upcoming fire time per registered job, computed against the live job
    /// set. Jobs report no next run while the scheduler is not running.
    pub async fn get_next_run_times(&self) -> Vec<NextRun> {
        let inner = self.inner.lock().await;
        let now = Utc::now().with_timezone(&self.tz);

        let mut runs: Vec<NextRun> = inner
            .jobs
            .values()
            .map(|job| NextRun {
                job_id: job.spec.id.clone(),
                name: job.spec.name.clone(),
                next_run: inner
                    .running
                    .then(|| {
                        next_occurrence(now, job.spec.hour, job.spec.minute, &job.spec.days, self.tz)
                    })
                    .flatten(),
            })
            .collect();

        runs.sort_by(|a, b| a.job_id.cmp(&b.job_id));
        runs
    }

    pub fn is_optimal_time(&self, dt: &DateTime<Tz>) -> bool {
        crate::optimal::is_optimal_time(dt)
    }

    /// Advisory only: manual posts may ignore it.
    pub fn is_optimal_now(&self) -> bool {
        self.is_optimal_time(&Utc::now().with_timezone(&self.tz))
    }
}

#[derive(Debug, Clone)]
pub struct NextRun {
    pub job_id: String,
    pub name: String,
    pub next_run: Option<DateTime<Tz>>,
}

impl NextRun {
    pub fn display_time(&self) -> String {
        match &self.next_run {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S %Z").to_string(),
            None => "not scheduled".to_string(),
        }
    }
}

/// Timer loop for one job. Returns the cancel handle; the task itself is
/// detached.
fn spawn_job(tz: Tz, spec: JobSpec, callback: PostCallback) -> watch::Sender<bool> {
    let (cancel_tx, mut cancel_rx) = watch::channel(false);

    tokio::spawn(async move {
        loop {
            let now = Utc::now().with_timezone(&tz);
            let Some(next) = next_occurrence(now, spec.hour, spec.minute, &spec.days, tz) else {
                tracing::error!(job_id = %spec.id, "no future occurrence, timer exiting");
                break;
            };
            let wait = (next - now).to_std().unwrap_or_default();
            tracing::debug!(job_id = %spec.id, fire_at = %next, "timer armed");

            tokio::select! {
                _ = tokio::time::sleep(wait) => {
                    tracing::info!(job_id = %spec.id, "firing scheduled post");
                    match std::panic::AssertUnwindSafe((callback)()).catch_unwind().await {
                        Ok(Ok(())) => {}
                        Ok(Err(e)) => {
                            tracing::error!(job_id = %spec.id, error = ?e, "post callback failed, waiting for next fire");
                        }
                        Err(_) => {
                            tracing::error!(job_id = %spec.id, "post callback panicked, timer continues");
                        }
                    }
                }
                _ = cancel_rx.changed() => break,
            }
        }
    });

    cancel_tx
}

fn parse_hhmm(s: &str) -> Result<(u32, u32), SchedulerError> {
    let bad = || SchedulerError::InvalidTime(s.to_string());

    let (h, m) = s.split_once(':').ok_or_else(bad)?;
    let hour: u32 = h.trim().parse().map_err(|_| bad())?;
    let minute: u32 = m.trim().parse().map_err(|_| bad())?;

    if hour >= 24 || minute >= 60 {
        return Err(SchedulerError::TimeOutOfRange { hour, minute });
    }
    Ok((hour, minute))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_times() {
        assert_eq!(parse_hhmm("09:00").unwrap(), (9, 0));
        assert_eq!(parse_hhmm("23:59").unwrap(), (23, 59));
        assert_eq!(parse_hhmm("0:5").unwrap(), (0, 5));
    }

    #[test]
    fn rejects_malformed_times() {
        assert!(parse_hhmm("9am").is_err());
        assert!(parse_hhmm("").is_err());
        assert!(parse_hhmm("09:00:00").is_err());
        assert!(parse_hhmm("25:00").is_err());
        assert!(parse_hhmm("09:75").is_err());
    }
}
