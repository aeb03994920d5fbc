use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::Timelike;
use tokio::test;

use scheduler::dayset::DaySet;
use scheduler::engine::{EVENING_JOB_ID, MORNING_JOB_ID, PostCallback, PostScheduler};

fn noop_callback() -> PostCallback {
    Arc::new(|| Box::pin(async { Ok(()) }))
}

fn counting_callback(counter: Arc<AtomicUsize>) -> PostCallback {
    Arc::new(move || {
        let counter = counter.clone();
        Box::pin(async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
    })
}

/// Minutes between two times of day on the 24h circle.
fn circular_distance_minutes(a: (u32, u32), b: (u32, u32)) -> i64 {
    let a = (a.0 * 60 + a.1) as i64;
    let b = (b.0 * 60 + b.1) as i64;
    let d = (a - b).rem_euclid(24 * 60);
    d.min(24 * 60 - d)
}

#[test]
async fn registering_daily_posts_twice_keeps_exactly_two_jobs() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;

    sched.schedule_daily_posts(noop_callback(), "09:00", "19:00").await?;
    sched.schedule_daily_posts(noop_callback(), "09:00", "19:00").await?;

    let runs = sched.get_next_run_times().await;
    assert_eq!(runs.len(), 2);

    let ids: Vec<&str> = runs.iter().map(|r| r.job_id.as_str()).collect();
    assert!(ids.contains(&MORNING_JOB_ID));
    assert!(ids.contains(&EVENING_JOB_ID));

    Ok(())
}

#[test]
async fn malformed_time_fails_before_any_registration() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;

    let err = sched
        .schedule_daily_posts(noop_callback(), "9am", "19:00")
        .await;
    assert!(err.is_err());
    assert!(sched.get_next_run_times().await.is_empty());

    Ok(())
}

#[test]
async fn unknown_timezone_is_rejected_at_construction() {
    assert!(PostScheduler::new("Mars/Olympus_Mons").is_err());
    assert!(PostScheduler::new("Europe/Berlin").is_ok());
}

#[test]
async fn custom_post_replaces_job_under_same_id() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;

    sched
        .schedule_custom_post(noop_callback(), 8, 0, DaySet::weekdays(), "weekly_recap")
        .await?;
    sched
        .schedule_custom_post(noop_callback(), 17, 30, DaySet::weekdays(), "weekly_recap")
        .await?;

    let runs = sched.get_next_run_times().await;
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].job_id, "weekly_recap");

    Ok(())
}

#[test]
async fn custom_post_rejects_out_of_range_times() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;

    let err = sched
        .schedule_custom_post(noop_callback(), 24, 0, DaySet::every_day(), "bad")
        .await;
    assert!(err.is_err());

    Ok(())
}

#[test]
async fn next_runs_appear_only_while_running() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;
    sched.schedule_daily_posts(noop_callback(), "09:00", "19:00").await?;

    assert!(sched.get_next_run_times().await.iter().all(|r| r.next_run.is_none()));

    sched.start().await;
    assert!(sched.get_next_run_times().await.iter().all(|r| r.next_run.is_some()));

    sched.stop().await;
    assert!(sched.get_next_run_times().await.iter().all(|r| r.next_run.is_none()));

    // Stopped is restartable.
    sched.start().await;
    assert!(sched.is_running().await);
    sched.stop().await;

    Ok(())
}

#[test]
async fn jittered_fire_time_stays_within_half_hour_of_base() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;
    sched.schedule_daily_posts(noop_callback(), "09:00", "19:00").await?;
    sched.start().await;

    for run in sched.get_next_run_times().await {
        let fire = run.next_run.unwrap();
        let base = if run.job_id == MORNING_JOB_ID { (9, 0) } else { (19, 0) };
        let distance = circular_distance_minutes((fire.hour(), fire.minute()), base);
        assert!(distance <= 30, "{}: fires {distance} min from base", run.job_id);
    }

    sched.stop().await;
    Ok(())
}

#[test]
async fn start_and_stop_are_idempotent() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;
    sched.schedule_daily_posts(noop_callback(), "09:00", "19:00").await?;

    sched.stop().await; // not running yet: no-op
    sched.start().await;
    sched.start().await; // already running: no-op
    assert!(sched.is_running().await);

    sched.stop().await;
    sched.stop().await;
    assert!(!sched.is_running().await);

    Ok(())
}

#[test(start_paused = true)]
async fn running_job_fires_its_callback() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;
    let counter = Arc::new(AtomicUsize::new(0));

    sched
        .schedule_custom_post(counting_callback(counter.clone()), 12, 0, DaySet::every_day(), "noon")
        .await?;
    sched.start().await;

    // The paused clock auto-advances to the timer's deadline; sleeping past
    // the next slot lets the job fire without real waiting.
    tokio::time::sleep(Duration::from_secs(60 * 60 * 48)).await;
    assert!(counter.load(Ordering::SeqCst) >= 1);

    sched.stop().await;
    Ok(())
}

#[test(start_paused = true)]
async fn failing_callback_does_not_kill_the_timer() -> anyhow::Result<()> {
    let sched = PostScheduler::new("UTC")?;
    let counter = Arc::new(AtomicUsize::new(0));

    let attempts = counter.clone();
    let callback: PostCallback = Arc::new(move || {
        let attempts = attempts.clone();
        Box::pin(async move {
            attempts.fetch_add(1, Ordering::SeqCst);
            anyhow::bail!("upstream rejected the post")
        })
    });

    sched
        .schedule_custom_post(callback, 12, 0, DaySet::every_day(), "noon")
        .await?;
    sched.start().await;

    // The timer must survive the error and re-arm for further fires.
    tokio::time::sleep(Duration::from_secs(60 * 60 * 72)).await;
    assert!(counter.load(Ordering::SeqCst) >= 2);

    sched.stop().await;
    Ok(())
}
