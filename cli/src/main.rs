use std::sync::Arc;

use clap::{Parser, Subcommand};

use cli::config::AppConfig;
use cli::pipeline::{PostOutcome, PostPipeline};
use common::logger::init_logger;
use content::{ContentEngine, DisabledImageEngine, GeminiEngine, ImageEngine, OpenAiImageEngine};
use linkedin::{LinkedInClient, Publisher};
use scheduler::{PostCallback, PostScheduler};
use topics::manager::TopicManager;
use topics::store::TopicStore;
use topics::store::json_store::JsonFileStore;

#[derive(Parser)]
#[command(name = "cadence", about = "Automated LinkedIn posting")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Create and publish a single post immediately
    Once,
    /// Run the recurring daily schedule until interrupted
    Schedule {
        /// Skip the verification post normally sent right after startup
        #[arg(long)]
        skip_startup_post: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("cadence");

    let cfg = AppConfig::from_env()?;
    let cli = Cli::parse();

    let store = Arc::new(JsonFileStore::new(&cfg.topics_file));
    let topics = Arc::new(TopicManager::new(store).await?);

    let content_engine = Arc::new(GeminiEngine::new(cfg.gemini_api_key.clone())?);
    let images: Arc<dyn ImageEngine> = match &cfg.openai_api_key {
        Some(key) => Arc::new(OpenAiImageEngine::new(key.clone(), &cfg.image_dir)?),
        None => Arc::new(DisabledImageEngine),
    };
    let publisher = Arc::new(LinkedInClient::new(cfg.linkedin_access_token.clone())?);

    let pipeline = Arc::new(PostPipeline::new(topics, content_engine, images, publisher));

    match cli.command.unwrap_or(Command::Schedule {
        skip_startup_post: false,
    }) {
        Command::Once => {
            let sched = PostScheduler::new(&cfg.timezone)?;
            if !sched.is_optimal_now() {
                tracing::info!("outside the usual engagement windows, posting anyway");
            }
            match pipeline.create_and_post().await? {
                PostOutcome::Posted { urn } => tracing::info!(%urn, "post published"),
                PostOutcome::NoTopic => anyhow::bail!("no topics available"),
            }
        }
        Command::Schedule { skip_startup_post } => {
            run_schedule(pipeline, &cfg, skip_startup_post).await?;
        }
    }

    Ok(())
}

async fn run_schedule<S, C, P>(
    pipeline: Arc<PostPipeline<S, C, P>>,
    cfg: &AppConfig,
    skip_startup_post: bool,
) -> anyhow::Result<()>
where
    S: TopicStore + 'static,
    C: ContentEngine + 'static,
    P: Publisher + 'static,
{
    // Post once right away so a broken deployment is noticed immediately,
    // not at the next slot hours later.
    if !skip_startup_post {
        tracing::info!("sending startup verification post");
        match pipeline.create_and_post().await {
            Ok(PostOutcome::Posted { urn }) => tracing::info!(%urn, "startup post succeeded"),
            Ok(PostOutcome::NoTopic) => tracing::warn!("startup post skipped: no topics"),
            Err(e) => tracing::error!(error = ?e, "startup post failed"),
        }
    }

    let sched = PostScheduler::new(&cfg.timezone)?;

    let cb_pipeline = pipeline.clone();
    let callback: PostCallback = Arc::new(move || {
        let pipeline = cb_pipeline.clone();
        Box::pin(async move { pipeline.create_and_post().await.map(|_| ()) })
    });

    sched
        .schedule_daily_posts(callback, &cfg.morning_post_time, &cfg.evening_post_time)
        .await?;
    sched.start().await;

    for run in sched.get_next_run_times().await {
        tracing::info!(job = %run.job_id, name = %run.name, next = %run.display_time(), "job armed");
    }

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutdown signal received");
    sched.stop().await;

    Ok(())
}
