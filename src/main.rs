use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tokio::sync::mpsc;

use klaksvik::application::services::{TranscriptionPipeline, TranscriptionWorker};
use klaksvik::infrastructure::audio::{FfmpegTempoShifter, TranscriptionEngineFactory};
use klaksvik::infrastructure::fetch::HttpAudioFetcher;
use klaksvik::infrastructure::observability::{TracingConfig, init_tracing};
use klaksvik::infrastructure::staging::StagingArea;
use klaksvik::infrastructure::webhook::HttpResultNotifier;
use klaksvik::presentation::{AppState, Settings, create_router};

const JOB_CHANNEL_CAPACITY: usize = 64;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::from_env()?;

    init_tracing(TracingConfig::default(), settings.server.port);

    let staging = Arc::new(StagingArea::new(settings.staging.dir.clone())?);

    let fetcher = Arc::new(HttpAudioFetcher::new(Arc::clone(&staging)));
    let tempo_shifter = Arc::new(FfmpegTempoShifter::new(Arc::clone(&staging)));
    let engine = TranscriptionEngineFactory::create(
        settings.transcription.provider.as_provider(),
        &settings.transcription.model,
        settings.transcription.api_key.clone(),
        settings.transcription.base_url.clone(),
    )?;

    let pipeline = Arc::new(TranscriptionPipeline::new(
        fetcher,
        tempo_shifter,
        engine,
        settings.pipeline.tempo_factor,
    ));

    let (job_sender, job_receiver) = mpsc::channel(JOB_CHANNEL_CAPACITY);
    let worker = TranscriptionWorker::new(
        job_receiver,
        Arc::clone(&pipeline),
        Arc::new(HttpResultNotifier::new()),
    );
    tokio::spawn(worker.run());

    let state = AppState {
        pipeline,
        job_sender,
    };
    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port).parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
