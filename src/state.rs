//! Shared application state.
//!
//! Collaborator clients are built once at startup from the shared SDK
//! configuration and treated as immutable read-only handles for the lifetime
//! of the process. Requests share them concurrently; nothing here is mutated
//! after construction.

use std::sync::Arc;

use aws_config::BehaviorVersion;
use tracing::info;

use crate::config::ServerConfig;
use crate::core::language::{
    AwsTranslator, ComprehendLanguageDetector, ComprehendSentimentClassifier,
};
use crate::core::pipeline::Pipeline;
use crate::core::reply::CohereReplyGenerator;
use crate::core::storage::S3ObjectStore;
use crate::core::synth::AwsPollySynthesizer;
use crate::core::transcribe::{AwsTranscribeEngine, PollPolicy, TokioClock};
use crate::core::voice::VoiceTable;

/// Process-wide application state shared across requests.
pub struct AppState {
    pub config: ServerConfig,
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    /// Build all collaborator clients and assemble the pipeline.
    pub async fn new(config: ServerConfig) -> Arc<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest()).load().await;

        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .expect("failed to build HTTP client");

        let pipeline = Pipeline {
            store: Arc::new(S3ObjectStore::new(
                aws_sdk_s3::Client::new(&sdk_config),
                config.transcribe_bucket.clone(),
            )),
            engine: Arc::new(AwsTranscribeEngine::new(
                aws_sdk_transcribe::Client::new(&sdk_config),
                http.clone(),
            )),
            detector: Arc::new(ComprehendLanguageDetector::new(
                aws_sdk_comprehend::Client::new(&sdk_config),
            )),
            translator: Arc::new(AwsTranslator::new(aws_sdk_translate::Client::new(
                &sdk_config,
            ))),
            sentiment: Arc::new(ComprehendSentimentClassifier::new(
                aws_sdk_comprehend::Client::new(&sdk_config),
            )),
            reply: Arc::new(CohereReplyGenerator::new(
                http,
                config.cohere_api_key.clone(),
            )),
            synthesizer: Arc::new(AwsPollySynthesizer::new(aws_sdk_polly::Client::new(
                &sdk_config,
            ))),
            voices: VoiceTable::default(),
            clock: Arc::new(TokioClock),
            policy: PollPolicy {
                poll_interval: config.poll_interval,
                wait_budget: config.wait_budget,
            },
            output_bucket: config.transcribe_bucket.clone(),
        };

        info!(bucket = %config.transcribe_bucket, "application state initialized");

        Arc::new(Self {
            config,
            pipeline: Arc::new(pipeline),
        })
    }

    /// Assemble state around an existing pipeline. Used by tests that swap
    /// in mock collaborators.
    pub fn with_pipeline(config: ServerConfig, pipeline: Pipeline) -> Arc<Self> {
        Arc::new(Self {
            config,
            pipeline: Arc::new(pipeline),
        })
    }
}
