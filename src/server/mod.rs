pub mod error;
pub mod routes;

use crate::config::Config;
use crate::limiter::DailyLimiter;
use crate::pipeline::{
    CompletionClient, LlmExtractor, LlmVerifier, OpenAiCompletion, VerificationPipeline, WebSearch,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;
pub use routes::router;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<VerificationPipeline>,
    pub limiter: Arc<DailyLimiter>,
    /// Used directly by the completion diagnostic route.
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(
        pipeline: VerificationPipeline,
        limiter: DailyLimiter,
        completion: Arc<dyn CompletionClient>,
    ) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
            limiter: Arc::new(limiter),
            completion,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let completion: Arc<dyn CompletionClient> = Arc::new(OpenAiCompletion::new(
            &config.openai.api_key,
            &config.openai.model,
            config.openai.api_base.as_deref(),
            config.request_timeout,
        ));
        let search = WebSearch::new(
            config.search.api_key.clone(),
            &config.search.endpoint,
            config.request_timeout,
        );
        let pipeline = VerificationPipeline::new(
            Arc::new(LlmExtractor::new(Arc::clone(&completion))),
            Arc::new(search),
            Arc::new(LlmVerifier::new(Arc::clone(&completion))),
        );
        Self::new(pipeline, DailyLimiter::new(config.daily_limit), completion)
    }
}

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state).into_make_service_with_connect_info::<SocketAddr>();
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
