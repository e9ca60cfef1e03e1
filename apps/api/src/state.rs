use crate::config::Config;
use crate::matching::pipeline::MatchPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is read-only after startup; requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Tagger, keyword extractor and model client, wired once at startup.
    pub pipeline: MatchPipeline,
}
