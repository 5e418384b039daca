use std::sync::Arc;

use crate::application::ports::{AudioNormalizer, TranscriptionEngine};
use crate::application::services::{ResultCache, TranscriptionService};
use crate::presentation::config::Settings;

pub struct AppState<E, N>
where
    E: TranscriptionEngine,
    N: AudioNormalizer,
{
    pub engine: Arc<E>,
    pub normalizer: Arc<N>,
    pub transcription_service: Arc<TranscriptionService<E>>,
    pub cache: Arc<ResultCache>,
    pub settings: Settings,
}

impl<E, N> Clone for AppState<E, N>
where
    E: TranscriptionEngine,
    N: AudioNormalizer,
{
    fn clone(&self) -> Self {
        Self {
            engine: Arc::clone(&self.engine),
            normalizer: Arc::clone(&self.normalizer),
            transcription_service: Arc::clone(&self.transcription_service),
            cache: Arc::clone(&self.cache),
            settings: self.settings.clone(),
        }
    }
}
