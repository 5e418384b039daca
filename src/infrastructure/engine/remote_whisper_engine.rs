use std::io::Cursor;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{
    AudioSlice, EngineError, EngineOptions, EngineOutput, TranscriptionEngine,
};
use crate::domain::{Segment, TranscriptionTask};

/// Engine adapter for an OpenAI-compatible `/audio/transcriptions`
/// endpoint. Requests `verbose_json` so segment timestamps and the
/// detected language come back alongside the text.
pub struct RemoteWhisperEngine {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl RemoteWhisperEngine {
    pub fn new(api_key: String, base_url: Option<String>, model: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.unwrap_or_else(|| "https://api.openai.com/v1".to_string()),
            model: model.unwrap_or_else(|| "whisper-1".to_string()),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct VerboseTranscription {
    text: String,
    language: Option<String>,
    #[serde(default)]
    segments: Vec<VerboseSegment>,
}

#[derive(Debug, Deserialize)]
struct VerboseSegment {
    start: f64,
    end: f64,
    text: String,
}

#[async_trait]
impl TranscriptionEngine for RemoteWhisperEngine {
    fn is_ready(&self) -> bool {
        !self.api_key.is_empty()
    }

    async fn transcribe(
        &self,
        audio: AudioSlice,
        options: &EngineOptions,
    ) -> Result<EngineOutput, EngineError> {
        let url = format!("{}/audio/transcriptions", self.base_url);
        let wav = encode_wav(&audio)?;

        let file_part = multipart::Part::bytes(wav)
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .map_err(|e| EngineError::ApiRequestFailed(format!("mime: {}", e)))?;

        let mut form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "verbose_json")
            .part("file", file_part);

        // Unset options are omitted so the endpoint's defaults apply.
        if let Some(lang) = &options.language {
            form = form.text("language", lang.clone());
        }
        if options.task == TranscriptionTask::Translate {
            form = form.text("task", options.task.to_string());
        }

        tracing::debug!(
            model = %self.model,
            slice_sec = audio.duration_sec(),
            "Sending audio slice to remote whisper endpoint"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| EngineError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(EngineError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let parsed: VerboseTranscription = response
            .json()
            .await
            .map_err(|e| EngineError::ApiRequestFailed(format!("body: {}", e)))?;

        tracing::info!(
            chars = parsed.text.len(),
            segments = parsed.segments.len(),
            "Remote whisper transcription completed"
        );

        Ok(EngineOutput {
            text: parsed.text,
            segments: parsed
                .segments
                .into_iter()
                .map(|s| Segment::new(s.start, s.end, s.text))
                .collect(),
            detected_language: parsed.language,
        })
    }
}

/// Encode an f32 PCM slice as a 16-bit mono WAV in memory.
fn encode_wav(audio: &AudioSlice) -> Result<Vec<u8>, EngineError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)
            .map_err(|e| EngineError::TranscriptionFailed(format!("wav header: {}", e)))?;
        for &sample in &audio.samples {
            let clamped = (sample.clamp(-1.0, 1.0) * i16::MAX as f32) as i16;
            writer
                .write_sample(clamped)
                .map_err(|e| EngineError::TranscriptionFailed(format!("wav sample: {}", e)))?;
        }
        writer
            .finalize()
            .map_err(|e| EngineError::TranscriptionFailed(format!("wav finalize: {}", e)))?;
    }

    Ok(cursor.into_inner())
}
