use std::path::PathBuf;

use crate::infrastructure::audio::TranscriptionProvider;

/// Environment-driven service configuration. Every knob has a default that
/// works on a development machine with ffmpeg on PATH.
#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub staging: StagingSettings,
    pub pipeline: PipelineSettings,
    pub transcription: TranscriptionSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct StagingSettings {
    pub dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    /// Multiplicative playback-speed adjustment applied before recognition.
    /// 0.8 slows to 80% of the original tempo without shifting pitch.
    pub tempo_factor: f64,
}

#[derive(Debug, Clone)]
pub struct TranscriptionSettings {
    pub provider: TranscriptionProviderSetting,
    pub model: String,
    pub api_key: Option<String>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionProviderSetting {
    Local,
    OpenAi,
}

impl TranscriptionProviderSetting {
    pub fn as_provider(&self) -> TranscriptionProvider {
        match self {
            Self::Local => TranscriptionProvider::Local,
            Self::OpenAi => TranscriptionProvider::OpenAi,
        }
    }

    fn default_model(&self) -> &'static str {
        match self {
            Self::Local => "openai/whisper-base",
            Self::OpenAi => "whisper-1",
        }
    }
}

impl TryFrom<String> for TranscriptionProviderSetting {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        match s.to_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!(
                "Invalid transcription provider: {}. Expected: local or openai",
                other
            )),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid value for {name}: {message}")]
    Invalid { name: &'static str, message: String },
}

impl Settings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let port = parse_var("SERVER_PORT", 3000u16)?;
        let host = std::env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let staging_dir = std::env::var("STAGING_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| std::env::temp_dir());

        let tempo_factor = parse_var("TEMPO_FACTOR", 0.8f64)?;
        if tempo_factor <= 0.0 {
            return Err(SettingsError::Invalid {
                name: "TEMPO_FACTOR",
                message: format!("must be positive, got {}", tempo_factor),
            });
        }

        let provider = match std::env::var("TRANSCRIPTION_PROVIDER") {
            Ok(value) => {
                TranscriptionProviderSetting::try_from(value).map_err(|message| {
                    SettingsError::Invalid {
                        name: "TRANSCRIPTION_PROVIDER",
                        message,
                    }
                })?
            }
            Err(_) => TranscriptionProviderSetting::Local,
        };

        let model = std::env::var("WHISPER_MODEL")
            .unwrap_or_else(|_| provider.default_model().to_string());

        Ok(Self {
            server: ServerSettings { host, port },
            staging: StagingSettings { dir: staging_dir },
            pipeline: PipelineSettings { tempo_factor },
            transcription: TranscriptionSettings {
                provider,
                model,
                api_key: std::env::var("OPENAI_API_KEY").ok(),
                base_url: std::env::var("OPENAI_BASE_URL").ok(),
            },
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match std::env::var(name) {
        Ok(value) => value.parse().map_err(|e: T::Err| SettingsError::Invalid {
            name,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
