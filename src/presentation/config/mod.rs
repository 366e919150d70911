mod settings;

pub use settings::{
    PipelineSettings, ServerSettings, Settings, SettingsError, StagingSettings,
    TranscriptionProviderSetting, TranscriptionSettings,
};
