mod audio_fetcher;
mod result_notifier;
mod tempo_shifter;
mod transcription_engine;

pub use audio_fetcher::{AudioFetcher, FetchError};
pub use result_notifier::{JobOutcome, NotifyError, ResultNotifier};
pub use tempo_shifter::{TempoShifter, TempoShiftError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
