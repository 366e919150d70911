pub mod audio_decoder;
mod candle_whisper_engine;
mod ffmpeg_tempo_shifter;
mod openai_whisper_engine;
mod transcription_engine_factory;

pub use candle_whisper_engine::CandleWhisperEngine;
pub use ffmpeg_tempo_shifter::FfmpegTempoShifter;
pub use openai_whisper_engine::OpenAiWhisperEngine;
pub use transcription_engine_factory::{TranscriptionEngineFactory, TranscriptionProvider};
