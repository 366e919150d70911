mod health;
mod transcribe;
mod transcribe_async;

pub use health::health_handler;
pub use transcribe::{AudioRequestBody, TranscriptionResponse, transcribe_handler};
pub use transcribe_async::{AcceptedResponse, AsyncAudioRequestBody, transcribe_async_handler};
