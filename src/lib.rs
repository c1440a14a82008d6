pub mod config;
pub mod error;
pub mod event;
pub mod provider;
pub mod voice;

pub use config::Config;
pub use error::{NativeError, VoiceError};
pub use event::{
    EventEmitter, ListenerId, SpeechEndEvent, SpeechErrorEvent, SpeechEvent, SpeechEventKind,
    SpeechPartialResultsEvent, SpeechRecognizedEvent, SpeechResultsEvent, SpeechStartEvent,
    SpeechVolumeEvent,
};
pub use provider::{
    AvailabilityCallback, CompletionCallback, MockScript, MockVoiceProvider, RecognizingCallback,
    VoiceProvider,
};
pub use voice::{global, Voice};
