//! Speech event stream: the fixed event set, typed payloads, and the
//! listener registry providers emit through.

pub mod emitter;
pub mod types;

pub use emitter::{EventEmitter, ListenerId};
pub use types::{
    SpeechEndEvent, SpeechErrorEvent, SpeechEvent, SpeechEventKind, SpeechPartialResultsEvent,
    SpeechRecognizedEvent, SpeechResultsEvent, SpeechStartEvent, SpeechVolumeEvent,
};
