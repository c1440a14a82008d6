use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::NativeError;

/// The fixed set of events a speech provider can emit.
///
/// The display names match the native event stream (`onSpeechStart`, ...) so
/// logs line up with what the platform side reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeechEventKind {
    Start,
    Recognized,
    End,
    Error,
    Results,
    PartialResults,
    VolumeChanged,
}

impl SpeechEventKind {
    /// Every kind, in the order the facade installs its listeners.
    pub const ALL: [SpeechEventKind; 7] = [
        SpeechEventKind::Start,
        SpeechEventKind::Recognized,
        SpeechEventKind::End,
        SpeechEventKind::Error,
        SpeechEventKind::Results,
        SpeechEventKind::PartialResults,
        SpeechEventKind::VolumeChanged,
    ];

    /// Event name on the native provider surface.
    pub fn as_str(&self) -> &'static str {
        match self {
            SpeechEventKind::Start => "onSpeechStart",
            SpeechEventKind::Recognized => "onSpeechRecognized",
            SpeechEventKind::End => "onSpeechEnd",
            SpeechEventKind::Error => "onSpeechError",
            SpeechEventKind::Results => "onSpeechResults",
            SpeechEventKind::PartialResults => "onSpeechPartialResults",
            SpeechEventKind::VolumeChanged => "onSpeechVolumeChanged",
        }
    }
}

impl fmt::Display for SpeechEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Emitted when the engine is ready and starts listening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechStartEvent {
    /// Always `false`; kept for fidelity with the native payload.
    #[serde(default)]
    pub error: bool,
}

/// Emitted when the engine has heard something it can work with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechRecognizedEvent {
    #[serde(default)]
    pub error: bool,
}

/// Emitted when the engine stops listening.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechEndEvent {
    #[serde(default)]
    pub error: bool,
}

/// Emitted when recognition fails; carries the provider's error payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechErrorEvent {
    pub error: NativeError,
}

/// Final recognition alternatives for the utterance, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechResultsEvent {
    pub value: Vec<String>,
}

/// Interim recognition alternatives while the user is still speaking.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechPartialResultsEvent {
    pub value: Vec<String>,
}

/// Input level update, in rms dB.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeechVolumeEvent {
    pub value: f64,
}

/// One event from the provider's stream, with its typed payload.
#[derive(Debug, Clone, PartialEq)]
pub enum SpeechEvent {
    Start(SpeechStartEvent),
    Recognized(SpeechRecognizedEvent),
    End(SpeechEndEvent),
    Error(SpeechErrorEvent),
    Results(SpeechResultsEvent),
    PartialResults(SpeechPartialResultsEvent),
    VolumeChanged(SpeechVolumeEvent),
}

impl SpeechEvent {
    pub fn kind(&self) -> SpeechEventKind {
        match self {
            SpeechEvent::Start(_) => SpeechEventKind::Start,
            SpeechEvent::Recognized(_) => SpeechEventKind::Recognized,
            SpeechEvent::End(_) => SpeechEventKind::End,
            SpeechEvent::Error(_) => SpeechEventKind::Error,
            SpeechEvent::Results(_) => SpeechEventKind::Results,
            SpeechEvent::PartialResults(_) => SpeechEventKind::PartialResults,
            SpeechEvent::VolumeChanged(_) => SpeechEventKind::VolumeChanged,
        }
    }
}
