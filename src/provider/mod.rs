//! The native provider boundary.
//!
//! A [`VoiceProvider`] is the platform-supplied surface that performs actual
//! audio capture and speech-to-text recognition. The facade only issues
//! one-shot requests against it and subscribes to its event stream; it never
//! drives recognition itself.

pub mod mock;

pub use mock::{MockScript, MockVoiceProvider};

use crate::error::NativeError;
use crate::event::EventEmitter;

/// Completion callback for one-shot native requests. `None` means the
/// request was accepted.
pub type CompletionCallback = Box<dyn FnOnce(Option<NativeError>) + Send>;

/// Callback for the capability query.
pub type AvailabilityCallback = Box<dyn FnOnce(bool, Option<NativeError>) + Send>;

/// Callback for the active-state query. The native surface reports only the
/// flag, with no error channel.
pub type RecognizingCallback = Box<dyn FnOnce(bool) + Send>;

/// Native speech-recognition surface consumed by the facade.
///
/// All methods are non-blocking: completion arrives on the supplied
/// callback, possibly from a provider-owned thread. Events (partial and
/// final results, lifecycle, volume) flow through [`events`], not through
/// these callbacks.
///
/// [`events`]: VoiceProvider::events
pub trait VoiceProvider: Send + Sync {
    /// Ask the engine to start recognizing speech for `locale`. An empty
    /// locale selects the provider's default.
    fn start_speech(&self, locale: &str, done: CompletionCallback);

    /// Ask the engine to stop listening and finalize in-flight results.
    fn stop_speech(&self, done: CompletionCallback);

    /// Ask the engine to stop listening and discard in-flight results.
    fn cancel_speech(&self, done: CompletionCallback);

    /// Tear down the engine.
    fn destroy_speech(&self, done: CompletionCallback);

    /// Whether speech recognition is available on this host.
    fn is_speech_available(&self, done: AvailabilityCallback);

    /// Whether the engine is currently recognizing.
    fn is_recognizing(&self, done: RecognizingCallback);

    /// The provider's event stream; the facade installs its listeners here.
    fn events(&self) -> &EventEmitter;
}
