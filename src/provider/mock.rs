//! In-process mock engine for tests and demos.
//!
//! Requests complete synchronously. When built with a [`MockScript`], a
//! `start_speech` call plays a plausible recognition session back on a
//! worker thread: start, per-word volume and partial results, then final
//! results and end. Tests built without a script drive the event stream
//! directly through [`VoiceProvider::events`].

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;
use tracing::{debug, info};

use super::{AvailabilityCallback, CompletionCallback, RecognizingCallback, VoiceProvider};
use crate::error::NativeError;
use crate::event::{
    EventEmitter, SpeechEndEvent, SpeechEvent, SpeechPartialResultsEvent, SpeechRecognizedEvent,
    SpeechResultsEvent, SpeechStartEvent, SpeechVolumeEvent,
};

/// Word-by-word session played back by the mock engine after `start_speech`.
#[derive(Debug, Clone)]
pub struct MockScript {
    /// Words "heard", in order; partial results accumulate them.
    pub words: Vec<String>,
    /// Pause between words.
    pub word_delay: Duration,
}

impl MockScript {
    pub fn from_phrase(phrase: &str, word_delay: Duration) -> Self {
        Self {
            words: phrase.split_whitespace().map(str::to_string).collect(),
            word_delay,
        }
    }
}

/// Injectable failures, one slot per native request. A set fault applies to
/// every call until cleared.
#[derive(Default)]
struct Faults {
    start: Option<NativeError>,
    stop: Option<NativeError>,
    cancel: Option<NativeError>,
    destroy: Option<NativeError>,
    availability: Option<NativeError>,
}

/// Flags shared with a running script thread.
struct ScriptRun {
    /// Finalize the transcript early.
    stop: AtomicBool,
    /// Discard the transcript; no results are delivered.
    cancel: AtomicBool,
}

struct MockState {
    available: bool,
    recognizing: bool,
    faults: Faults,
    run: Option<Arc<ScriptRun>>,
}

pub struct MockVoiceProvider {
    events: Arc<EventEmitter>,
    state: Arc<Mutex<MockState>>,
    script: Option<MockScript>,
    start_calls: AtomicUsize,
    stop_calls: AtomicUsize,
    cancel_calls: AtomicUsize,
    destroy_calls: AtomicUsize,
}

impl MockVoiceProvider {
    pub fn new() -> Self {
        Self {
            events: Arc::new(EventEmitter::new()),
            state: Arc::new(Mutex::new(MockState {
                available: true,
                recognizing: false,
                faults: Faults::default(),
                run: None,
            })),
            script: None,
            start_calls: AtomicUsize::new(0),
            stop_calls: AtomicUsize::new(0),
            cancel_calls: AtomicUsize::new(0),
            destroy_calls: AtomicUsize::new(0),
        }
    }

    /// Mock engine that plays `script` back after every accepted start.
    pub fn with_script(script: MockScript) -> Self {
        let mut provider = Self::new();
        provider.script = Some(script);
        provider
    }

    pub fn set_available(&self, available: bool) {
        self.state.lock().available = available;
    }

    /// Make the availability query report an error instead of a boolean.
    pub fn set_availability_error(&self, error: Option<NativeError>) {
        self.state.lock().faults.availability = error;
    }

    pub fn set_recognizing(&self, recognizing: bool) {
        self.state.lock().recognizing = recognizing;
    }

    pub fn fail_start(&self, error: Option<NativeError>) {
        self.state.lock().faults.start = error;
    }

    pub fn fail_stop(&self, error: Option<NativeError>) {
        self.state.lock().faults.stop = error;
    }

    pub fn fail_cancel(&self, error: Option<NativeError>) {
        self.state.lock().faults.cancel = error;
    }

    pub fn fail_destroy(&self, error: Option<NativeError>) {
        self.state.lock().faults.destroy = error;
    }

    /// Number of `start_speech` requests received.
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    pub fn stop_calls(&self) -> usize {
        self.stop_calls.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.cancel_calls.load(Ordering::SeqCst)
    }

    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.load(Ordering::SeqCst)
    }

    fn spawn_script(&self, locale: String, run: Arc<ScriptRun>, script: MockScript) {
        let events = Arc::clone(&self.events);
        let state = Arc::clone(&self.state);

        thread::spawn(move || {
            info!(%locale, words = script.words.len(), "mock recognition session started");

            events.emit(&SpeechEvent::Start(SpeechStartEvent::default()));

            let mut transcript = String::new();
            let mut cancelled = false;

            for (index, word) in script.words.iter().enumerate() {
                thread::sleep(script.word_delay);

                if run.cancel.load(Ordering::SeqCst) {
                    cancelled = true;
                    break;
                }
                if run.stop.load(Ordering::SeqCst) {
                    break;
                }

                if !transcript.is_empty() {
                    transcript.push(' ');
                }
                transcript.push_str(word);

                // Pseudo input level derived from the word itself.
                let level = (word.len() as f64).min(10.0);
                events.emit(&SpeechEvent::VolumeChanged(SpeechVolumeEvent { value: level }));

                if index == 0 {
                    events.emit(&SpeechEvent::Recognized(SpeechRecognizedEvent::default()));
                }

                events.emit(&SpeechEvent::PartialResults(SpeechPartialResultsEvent {
                    value: vec![transcript.clone()],
                }));
            }

            if !cancelled {
                let value = if transcript.is_empty() {
                    Vec::new()
                } else {
                    vec![transcript]
                };
                events.emit(&SpeechEvent::Results(SpeechResultsEvent { value }));
                events.emit(&SpeechEvent::End(SpeechEndEvent::default()));
            }

            let mut state = state.lock();
            let same_run = state
                .run
                .as_ref()
                .map_or(false, |current| Arc::ptr_eq(current, &run));
            if same_run {
                state.run = None;
                state.recognizing = false;
            }

            debug!(cancelled, "mock recognition session finished");
        });
    }

    /// Signal the active script run, if any, through `flag`.
    fn signal_run(state: &mut MockState, flag: impl Fn(&ScriptRun)) {
        if let Some(run) = &state.run {
            flag(run);
        }
    }
}

impl Default for MockVoiceProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceProvider for MockVoiceProvider {
    fn start_speech(&self, locale: &str, done: CompletionCallback) {
        self.start_calls.fetch_add(1, Ordering::SeqCst);

        let run = {
            let mut state = self.state.lock();
            if let Some(error) = state.faults.start.clone() {
                drop(state);
                done(Some(error));
                return;
            }

            state.recognizing = true;
            if self.script.is_some() {
                let run = Arc::new(ScriptRun {
                    stop: AtomicBool::new(false),
                    cancel: AtomicBool::new(false),
                });
                state.run = Some(Arc::clone(&run));
                Some(run)
            } else {
                None
            }
        };

        done(None);

        if let (Some(run), Some(script)) = (run, self.script.clone()) {
            self.spawn_script(locale.to_string(), run, script);
        }
    }

    fn stop_speech(&self, done: CompletionCallback) {
        self.stop_calls.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock();
        if let Some(error) = state.faults.stop.clone() {
            drop(state);
            done(Some(error));
            return;
        }

        Self::signal_run(&mut state, |run| run.stop.store(true, Ordering::SeqCst));
        state.recognizing = false;
        drop(state);
        done(None);
    }

    fn cancel_speech(&self, done: CompletionCallback) {
        self.cancel_calls.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock();
        if let Some(error) = state.faults.cancel.clone() {
            drop(state);
            done(Some(error));
            return;
        }

        Self::signal_run(&mut state, |run| run.cancel.store(true, Ordering::SeqCst));
        state.recognizing = false;
        drop(state);
        done(None);
    }

    fn destroy_speech(&self, done: CompletionCallback) {
        self.destroy_calls.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock();
        if let Some(error) = state.faults.destroy.clone() {
            drop(state);
            done(Some(error));
            return;
        }

        Self::signal_run(&mut state, |run| run.cancel.store(true, Ordering::SeqCst));
        state.run = None;
        state.recognizing = false;
        drop(state);
        done(None);
    }

    fn is_speech_available(&self, done: AvailabilityCallback) {
        let state = self.state.lock();
        if let Some(error) = state.faults.availability.clone() {
            drop(state);
            done(false, Some(error));
            return;
        }

        let available = state.available;
        drop(state);
        done(available, None);
    }

    fn is_recognizing(&self, done: RecognizingCallback) {
        let recognizing = self.state.lock().recognizing;
        done(recognizing);
    }

    fn events(&self) -> &EventEmitter {
        &self.events
    }
}
