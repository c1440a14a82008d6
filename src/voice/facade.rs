use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::debug;

use super::hooks::Hooks;
use crate::error::{NativeError, VoiceError};
use crate::event::{
    ListenerId, SpeechEndEvent, SpeechErrorEvent, SpeechEventKind, SpeechPartialResultsEvent,
    SpeechRecognizedEvent, SpeechResultsEvent, SpeechStartEvent, SpeechVolumeEvent,
};
use crate::provider::VoiceProvider;

/// Facade over a native speech-recognition provider.
///
/// Imperative calls (`start`, `stop`, `cancel`, availability and state
/// queries, `destroy`) become one-shot requests against the provider, with
/// the provider's callback completion normalized into `async` results.
/// Recognition progress arrives through the seven assignable hooks, never
/// through the request futures.
///
/// Applications typically hold one shared handle for the process (see
/// [`global`](crate::voice::global)); tests construct a fresh facade per
/// case.
pub struct Voice {
    provider: Arc<dyn VoiceProvider>,
    hooks: Arc<Hooks>,
    /// `Some` while the seven listeners are installed on the provider.
    listeners: Mutex<Option<Vec<ListenerId>>>,
}

impl Voice {
    pub fn new(provider: Arc<dyn VoiceProvider>) -> Self {
        Self {
            provider,
            hooks: Arc::new(Hooks::default()),
            listeners: Mutex::new(None),
        }
    }

    /// Start recognizing speech for `locale` (passed to the provider
    /// verbatim; empty selects the provider's default).
    ///
    /// Installs the event listeners first, exactly once per session: a
    /// second `start` before `destroy` leaves the existing subscriptions in
    /// place. Resolves when the provider accepts the request; recognition
    /// results arrive only via the hooks.
    pub async fn start(&self, locale: &str) -> Result<(), VoiceError> {
        self.install_listeners();

        let (tx, rx) = oneshot::channel();
        self.provider.start_speech(
            locale,
            Box::new(move |error| {
                let _ = tx.send(error);
            }),
        );
        completion(rx).await
    }

    /// Stop listening and let the engine finalize in-flight results.
    ///
    /// Subscriptions stay installed: the engine may still deliver a final
    /// results/end event after the stop is acknowledged.
    pub async fn stop(&self) -> Result<(), VoiceError> {
        let (tx, rx) = oneshot::channel();
        self.provider.stop_speech(Box::new(move |error| {
            let _ = tx.send(error);
        }));
        completion(rx).await
    }

    /// Stop listening and discard in-flight results.
    pub async fn cancel(&self) -> Result<(), VoiceError> {
        let (tx, rx) = oneshot::channel();
        self.provider.cancel_speech(Box::new(move |error| {
            let _ = tx.send(error);
        }));
        completion(rx).await
    }

    /// Whether speech recognition is available on this host.
    pub async fn is_available(&self) -> Result<bool, VoiceError> {
        let (tx, rx) = oneshot::channel();
        self.provider.is_speech_available(Box::new(move |available, error| {
            let _ = tx.send((available, error));
        }));

        match rx.await {
            Ok((_, Some(error))) => Err(VoiceError::Native(error)),
            Ok((available, None)) => Ok(available),
            Err(_) => Err(VoiceError::ProviderGone),
        }
    }

    /// Whether the engine is currently recognizing.
    ///
    /// Never fails: the native callback carries only the flag. A vanished
    /// provider reports as not recognizing.
    pub async fn is_recognizing(&self) -> bool {
        let (tx, rx) = oneshot::channel();
        self.provider.is_recognizing(Box::new(move |recognizing| {
            let _ = tx.send(recognizing);
        }));
        rx.await.unwrap_or(false)
    }

    /// Tear down the engine. On success the event subscriptions are removed
    /// and a later `start` installs fresh ones; on failure they are left
    /// untouched.
    pub async fn destroy(&self) -> Result<(), VoiceError> {
        let (tx, rx) = oneshot::channel();
        self.provider.destroy_speech(Box::new(move |error| {
            let _ = tx.send(error);
        }));
        completion(rx).await?;

        self.remove_listeners();
        Ok(())
    }

    /// Assign the handler for engine-started-listening events.
    pub fn on_speech_start(&self, hook: impl Fn(SpeechStartEvent) + Send + 'static) {
        *self.hooks.start.lock() = Some(Box::new(hook));
    }

    /// Assign the handler for speech-detected events.
    pub fn on_speech_recognized(&self, hook: impl Fn(SpeechRecognizedEvent) + Send + 'static) {
        *self.hooks.recognized.lock() = Some(Box::new(hook));
    }

    /// Assign the handler for engine-stopped-listening events.
    pub fn on_speech_end(&self, hook: impl Fn(SpeechEndEvent) + Send + 'static) {
        *self.hooks.end.lock() = Some(Box::new(hook));
    }

    /// Assign the handler for recognition errors.
    pub fn on_speech_error(&self, hook: impl Fn(SpeechErrorEvent) + Send + 'static) {
        *self.hooks.error.lock() = Some(Box::new(hook));
    }

    /// Assign the handler for final recognition results.
    pub fn on_speech_results(&self, hook: impl Fn(SpeechResultsEvent) + Send + 'static) {
        *self.hooks.results.lock() = Some(Box::new(hook));
    }

    /// Assign the handler for interim recognition results.
    pub fn on_speech_partial_results(
        &self,
        hook: impl Fn(SpeechPartialResultsEvent) + Send + 'static,
    ) {
        *self.hooks.partial_results.lock() = Some(Box::new(hook));
    }

    /// Assign the handler for input-level updates.
    pub fn on_speech_volume_changed(&self, hook: impl Fn(SpeechVolumeEvent) + Send + 'static) {
        *self.hooks.volume_changed.lock() = Some(Box::new(hook));
    }

    /// Unset all seven hooks. Subscriptions are unaffected; subsequent
    /// events are dropped until hooks are assigned again.
    pub fn clear_hooks(&self) {
        self.hooks.clear();
    }

    fn install_listeners(&self) {
        let mut listeners = self.listeners.lock();
        if listeners.is_some() {
            return;
        }

        let ids = SpeechEventKind::ALL
            .iter()
            .map(|&kind| {
                let hooks = Arc::clone(&self.hooks);
                self.provider
                    .events()
                    .add_listener(kind, move |event| hooks.dispatch(event))
            })
            .collect();

        debug!("speech event listeners installed");
        *listeners = Some(ids);
    }

    fn remove_listeners(&self) {
        let mut listeners = self.listeners.lock();
        if let Some(ids) = listeners.take() {
            for id in ids {
                self.provider.events().remove_listener(id);
            }
            debug!("speech event listeners removed");
        }
    }
}

/// Resolve a one-shot native request from its completion callback.
async fn completion(rx: oneshot::Receiver<Option<NativeError>>) -> Result<(), VoiceError> {
    match rx.await {
        Ok(None) => Ok(()),
        Ok(Some(error)) => Err(VoiceError::Native(error)),
        Err(_) => Err(VoiceError::ProviderGone),
    }
}
