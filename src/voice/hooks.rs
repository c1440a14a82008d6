use parking_lot::Mutex;
use tracing::debug;

use crate::event::{
    SpeechEndEvent, SpeechErrorEvent, SpeechEvent, SpeechPartialResultsEvent,
    SpeechRecognizedEvent, SpeechResultsEvent, SpeechStartEvent, SpeechVolumeEvent,
};

pub(crate) type Slot<E> = Mutex<Option<Box<dyn Fn(E) + Send>>>;

/// The seven assignable hook slots, one per event kind.
///
/// A slot holds at most one handler; assigning replaces the previous one.
/// An event whose slot is empty is dropped.
#[derive(Default)]
pub(crate) struct Hooks {
    pub(crate) start: Slot<SpeechStartEvent>,
    pub(crate) recognized: Slot<SpeechRecognizedEvent>,
    pub(crate) end: Slot<SpeechEndEvent>,
    pub(crate) error: Slot<SpeechErrorEvent>,
    pub(crate) results: Slot<SpeechResultsEvent>,
    pub(crate) partial_results: Slot<SpeechPartialResultsEvent>,
    pub(crate) volume_changed: Slot<SpeechVolumeEvent>,
}

impl Hooks {
    /// Route one event to its slot, payload passed through unchanged.
    pub(crate) fn dispatch(&self, event: &SpeechEvent) {
        let delivered = match event {
            SpeechEvent::Start(e) => Self::call(&self.start, e),
            SpeechEvent::Recognized(e) => Self::call(&self.recognized, e),
            SpeechEvent::End(e) => Self::call(&self.end, e),
            SpeechEvent::Error(e) => Self::call(&self.error, e),
            SpeechEvent::Results(e) => Self::call(&self.results, e),
            SpeechEvent::PartialResults(e) => Self::call(&self.partial_results, e),
            SpeechEvent::VolumeChanged(e) => Self::call(&self.volume_changed, e),
        };

        if !delivered {
            debug!(event = %event.kind(), "no hook assigned; event dropped");
        }
    }

    /// Unset every slot.
    pub(crate) fn clear(&self) {
        *self.start.lock() = None;
        *self.recognized.lock() = None;
        *self.end.lock() = None;
        *self.error.lock() = None;
        *self.results.lock() = None;
        *self.partial_results.lock() = None;
        *self.volume_changed.lock() = None;
    }

    fn call<E: Clone>(slot: &Slot<E>, payload: &E) -> bool {
        let guard = slot.lock();
        match guard.as_ref() {
            Some(hook) => {
                hook(payload.clone());
                true
            }
            None => false,
        }
    }
}
