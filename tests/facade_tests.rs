// Integration tests for the recognition session facade
//
// A fresh facade + mock provider pair is built per case; the mock completes
// native requests synchronously and exposes its event stream so tests can
// emit arbitrary sequences.

use std::sync::Arc;

use parking_lot::Mutex;
use voice_bridge::{
    MockVoiceProvider, NativeError, SpeechEndEvent, SpeechEvent, SpeechPartialResultsEvent,
    SpeechResultsEvent, Voice, VoiceError, VoiceProvider,
};

fn fresh() -> (Arc<MockVoiceProvider>, Voice) {
    let provider = Arc::new(MockVoiceProvider::new());
    let voice = Voice::new(Arc::clone(&provider) as Arc<dyn VoiceProvider>);
    (provider, voice)
}

#[tokio::test]
async fn start_installs_seven_listeners_exactly_once() {
    let (provider, voice) = fresh();
    assert_eq!(provider.events().listener_count(), 0);

    voice.start("en-US").await.unwrap();
    assert_eq!(provider.events().listener_count(), 7);
    assert_eq!(provider.start_calls(), 1);

    // A second start before destroy must not double-install.
    voice.start("de-DE").await.unwrap();
    assert_eq!(provider.events().listener_count(), 7);
    assert_eq!(provider.start_calls(), 2);
}

#[tokio::test]
async fn failed_start_still_installs_listeners() {
    let (provider, voice) = fresh();
    provider.fail_start(Some(NativeError::with_code("5", "Client side error")));

    let err = voice.start("en-US").await.unwrap_err();
    assert_eq!(
        err,
        VoiceError::Native(NativeError::with_code("5", "Client side error"))
    );

    // Subscription happens before the native request is issued.
    assert_eq!(provider.events().listener_count(), 7);
}

#[tokio::test]
async fn requests_resolve_on_success_and_reject_with_native_payload() {
    let (provider, voice) = fresh();

    voice.start("en-US").await.unwrap();
    voice.stop().await.unwrap();
    voice.cancel().await.unwrap();
    assert!(voice.is_available().await.unwrap());

    let boom = NativeError::with_code("8", "RecognitionService busy");
    provider.fail_start(Some(boom.clone()));
    provider.fail_stop(Some(boom.clone()));
    provider.fail_cancel(Some(boom.clone()));
    provider.set_availability_error(Some(boom.clone()));

    assert_eq!(
        voice.start("en-US").await.unwrap_err(),
        VoiceError::Native(boom.clone())
    );
    assert_eq!(voice.stop().await.unwrap_err(), VoiceError::Native(boom.clone()));
    assert_eq!(voice.cancel().await.unwrap_err(), VoiceError::Native(boom.clone()));
    assert_eq!(
        voice.is_available().await.unwrap_err(),
        VoiceError::Native(boom)
    );
}

#[tokio::test]
async fn rejection_carries_arbitrary_error_payloads() {
    let (provider, voice) = fresh();
    provider.fail_stop(Some(NativeError::new("something odd happened")));

    match voice.stop().await.unwrap_err() {
        VoiceError::Native(native) => {
            assert_eq!(native.code, None);
            assert_eq!(native.message, "something odd happened");
        }
        other => panic!("expected native error, got {other:?}"),
    }
}

#[tokio::test]
async fn is_available_reports_false_without_error() {
    let (provider, voice) = fresh();
    provider.set_available(false);
    assert!(!voice.is_available().await.unwrap());
}

#[tokio::test]
async fn is_recognizing_reports_provider_state_and_never_fails() {
    let (provider, voice) = fresh();

    provider.set_recognizing(true);
    assert!(voice.is_recognizing().await);

    provider.set_recognizing(false);
    assert!(!voice.is_recognizing().await);
}

#[tokio::test]
async fn destroy_removes_listeners_and_silences_later_events() {
    let (provider, voice) = fresh();
    let seen = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));

    {
        let seen = Arc::clone(&seen);
        voice.on_speech_results(move |e| seen.lock().push(e.value));
    }

    voice.start("en-US").await.unwrap();
    voice.destroy().await.unwrap();
    assert_eq!(provider.events().listener_count(), 0);

    provider.events().emit(&SpeechEvent::Results(SpeechResultsEvent {
        value: vec!["late".to_string()],
    }));
    assert!(seen.lock().is_empty());

    // Destroy reset the session; a new start subscribes again.
    voice.start("en-US").await.unwrap();
    assert_eq!(provider.events().listener_count(), 7);
}

#[tokio::test]
async fn failed_destroy_leaves_subscriptions_installed() {
    let (provider, voice) = fresh();
    let seen = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));

    {
        let seen = Arc::clone(&seen);
        voice.on_speech_results(move |e| seen.lock().push(e.value));
    }

    voice.start("en-US").await.unwrap();

    let boom = NativeError::with_code("5", "Client side error");
    provider.fail_destroy(Some(boom.clone()));
    assert_eq!(voice.destroy().await.unwrap_err(), VoiceError::Native(boom));

    // State unchanged: still subscribed, events still flow.
    assert_eq!(provider.events().listener_count(), 7);
    provider.events().emit(&SpeechEvent::Results(SpeechResultsEvent {
        value: vec!["still here".to_string()],
    }));
    assert_eq!(seen.lock().as_slice(), &[vec!["still here".to_string()]]);
}

#[tokio::test]
async fn assigned_hook_receives_payload_unchanged() {
    let (provider, voice) = fresh();
    let seen = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));

    {
        let seen = Arc::clone(&seen);
        voice.on_speech_results(move |e| seen.lock().push(e.value));
    }

    voice.start("en-US").await.unwrap();
    provider.events().emit(&SpeechEvent::Results(SpeechResultsEvent {
        value: vec!["hello".to_string(), "hullo".to_string()],
    }));

    assert_eq!(
        seen.lock().as_slice(),
        &[vec!["hello".to_string(), "hullo".to_string()]]
    );
}

#[tokio::test]
async fn unassigned_hooks_drop_events_silently() {
    let (provider, voice) = fresh();
    voice.start("en-US").await.unwrap();

    // No hooks assigned: nothing to observe, nothing panics.
    provider.events().emit(&SpeechEvent::Results(SpeechResultsEvent {
        value: vec!["dropped".to_string()],
    }));
    provider.events().emit(&SpeechEvent::End(SpeechEndEvent::default()));
}

#[tokio::test]
async fn events_before_hook_assignment_are_lost() {
    let (provider, voice) = fresh();
    let seen = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));

    voice.start("en-US").await.unwrap();
    provider.events().emit(&SpeechEvent::Results(SpeechResultsEvent {
        value: vec!["too early".to_string()],
    }));

    {
        let seen = Arc::clone(&seen);
        voice.on_speech_results(move |e| seen.lock().push(e.value));
    }

    // No buffering or replay.
    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn cleared_hooks_stop_receiving() {
    let (provider, voice) = fresh();
    let seen = Arc::new(Mutex::new(Vec::<Vec<String>>::new()));

    {
        let seen = Arc::clone(&seen);
        voice.on_speech_results(move |e| seen.lock().push(e.value));
    }

    voice.start("en-US").await.unwrap();
    voice.clear_hooks();

    provider.events().emit(&SpeechEvent::Results(SpeechResultsEvent {
        value: vec!["unheard".to_string()],
    }));
    assert!(seen.lock().is_empty());
}

#[tokio::test]
async fn session_events_arrive_in_emission_order() {
    let (provider, voice) = fresh();
    let log = Arc::new(Mutex::new(Vec::<String>::new()));

    {
        let log = Arc::clone(&log);
        voice.on_speech_partial_results(move |e| {
            log.lock().push(format!("partial:{}", e.value.join("|")));
        });
    }
    {
        let log = Arc::clone(&log);
        voice.on_speech_results(move |e| {
            log.lock().push(format!("results:{}", e.value.join("|")));
        });
    }
    {
        let log = Arc::clone(&log);
        voice.on_speech_end(move |_| log.lock().push("end".to_string()));
    }

    voice.start("en-US").await.unwrap();

    provider
        .events()
        .emit(&SpeechEvent::PartialResults(SpeechPartialResultsEvent {
            value: vec!["hel".to_string()],
        }));
    provider.events().emit(&SpeechEvent::Results(SpeechResultsEvent {
        value: vec!["hello".to_string()],
    }));
    provider.events().emit(&SpeechEvent::End(SpeechEndEvent::default()));

    voice.stop().await.unwrap();

    assert_eq!(
        log.lock().as_slice(),
        &[
            "partial:hel".to_string(),
            "results:hello".to_string(),
            "end".to_string(),
        ]
    );
    assert_eq!(provider.stop_calls(), 1);
}
