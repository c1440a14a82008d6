use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use tracing::{debug, info, warn};
use voice_bridge::{Config, MockScript, MockVoiceProvider, Voice};

/// Run a scripted recognition session through the speech facade.
#[derive(Debug, Parser)]
#[command(name = "voice-bridge")]
struct Args {
    /// Config file, without extension (TOML)
    #[arg(long, default_value = "config/voice-bridge")]
    config: String,

    /// Override the configured locale
    #[arg(long)]
    locale: Option<String>,

    /// Phrase the mock engine "hears"
    #[arg(
        long,
        default_value = "the quick brown fox jumps over the lazy dog"
    )]
    phrase: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let cfg = Config::load(&args.config)?;
    let locale = args.locale.unwrap_or(cfg.speech.locale);

    let word_delay = Duration::from_millis(cfg.mock.word_delay_ms);
    let script = MockScript::from_phrase(&args.phrase, word_delay);
    let word_count = script.words.len() as u32;

    let provider = Arc::new(MockVoiceProvider::with_script(script));
    provider.set_available(cfg.mock.available);

    let voice = Voice::new(provider);

    if !voice.is_available().await? {
        anyhow::bail!("speech recognition is not available on this host");
    }

    let transcript = Arc::new(Mutex::new(Vec::<String>::new()));

    voice.on_speech_start(|_| info!("engine listening"));
    voice.on_speech_recognized(|_| debug!("speech detected"));
    voice.on_speech_volume_changed(|e| debug!(db = e.value, "input level"));
    voice.on_speech_partial_results(|e| info!(partial = ?e.value, "interim results"));
    {
        let transcript = Arc::clone(&transcript);
        voice.on_speech_results(move |e| {
            info!(results = ?e.value, "final results");
            transcript.lock().extend(e.value);
        });
    }
    voice.on_speech_error(|e| warn!(error = %e.error, "recognition error"));
    voice.on_speech_end(|_| info!("engine stopped listening"));

    voice.start(&locale).await?;
    let recognizing = voice.is_recognizing().await;
    info!(%locale, recognizing, "recognition started");

    // Let the scripted session run to completion, then stop and tear down.
    tokio::time::sleep(word_delay * (word_count + 2)).await;
    voice.stop().await?;
    tokio::time::sleep(Duration::from_millis(200)).await;
    voice.destroy().await?;

    let transcript = transcript.lock().clone();
    println!("{}", serde_json::to_string_pretty(&transcript)?);

    Ok(())
}
