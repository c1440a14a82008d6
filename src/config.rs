use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub speech: SpeechConfig,
    pub mock: MockProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct SpeechConfig {
    /// Locale handed to the provider on start; empty selects its default.
    pub locale: String,
}

/// Settings for the demo binary's in-process mock engine.
#[derive(Debug, Deserialize)]
pub struct MockProviderConfig {
    pub available: bool,
    pub word_delay_ms: u64,
}

impl Config {
    /// Load from a config file, falling back to defaults for anything the
    /// file (or a missing file) does not set.
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .set_default("speech.locale", "en-US")?
            .set_default("mock.available", true)?
            .set_default("mock.word_delay_ms", 250)?
            .add_source(config::File::with_name(path).required(false))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
