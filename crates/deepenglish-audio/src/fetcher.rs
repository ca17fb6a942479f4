use std::path::{Path, PathBuf};
use std::time::Duration;

use deepenglish_config::audio::AudioConfig;
use futures_util::StreamExt;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::AudioError;

/// Cache file name for `word`: every character outside `[A-Za-z0-9]`
/// becomes `_`.
pub fn cache_file_name(word: &str, extension: &str) -> String {
    let stem: String = word
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.{extension}")
}

/// Downloads pronunciation audio into an on-disk cache
#[derive(Clone)]
pub struct AudioFetcher {
    client: reqwest::Client,
    host: String,
    voice_type: u8,
    extension: String,
    cache_dir: PathBuf,
}

impl AudioFetcher {
    pub fn new(config: &AudioConfig, timeout: Duration) -> Result<Self, AudioError> {
        let client = reqwest::Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            host: config.host.trim_end_matches('/').to_string(),
            voice_type: config.voice_type,
            extension: config.extension.clone(),
            cache_dir: config.cache_dir.clone(),
        })
    }

    pub fn cache_path(&self, word: &str) -> PathBuf {
        self.cache_dir.join(cache_file_name(word, &self.extension))
    }

    pub fn audio_url(&self, word: &str) -> String {
        format!(
            "{}/dictvoice?audio={}&type={}",
            self.host,
            urlencoding::encode(word),
            self.voice_type
        )
    }

    /// Local path of a playable file for `word`, downloading it on a miss.
    ///
    /// Downloads land in a `.part` file that is renamed into place only once
    /// complete, so an interrupted download never looks like a cache hit.
    pub async fn get_audio(&self, word: &str) -> Result<PathBuf, AudioError> {
        let word = word.trim();
        if word.is_empty() {
            return Err(AudioError::InvalidInput);
        }

        let path = self.cache_path(word);
        if fs::try_exists(&path).await.unwrap_or(false) {
            tracing::debug!("Audio cache hit for '{}': {}", word, path.display());
            return Ok(path);
        }

        fs::create_dir_all(&self.cache_dir).await?;
        let partial = path.with_extension(format!("{}.part", self.extension));

        let result = match self.download(word, &partial).await {
            Ok(bytes) => fs::rename(&partial, &path)
                .await
                .map(|_| bytes)
                .map_err(AudioError::from),
            Err(e) => Err(e),
        };

        match result {
            Ok(bytes) => {
                tracing::info!("Downloaded audio for '{}' ({} bytes)", word, bytes);
                Ok(path)
            }
            Err(e) => {
                let _ = fs::remove_file(&partial).await;
                tracing::warn!("Audio download for '{}' failed: {}", word, e);
                Err(e)
            }
        }
    }

    async fn download(&self, word: &str, target: &Path) -> Result<u64, AudioError> {
        let url = self.audio_url(word);
        tracing::debug!("Fetching audio from {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AudioError::HttpStatus(response.status()));
        }

        let mut file = File::create(target).await?;
        let mut stream = response.bytes_stream();
        let mut written: u64 = 0;

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }

        file.flush().await?;
        file.sync_all().await?;

        Ok(written)
    }
}
