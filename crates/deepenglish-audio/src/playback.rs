use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::process::{Child, Command};

use crate::{AudioError, AudioFetcher};

/// Audio output device seam
#[async_trait]
pub trait Playback: Send + Sync {
    /// Start playing `path`. Returns once playback has started, not finished.
    async fn start(&self, path: &Path) -> Result<(), AudioError>;

    /// Stop and release any active playback
    fn release(&self);
}

/// Plays files through an external command such as `mpv` or `afplay`
pub struct CommandPlayback {
    program: String,
    child: Mutex<Option<Child>>,
}

impl CommandPlayback {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: Mutex::new(None),
        }
    }
}

#[async_trait]
impl Playback for CommandPlayback {
    async fn start(&self, path: &Path) -> Result<(), AudioError> {
        let child = Command::new(&self.program)
            .arg(path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| AudioError::Playback(format!("{}: {e}", self.program)))?;

        if let Ok(mut current) = self.child.lock() {
            *current = Some(child);
        }

        Ok(())
    }

    fn release(&self) {
        if let Ok(mut current) = self.child.lock()
            && let Some(mut child) = current.take()
        {
            let _ = child.start_kill();
        }
    }
}

/// Used when no player is configured; only reports where the file is
pub struct NoPlayback;

#[async_trait]
impl Playback for NoPlayback {
    async fn start(&self, path: &Path) -> Result<(), AudioError> {
        tracing::info!("Audio ready at {} (no player configured)", path.display());
        Ok(())
    }

    fn release(&self) {}
}

/// Fetch-then-play for one word at a time
pub struct AudioService {
    fetcher: AudioFetcher,
    playback: Arc<dyn Playback>,
}

impl AudioService {
    pub fn new(fetcher: AudioFetcher, playback: Arc<dyn Playback>) -> Self {
        Self { fetcher, playback }
    }

    pub fn fetcher(&self) -> &AudioFetcher {
        &self.fetcher
    }

    /// Fetch audio for `word` and start playing it, replacing whatever
    /// was playing before.
    pub async fn play(&self, word: &str) -> Result<PathBuf, AudioError> {
        let path = self.fetcher.get_audio(word).await?;

        self.playback.release();
        self.playback.start(&path).await?;

        Ok(path)
    }

    /// Called on teardown
    pub fn release(&self) {
        self.playback.release();
    }
}
