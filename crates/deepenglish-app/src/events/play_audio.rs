use std::sync::Arc;

use deepenglish_audio::AudioService;
use deepenglish_types::AppEvent;
use kanal::AsyncSender;
use tokio::task::JoinHandle;

/// Fetch and start audio for `word` off the event loop
pub fn spawn_playback(
    audio: Arc<AudioService>,
    word: String,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let word = word.trim();
        let cached = tokio::fs::try_exists(audio.fetcher().cache_path(word))
            .await
            .unwrap_or(false);

        match audio.play(word).await {
            Ok(path) => {
                tracing::info!("Playing '{}' from {}", word, path.display());
                let notice = if cached {
                    format!("从本地缓存播放: {word}")
                } else {
                    format!("下载并播放: {word}")
                };
                let _ = app_to_ui_tx.send(AppEvent::Notice(notice)).await;
            }
            Err(e) => {
                tracing::error!("Audio for '{}' failed: {}", word, e);
                let _ = app_to_ui_tx
                    .send(AppEvent::Notice(format!("播放音频失败: {e}")))
                    .await;
            }
        }
    })
}
