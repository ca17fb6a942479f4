use std::sync::Arc;

use deepenglish_types::AppEvent;
use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::state::AppState;

pub mod lookup;
pub mod navigate;
pub mod play_audio;
pub mod settings;

use lookup::handle_lookup;
use navigate::handle_navigation;
use play_audio::spawn_playback;
use settings::handle_ui_event;

/// App's main loop.
///
/// Events are handled one at a time, so lookups queue in arrival order.
/// Audio runs on its own task; a newer request cancels the one in flight.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut audio_task: Option<JoinHandle<()>> = None;

    if let Some(view) = state.controller.current().await {
        app_to_ui_tx
            .send(AppEvent::ShowRecord {
                record: view.record,
                source: None,
                can_previous: view.can_previous,
                can_next: view.can_next,
            })
            .await?;
    }
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => match event {
                Ok(event) => event,
                Err(_) => break,
            },
        };

        tracing::debug!(
            "[EVENT_LOOP] EVENT RECEIVED: {:?}",
            std::mem::discriminant(&event)
        );

        match event {
            AppEvent::Lookup(word) => {
                handle_lookup(&state, &word, &app_to_ui_tx).await?;
            }
            AppEvent::Navigate(direction) => {
                handle_navigation(&state, direction, &app_to_ui_tx).await?;
            }
            AppEvent::PlayAudio(word) => {
                if let Some(previous) = audio_task.take()
                    && !previous.is_finished()
                {
                    tracing::debug!("Cancelling previous audio request");
                    previous.abort();
                }
                audio_task = Some(spawn_playback(
                    state.audio.clone(),
                    word,
                    app_to_ui_tx.clone(),
                ));
            }
            AppEvent::UiEvent(ui_event) => {
                handle_ui_event(&state, ui_event, &app_to_ui_tx).await?;
            }
            AppEvent::Shutdown => {
                tracing::info!("Shutdown requested by front end");
                break;
            }
            AppEvent::ShowRecord { .. } | AppEvent::Notice(_) | AppEvent::BackendReady => {
                // UI-only events, ignore in backend
            }
        }
    }

    if let Some(task) = audio_task {
        task.abort();
    }

    tracing::info!("[EVENT_LOOP] Stopped");
    Ok(())
}
