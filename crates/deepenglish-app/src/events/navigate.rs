use deepenglish_core::ControllerError;
use deepenglish_types::{AppEvent, Direction};
use kanal::AsyncSender;

use crate::state::AppState;

pub async fn handle_navigation(
    state: &AppState,
    direction: Direction,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match state.controller.navigate(direction).await {
        Ok(record) => {
            app_to_ui_tx
                .send(AppEvent::ShowRecord {
                    record,
                    source: None,
                    can_previous: state.controller.can_go_previous().await,
                    can_next: state.controller.can_go_next().await,
                })
                .await?;
        }
        Err(ControllerError::AtBoundary) => {
            tracing::debug!("Navigation {:?} at boundary, ignoring", direction);
        }
        Err(e) => {
            tracing::warn!("Navigation failed: {}", e);
        }
    }

    Ok(())
}
