use deepenglish_core::ControllerError;
use deepenglish_types::{AppEvent, LookupSource};
use kanal::AsyncSender;

use crate::state::AppState;

/// User-facing text for a failed lookup
pub fn lookup_notice(error: &ControllerError) -> String {
    match error {
        ControllerError::InvalidInput => "请输入一个单词".to_string(),
        ControllerError::MissingApiKey => "请先设置DeepSeek API Key".to_string(),
        ControllerError::LookupFailed(e) if e.is_network() => format!("请求失败: {e}"),
        ControllerError::LookupFailed(e) => format!("解析结果失败: {e}"),
        ControllerError::AtBoundary => "没有更多单词".to_string(),
    }
}

pub async fn handle_lookup(
    state: &AppState,
    word: &str,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    match state.controller.lookup(word).await {
        Ok(lookup) => {
            if lookup.source == LookupSource::Cache {
                app_to_ui_tx
                    .send(AppEvent::Notice(format!(
                        "从本地缓存显示: {}",
                        lookup.record.word
                    )))
                    .await?;
            }

            app_to_ui_tx
                .send(AppEvent::ShowRecord {
                    record: lookup.record,
                    source: Some(lookup.source),
                    can_previous: state.controller.can_go_previous().await,
                    can_next: state.controller.can_go_next().await,
                })
                .await?;
        }
        Err(e) => {
            tracing::warn!("Lookup of '{}' failed: {}", word, e);
            app_to_ui_tx.send(AppEvent::Notice(lookup_notice(&e))).await?;
        }
    }

    Ok(())
}
