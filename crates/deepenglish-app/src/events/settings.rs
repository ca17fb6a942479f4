use deepenglish_types::{AppEvent, UiEvent};
use kanal::AsyncSender;

use crate::state::AppState;

fn mask(key: &str) -> String {
    match key.chars().count() {
        0 => "(not set)".to_string(),
        n if n <= 8 => "*".repeat(n),
        n => {
            let tail: String = key.chars().skip(n - 4).collect();
            format!("****{tail}")
        }
    }
}

pub async fn handle_ui_event(
    state: &AppState,
    event: UiEvent,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let mut settings = state.controller.settings().await;
    let key_entered = matches!(event, UiEvent::SetApiKey(_));

    match event {
        UiEvent::ShowSettings => {
            let summary = format!(
                "API key: {}\nSystem prompt: {}\nPrompt template: {}",
                mask(&settings.api_key),
                settings.system_prompt,
                settings.prompt_template.trim()
            );
            app_to_ui_tx.send(AppEvent::Notice(summary)).await?;
            return Ok(());
        }
        UiEvent::SetApiKey(key) => settings.api_key = key.trim().to_string(),
        UiEvent::SetSystemPrompt(prompt) => settings.system_prompt = prompt.trim().to_string(),
        UiEvent::SetPromptTemplate(template) => settings.prompt_template = template,
    }

    if let Err(e) = settings.validate() {
        app_to_ui_tx.send(AppEvent::Notice(e.to_string())).await?;
        return Ok(());
    }

    state.controller.update_settings(settings.clone()).await;

    let notice = match state.save_settings(&settings, key_entered) {
        Ok(()) => "设置已保存".to_string(),
        Err(e) => {
            tracing::error!("Failed to save settings: {}", e);
            format!("保存设置失败: {e}")
        }
    };
    app_to_ui_tx.send(AppEvent::Notice(notice)).await?;

    Ok(())
}
