use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kotoba_lang_japanese::JapaneseProcessor;
use kotoba_types::AppEvent;

use crate::state::AppState;

pub mod import;
pub mod text_input;

use import::handle_import;
use text_input::handle_text_input;

/// App's main loop. Owns the processor, so events are handled one at a time
/// in arrival order. Returns once every input sender is gone.
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    mut processor: JapaneseProcessor,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    while let Ok(event) = ui_to_app_rx.recv().await {
        tracing::debug!(
            "[EVENT_LOOP] Event received: {:?}",
            std::mem::discriminant(&event)
        );
        handle_events(&state, &mut processor, &app_to_ui_tx, event).await?;
    }

    tracing::info!("[EVENT_LOOP] Input closed, stopping");
    Ok(())
}

async fn handle_events(
    state: &AppState,
    processor: &mut JapaneseProcessor,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput { text, source } => {
            tracing::debug!("TextInput from {}: {} chars", source.as_str(), text.len());
            handle_text_input(text, source, processor, app_to_ui_tx).await?;
        }
        AppEvent::ImportText(text) => {
            handle_import(text, processor, app_to_ui_tx).await?;
        }
        AppEvent::ListUnknown => {
            let cap = state.config.read().await.notebook.display_cap;
            let unknown = processor.unknown_words();
            let shown: Vec<&str> = unknown
                .iter()
                .take(cap)
                .map(|unknown| unknown.word.as_str())
                .collect();

            let notice = if unknown.is_empty() {
                "No unknown words yet".to_string()
            } else if shown.len() < unknown.len() {
                format!(
                    "Unknown words ({}): {} ... {} more",
                    unknown.len(),
                    shown.join(", "),
                    unknown.len() - shown.len()
                )
            } else {
                format!("Unknown words ({}): {}", unknown.len(), shown.join(", "))
            };
            app_to_ui_tx.send(AppEvent::Notice(notice)).await?;
        }
        AppEvent::Notice(message) => {
            // Input-side problems, shown in order with everything else
            app_to_ui_tx.send(AppEvent::Notice(message)).await?;
        }
        AppEvent::Recorded(_) | AppEvent::ImportFinished(_) => {
            // Output-only events, nothing to do in the backend
        }
    }

    Ok(())
}
