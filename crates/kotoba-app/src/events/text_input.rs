use kanal::AsyncSender;
use kotoba_lang_japanese::{JapaneseProcessor, now_ms};
use kotoba_types::{AppEvent, TextSource};

pub async fn handle_text_input(
    text: String,
    source: TextSource,
    processor: &mut JapaneseProcessor,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let recorded = processor.handle_text(&text, source, now_ms());
    tracing::debug!("Recorded {} new words", recorded.len());

    if !recorded.is_empty() {
        app_to_ui_tx.send(AppEvent::Recorded(recorded)).await?;
    }

    Ok(())
}
