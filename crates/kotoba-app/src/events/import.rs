use kanal::AsyncSender;
use kotoba_lang_japanese::JapaneseProcessor;
use kotoba_types::AppEvent;

pub async fn handle_import(
    text: String,
    processor: &mut JapaneseProcessor,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let event = match processor.import(&text) {
        Ok(summary) => AppEvent::ImportFinished(summary),
        // The parse error already names the unchanged total
        Err(e) => AppEvent::Notice(e.to_string()),
    };

    app_to_ui_tx.send(event).await?;
    Ok(())
}
