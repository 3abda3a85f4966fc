use kanal::AsyncReceiver;
use kotoba_types::{AppEvent, NotebookEntry};
use tokio::io::{AsyncWrite, AsyncWriteExt};

/// One notebook entry as a tab-separated line
pub fn entry_line(entry: &NotebookEntry) -> String {
    format!("{}\t{}\t{}", entry.word, entry.romaji, entry.meaning)
}

/// Text shown for an output event, if any
pub fn render(event: &AppEvent) -> Option<String> {
    match event {
        AppEvent::Recorded(entries) => Some(
            entries
                .iter()
                .map(|entry| format!("+ {}", entry_line(entry)))
                .collect::<Vec<_>>()
                .join("\n"),
        ),
        AppEvent::ImportFinished(summary) => Some(format!(
            "Imported: {} added, {} updated, {} total",
            summary.added, summary.updated, summary.total
        )),
        AppEvent::Notice(message) => Some(message.clone()),
        _ => None,
    }
}

/// Print events from the event loop until it stops
pub async fn output_loop<W>(app_to_ui_rx: AsyncReceiver<AppEvent>, mut out: W) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin + Send,
{
    while let Ok(event) = app_to_ui_rx.recv().await {
        if let Some(text) = render(&event) {
            out.write_all(text.as_bytes()).await?;
            out.write_all(b"\n").await?;
            out.flush().await?;
        }
    }

    tracing::debug!("Output loop finished");
    Ok(())
}
