use std::path::Path;

use kanal::AsyncSender;
use kotoba_types::{AppEvent, TextSource};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::sync::CancellationToken;

const USER_PREFIX: &str = "user:";

/// Turn one chat line into an event.
///
/// `user: ...` lines are the learner's own input, `:unknown` asks for the
/// session's unknown words and `:import FILE` bulk-imports a file. Anything
/// else is an agent reply.
pub async fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    if line == ":unknown" {
        return Some(AppEvent::ListUnknown);
    }

    if let Some(path) = line.strip_prefix(":import ") {
        let path = Path::new(path.trim());
        return match tokio::fs::read_to_string(path).await {
            Ok(text) => Some(AppEvent::ImportText(text)),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Some(AppEvent::Notice(format!("Could not read {}", path.display())))
            }
        };
    }

    let (text, source) = match line.strip_prefix(USER_PREFIX) {
        Some(rest) => (rest.trim(), TextSource::UserInput),
        None => (line, TextSource::AgentReply),
    };

    Some(AppEvent::TextInput {
        text: text.to_string(),
        source,
    })
}

/// Read lines until EOF or cancellation, forwarding them to the event loop
pub async fn input_reader<R>(
    input: R,
    ui_to_app_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin + Send,
{
    let mut lines = input.lines();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Input reader cancelled");
                break;
            }
            line = lines.next_line() => line?,
        };

        let Some(line) = line else {
            tracing::debug!("Input reached EOF");
            break;
        };

        if let Some(event) = parse_line(&line).await {
            ui_to_app_tx.send(event).await?;
        }
    }

    Ok(())
}
