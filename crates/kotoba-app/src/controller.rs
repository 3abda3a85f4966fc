use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use kotoba_lang_japanese::JapaneseProcessor;
use kotoba_types::AppEvent;
use tokio::io::{AsyncBufRead, AsyncWrite};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::events::event_loop;
use crate::io::input_reader;
use crate::output::output_loop;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(256), // recorded words and notices
            ui_to_app: kanal::bounded_async(64),  // chat lines
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    /// Spawn reader, event loop and output tasks.
    ///
    /// Each channel end moves into exactly one task, so EOF on `input` drains
    /// the event loop and then the output task in turn.
    pub fn spawn_tasks<R, W>(
        &self,
        processor: JapaneseProcessor,
        input: R,
        output: W,
    ) -> JoinSet<anyhow::Result<()>>
    where
        R: AsyncBufRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let ChannelSet {
            app_to_ui,
            ui_to_app,
        } = ChannelSet::new();
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            ui_to_app.1,
            app_to_ui.0,
            processor,
        ));

        // Output
        tasks.spawn(output_loop(app_to_ui.1, output));

        // Input
        tasks.spawn(input_reader(
            input,
            ui_to_app.0,
            self.cancel_token.child_token(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
