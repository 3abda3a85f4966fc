use std::io::Cursor;
use std::sync::Arc;
use std::time::Duration;

use kotoba_config::Config;
use kotoba_core::MemoryStore;
use kotoba_types::{AppEvent, ImportSummary, TextSource};
use tokio::io::{AsyncReadExt, BufReader};
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::controller::AppController;
use crate::io::input_reader;
use crate::output::output_loop;
use crate::state::AppState;

#[tokio::test]
async fn reader_forwards_lines_in_order_and_closes_on_eof() {
    let (tx, rx) = kanal::bounded_async(8);
    let input = Cursor::new("元気\n\nuser: 友達\n:unknown\n".as_bytes().to_vec());

    timeout(
        Duration::from_secs(2),
        input_reader(input, tx, CancellationToken::new()),
    )
    .await
    .expect("reader did not stop at EOF")
    .unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.recv().await {
        events.push(event);
    }

    assert_eq!(events.len(), 3);
    assert!(matches!(
        &events[0],
        AppEvent::TextInput { text, source: TextSource::AgentReply } if text == "元気"
    ));
    assert!(matches!(
        &events[1],
        AppEvent::TextInput { text, source: TextSource::UserInput } if text == "友達"
    ));
    assert!(matches!(events[2], AppEvent::ListUnknown));
}

#[tokio::test]
async fn cancelling_stops_a_reader_waiting_for_input() {
    let (_keep_open, reader) = tokio::io::duplex(64);
    let (tx, rx) = kanal::bounded_async(8);
    let cancel = CancellationToken::new();

    let handle = tokio::spawn(input_reader(BufReader::new(reader), tx, cancel.clone()));
    cancel.cancel();

    timeout(Duration::from_secs(2), handle)
        .await
        .expect("reader ignored cancellation")
        .unwrap()
        .unwrap();
    // The sender went away with the reader
    assert!(rx.recv().await.is_err());
}

#[tokio::test]
async fn output_loop_prints_only_output_events() {
    let (tx, rx) = kanal::bounded_async(8);
    let (writer, mut printed) = tokio::io::duplex(4096);

    tx.send(AppEvent::ListUnknown).await.unwrap();
    tx.send(AppEvent::Notice("No unknown words yet".into()))
        .await
        .unwrap();
    tx.send(AppEvent::ImportFinished(ImportSummary {
        added: 2,
        updated: 0,
        total: 44,
    }))
    .await
    .unwrap();
    drop(tx);

    timeout(Duration::from_secs(2), output_loop(rx, writer))
        .await
        .expect("output loop did not stop")
        .unwrap();

    let mut text = String::new();
    printed.read_to_string(&mut text).await.unwrap();
    assert_eq!(
        text,
        "No unknown words yet\nImported: 2 added, 0 updated, 44 total\n"
    );
}

#[tokio::test]
async fn shutdown_ends_every_chat_task() {
    let state = Arc::new(AppState::with_store(
        Config::default(),
        Arc::new(MemoryStore::new()),
    ));
    let processor = state.open_processor().await;

    // Input stays open, so only cancellation can end the session
    let (_keep_open, input) = tokio::io::duplex(64);
    let (output, _printed) = tokio::io::duplex(4096);

    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks(processor, BufReader::new(input), output);
    controller.shutdown();

    timeout(Duration::from_secs(2), async {
        let mut finished = 0;
        while let Some(joined) = tasks.join_next().await {
            joined.unwrap().unwrap();
            finished += 1;
        }
        assert_eq!(finished, 3);
    })
    .await
    .expect("chat tasks kept running after shutdown");
}
