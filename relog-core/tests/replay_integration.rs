//! Integration tests driving the public API end to end

use std::sync::Arc;

use relog_core::prelude::*;

fn record(severity: Severity, event_id: u32, message: &str) -> LogRecord {
    LogRecord::new("svc.payments", severity, event_id, message)
}

#[test]
fn failed_request_replays_its_whole_context() {
    let sink = Arc::new(MemorySink::new());
    let pipeline = LoggingPipeline::new(&ReplayConfig::default(), sink.clone());

    let request = OperationContext::start("handle-request");
    request.set_baggage("tenant", "acme");

    let auth = request.start_child("authorize");
    assert_eq!(auth.baggage("tenant").as_deref(), Some("acme"));

    pipeline.log(Some(&request), record(Severity::Debug, 10, "headers parsed"));
    pipeline.log(Some(&auth), record(Severity::Trace, 20, "token lookup"));
    pipeline.log(
        Some(&auth),
        record(Severity::Error, 21, "token expired").with_exception("ExpiredToken"),
    );

    pipeline.complete(&auth, "SystemError");
    pipeline.complete(&request, "Success");

    let records = sink.records();
    let messages: Vec<&str> = records.iter().map(|r| r.message.as_str()).collect();
    assert_eq!(
        messages,
        vec![
            // Live stream: only the error cleared the default Info filter
            "token expired",
            // Replay: the parent's context first, then the failing child's
            "[Replay] headers parsed",
            "[Replay] token lookup",
        ]
    );

    // Replayed records keep their provenance
    let replayed = &records[2];
    assert_eq!(replayed.severity, Severity::Info);
    assert_eq!(replayed.category, "svc.payments");
    assert_eq!(replayed.event_id, 20);

    // The successful parent did not replay its own buffer again
    assert_eq!(records.len(), 3);
}

#[test]
fn custom_outcome_vocabulary_via_config_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("relog.toml");
    std::fs::write(
        &path,
        "result_tag = \"outcome\"\nfailure_outcome = \"fault\"\nmax_records_per_operation = 8\n",
    )
    .unwrap();

    let config = ReplayConfig::from_file(&path).unwrap();
    let sink = Arc::new(MemorySink::new());
    let pipeline = LoggingPipeline::new(&config, sink.clone());

    let op = OperationContext::start("op");
    pipeline.log(Some(&op), record(Severity::Debug, 1, "buffered"));
    pipeline.complete(&op, "fault");

    assert_eq!(op.tag("outcome").as_deref(), Some("fault"));
    assert_eq!(sink.records()[0].message, "[Replay] buffered");
}

#[test]
fn tracing_sink_serves_as_the_live_destination() {
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing_subscriber::filter::LevelFilter::TRACE)
        .with_writer(tracing_subscriber::fmt::TestWriter::new())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let sink = Arc::new(TracingSink::new());
        let pipeline = LoggingPipeline::new(&ReplayConfig::default(), sink);

        let op = OperationContext::start("op");
        pipeline.log(Some(&op), record(Severity::Debug, 1, "buffered context"));
        pipeline.log(
            Some(&op),
            record(Severity::Error, 2, "boom").with_exception("io error"),
        );
        pipeline.complete(&op, "SystemError");
    });
}

#[tokio::test]
async fn sibling_operations_buffer_independently_under_concurrency() {
    let sink = Arc::new(MemorySink::new());
    let pipeline = Arc::new(LoggingPipeline::new(&ReplayConfig::default(), sink.clone()));

    let parent = OperationContext::start("parent");
    let left = parent.start_child("left");
    let right = parent.start_child("right");

    let mut handles = Vec::new();
    for (op, label) in [(left.clone(), "left"), (right.clone(), "right")] {
        let pipeline = Arc::clone(&pipeline);
        handles.push(tokio::spawn(async move {
            for i in 0..100 {
                pipeline.log(
                    Some(&op),
                    LogRecord::new("app", Severity::Trace, 0, format!("{}-{}", label, i)),
                );
                tokio::task::yield_now().await;
            }
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    // Writes against one sibling never leak into the other
    let left_buffer = left.replay_buffer().unwrap();
    let right_buffer = right.replay_buffer().unwrap();
    assert_eq!(left_buffer.len(), 100);
    assert_eq!(right_buffer.len(), 100);
    assert!(left_buffer.snapshot().iter().all(|r| r.message.starts_with("left-")));
    assert!(right_buffer.snapshot().iter().all(|r| r.message.starts_with("right-")));
    assert!(parent.replay_buffer().is_none());

    // Only the failing sibling replays
    pipeline.complete(&left, "SystemError");
    pipeline.complete(&right, "Success");
    assert_eq!(sink.len(), 100);
    assert!(sink.records().iter().all(|r| r.message.contains("left-")));
}
