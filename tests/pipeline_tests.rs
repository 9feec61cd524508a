//! Source pipeline and stream behavior with scripted stages.

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use floatarb::application::pipeline::{PipelineId, SourcePipeline};
use floatarb::error::{Error, StreamError, TransportError};
use floatarb::stream;
use floatarb::testkit::source::{scripted_pipeline, ScriptedFetcher, ScriptedNormalizer};

#[tokio::test(start_paused = true)]
async fn output_follows_document_order_despite_completion_order() {
    let normalizer = ScriptedNormalizer::new(vec![vec![1, 2], vec![3], vec![], vec![4, 5]])
        .with_delays(vec![
            Duration::from_millis(300),
            Duration::from_millis(10),
            Duration::from_millis(200),
            Duration::ZERO,
        ]);
    let pipeline = SourcePipeline::new(
        PipelineId::SteamApi,
        Arc::new(ScriptedFetcher::new(4)),
        Arc::new(normalizer),
        2,
    );

    assert_eq!(pipeline.run().await.unwrap(), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn empty_fetch_yields_empty_output() {
    let pipeline = scripted_pipeline::<u32>(PipelineId::Csmoney, Vec::new());
    assert!(pipeline.run().await.unwrap().is_empty());
}

#[tokio::test]
async fn fetch_failure_fails_the_run() {
    let fetcher = ScriptedFetcher::new(5).fail_after(2);
    let written = fetcher.written();
    let pipeline = SourcePipeline::new(
        PipelineId::Csmoney,
        Arc::new(fetcher),
        Arc::new(ScriptedNormalizer::new(vec![vec![1], vec![2], vec![3]])),
        8,
    );

    let err = pipeline.run().await.unwrap_err();
    assert!(matches!(
        err,
        Error::Transport(TransportError::Status { status: 503, .. })
    ));
    assert_eq!(written.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn normalize_failure_fails_the_run() {
    let pipeline = SourcePipeline::new(
        PipelineId::SteamApi,
        Arc::new(ScriptedFetcher::new(3)),
        Arc::new(ScriptedNormalizer::with_failures(vec![
            Some(vec![1]),
            None,
            Some(vec![3]),
        ])),
        1,
    );

    let err = pipeline.run().await.unwrap_err();
    assert_eq!(err.category(), "malformed_response");
}

#[tokio::test]
async fn small_capacity_still_drains_everything() {
    let batches: Vec<Vec<usize>> = (0..50).map(|i| vec![i]).collect();
    let pipeline = SourcePipeline::new(
        PipelineId::Csmoney,
        Arc::new(ScriptedFetcher::new(50)),
        Arc::new(ScriptedNormalizer::new(batches)),
        1,
    );

    let output = pipeline.run().await.unwrap();
    assert_eq!(output, (0..50).collect::<Vec<_>>());
}

#[tokio::test]
async fn closed_stream_ends_without_a_marker_and_rejects_puts() {
    let (writer, mut reader) = stream::channel(4);
    writer.put("a").await.unwrap();
    writer.put("b").await.unwrap();
    writer.close().unwrap();

    assert_eq!(writer.put("c").await, Err(StreamError::Closed));
    assert_eq!(writer.close(), Err(StreamError::AlreadyClosed));
    assert_eq!(reader.next().await, Some("a"));
    assert_eq!(reader.next().await, Some("b"));
    assert_eq!(reader.next().await, None);
    assert_eq!(reader.next().await, None);
}
