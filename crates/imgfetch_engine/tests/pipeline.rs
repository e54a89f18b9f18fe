use std::fs;

use imgfetch_engine::{
    EngineEvent, EngineHandle, EngineSettings, FailureKind, FetchSettings, JobOutcome,
    ProgressSink, ReqwestFetcher, SavePipeline,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct NullSink;

impl ProgressSink for NullSink {
    fn emit(&self, _event: EngineEvent) {}
}

async fn mount_image(server: &MockServer, route: &str, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.to_vec(), "image/png"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn saves_file_named_after_url_basename() {
    let server = MockServer::start().await;
    mount_image(&server, "/a/b/test.png", b"png-bytes").await;

    let temp = TempDir::new().unwrap();
    let save_dir = temp.path().join("Fetched_Images");
    let mut pipeline = SavePipeline::new(save_dir.clone());
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/a/b/test.png", server.uri());

    let outcome = pipeline.run(&fetcher, 1, &url, &NullSink).await.unwrap();
    let JobOutcome::Saved { path, bytes_written, .. } = outcome else {
        panic!("expected a saved file");
    };
    assert_eq!(path, save_dir.join("test.png"));
    assert_eq!(bytes_written, 9);
    assert_eq!(fs::read(&path).unwrap(), b"png-bytes");
}

#[tokio::test]
async fn generated_names_count_unique_payloads() {
    let server = MockServer::start().await;
    mount_image(&server, "/first", b"payload-one").await;
    mount_image(&server, "/second", b"payload-two").await;

    let temp = TempDir::new().unwrap();
    let mut pipeline = SavePipeline::new(temp.path().to_path_buf());
    let fetcher = ReqwestFetcher::new(FetchSettings::default());

    let outcome = pipeline
        .run(&fetcher, 1, &format!("{}/first", server.uri()), &NullSink)
        .await
        .unwrap();
    let JobOutcome::Saved { path, .. } = outcome else {
        panic!("expected a saved file");
    };
    assert_eq!(path.file_name().unwrap(), "image_1.jpg");

    let outcome = pipeline
        .run(&fetcher, 2, &format!("{}/second", server.uri()), &NullSink)
        .await
        .unwrap();
    let JobOutcome::Saved { path, .. } = outcome else {
        panic!("expected a saved file");
    };
    assert_eq!(path.file_name().unwrap(), "image_2.jpg");
    assert_eq!(pipeline.unique_count(), 2);
}

#[tokio::test]
async fn duplicate_payload_is_reported_and_not_written_again() {
    let server = MockServer::start().await;
    mount_image(&server, "/a/pic1.png", b"same-bytes").await;
    mount_image(&server, "/b/pic2.png", b"same-bytes").await;

    let temp = TempDir::new().unwrap();
    let mut pipeline = SavePipeline::new(temp.path().to_path_buf());
    let fetcher = ReqwestFetcher::new(FetchSettings::default());

    let first = pipeline
        .run(&fetcher, 1, &format!("{}/a/pic1.png", server.uri()), &NullSink)
        .await
        .unwrap();
    assert!(matches!(first, JobOutcome::Saved { .. }));

    let second = pipeline
        .run(&fetcher, 2, &format!("{}/b/pic2.png", server.uri()), &NullSink)
        .await
        .unwrap();
    assert!(matches!(second, JobOutcome::Duplicate { .. }));

    let entries: Vec<_> = fs::read_dir(temp.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(entries, vec!["pic1.png"]);
    assert_eq!(pipeline.unique_count(), 1);
}

#[tokio::test]
async fn basename_collision_overwrites_the_previous_file() {
    let server = MockServer::start().await;
    mount_image(&server, "/a/same.png", b"first-version").await;
    mount_image(&server, "/b/same.png", b"second-version").await;

    let temp = TempDir::new().unwrap();
    let mut pipeline = SavePipeline::new(temp.path().to_path_buf());
    let fetcher = ReqwestFetcher::new(FetchSettings::default());

    pipeline
        .run(&fetcher, 1, &format!("{}/a/same.png", server.uri()), &NullSink)
        .await
        .unwrap();
    pipeline
        .run(&fetcher, 2, &format!("{}/b/same.png", server.uri()), &NullSink)
        .await
        .unwrap();

    assert_eq!(
        fs::read(temp.path().join("same.png")).unwrap(),
        b"second-version"
    );
    assert_eq!(pipeline.unique_count(), 2);
}

#[tokio::test]
async fn write_failure_reports_persist_and_keeps_the_hash() {
    let server = MockServer::start().await;
    mount_image(&server, "/pic.png", b"bytes").await;

    // Save dir path occupied by a plain file: every write must fail.
    let temp = TempDir::new().unwrap();
    let blocked = temp.path().join("not_a_dir");
    fs::write(&blocked, "x").unwrap();

    let mut pipeline = SavePipeline::new(blocked);
    let fetcher = ReqwestFetcher::new(FetchSettings::default());
    let url = format!("{}/pic.png", server.uri());

    let err = pipeline.run(&fetcher, 1, &url, &NullSink).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Persist);
    // The hash was recorded before the write attempt, as the dedupe key is.
    assert_eq!(pipeline.unique_count(), 1);
}

#[tokio::test(flavor = "multi_thread")]
async fn engine_processes_a_batch_in_order_and_continues_past_failures() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/broken.png"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    mount_image(&server, "/ok.png", b"good-bytes").await;

    let temp = TempDir::new().unwrap();
    let settings = EngineSettings::default_with_save_dir(temp.path().to_path_buf());
    let engine = EngineHandle::new(settings);
    engine.enqueue(1, format!("{}/broken.png", server.uri()));
    engine.enqueue(2, format!("{}/ok.png", server.uri()));

    let mut completions = Vec::new();
    while completions.len() < 2 {
        match engine.recv().expect("engine alive") {
            EngineEvent::JobCompleted { job_id, result } => completions.push((job_id, result)),
            EngineEvent::Progress(progress) => {
                // Strictly sequential: no progress for job 2 before job 1 completes.
                if completions.is_empty() {
                    assert_eq!(progress.job_id, 1);
                }
            }
        }
    }

    assert_eq!(completions[0].0, 1);
    assert_eq!(
        completions[0].1.as_ref().unwrap_err().kind,
        FailureKind::HttpStatus(500)
    );
    assert_eq!(completions[1].0, 2);
    assert!(matches!(
        completions[1].1,
        Ok(JobOutcome::Saved { .. })
    ));
    assert!(temp.path().join("ok.png").exists());
}
