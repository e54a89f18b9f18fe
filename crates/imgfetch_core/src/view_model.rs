use crate::{JobId, JobResultKind, SessionState, Stage};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub session: SessionState,
    pub jobs: Vec<JobRowView>,
    pub active_jobs: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobRowView {
    pub job_id: JobId,
    pub url: String,
    pub stage: Stage,
    pub bytes: Option<u64>,
    pub outcome: Option<JobResultKind>,
}

/// One human-readable stdout line per finished job. Each category carries its
/// own marker so outcomes can be told apart at a glance.
pub fn describe_result(result: &JobResultKind) -> String {
    match result {
        JobResultKind::Saved { path } => format!("Image saved: {path}"),
        JobResultKind::SkippedDuplicate => "Skipped duplicate image.".to_string(),
        JobResultKind::SkippedNotImage {
            content_type: Some(ct),
        } => format!("Skipped: content type '{ct}' is not an image."),
        JobResultKind::SkippedNotImage { content_type: None } => {
            "Skipped: response declared no content type.".to_string()
        }
        JobResultKind::SkippedTooLarge { declared, max_bytes } => {
            format!("Skipped: declared size {declared} bytes exceeds the {max_bytes}-byte limit.")
        }
        JobResultKind::ErrorHttp { status } => format!("HTTP error: status {status}."),
        JobResultKind::ErrorConnection { message } => format!("Connection error: {message}"),
        JobResultKind::ErrorTimeout => "Request timed out.".to_string(),
        JobResultKind::ErrorOther { message } => format!("Unexpected error: {message}"),
    }
}
