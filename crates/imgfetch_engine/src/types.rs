use std::fmt;
use std::path::PathBuf;

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Queued,
    Downloading,
    Hashing,
    Writing,
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobProgress {
    pub job_id: JobId,
    pub stage: Stage,
    pub bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    Progress(JobProgress),
    JobCompleted {
        job_id: JobId,
        result: Result<JobOutcome, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// End state of one accepted job: either a new file on disk or a payload
/// already present in the dedupe store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Saved {
        path: PathBuf,
        bytes_written: u64,
        content_hash: String,
    },
    Duplicate {
        content_hash: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    /// Declared Content-Type missing or outside the allowed prefixes.
    NotAnImage { content_type: Option<String> },
    /// Declared Content-Length above the configured cap. Header value only;
    /// the streamed byte count is never consulted.
    TooLarge { max_bytes: u64, declared: u64 },
    Network,
    Persist,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::NotAnImage { content_type } => match content_type {
                Some(ct) => write!(f, "content type {ct} is not an image"),
                None => write!(f, "no content type declared"),
            },
            FailureKind::TooLarge { max_bytes, declared } => {
                write!(f, "declared size {declared} exceeds limit {max_bytes}")
            }
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Persist => write!(f, "persist error"),
        }
    }
}
