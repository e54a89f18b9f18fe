use std::collections::BTreeMap;

use crate::view_model::{AppViewModel, JobRowView};

pub type JobId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Waiting for the next input line.
    #[default]
    AwaitingInput,
    /// A batch of jobs from one input line is in flight.
    Fetching,
    /// `exit` was entered; no further input is accepted.
    Exiting,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Queued,
    Downloading,
    Hashing,
    Writing,
    Done,
}

/// Outcome of one fetch attempt, as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobResultKind {
    Saved { path: String },
    SkippedDuplicate,
    SkippedNotImage { content_type: Option<String> },
    SkippedTooLarge { declared: u64, max_bytes: u64 },
    ErrorHttp { status: u16 },
    ErrorConnection { message: String },
    ErrorTimeout,
    ErrorOther { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct JobRow {
    url: String,
    stage: Stage,
    bytes: Option<u64>,
    outcome: Option<JobResultKind>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    session: SessionState,
    jobs: BTreeMap<JobId, JobRow>,
    next_job_id: JobId,
    active_jobs: usize,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> SessionState {
        self.session
    }

    pub fn has_active_jobs(&self) -> bool {
        self.active_jobs > 0
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            session: self.session,
            active_jobs: self.active_jobs,
            jobs: self
                .jobs
                .iter()
                .map(|(&job_id, row)| JobRowView {
                    job_id,
                    url: row.url.clone(),
                    stage: row.stage,
                    bytes: row.bytes,
                    outcome: row.outcome.clone(),
                })
                .collect(),
        }
    }

    /// Create one queued job per URL, in input order, with fresh ids.
    pub(crate) fn begin_batch(&mut self, urls: Vec<String>) -> Vec<(JobId, String)> {
        let mut enqueued = Vec::with_capacity(urls.len());
        for url in urls {
            self.next_job_id += 1;
            let job_id = self.next_job_id;
            self.jobs.insert(
                job_id,
                JobRow {
                    url: url.clone(),
                    stage: Stage::Queued,
                    bytes: None,
                    outcome: None,
                },
            );
            self.active_jobs += 1;
            enqueued.push((job_id, url));
        }
        self.session = SessionState::Fetching;
        enqueued
    }

    pub(crate) fn apply_progress(&mut self, job_id: JobId, stage: Stage, bytes: Option<u64>) {
        if let Some(row) = self.jobs.get_mut(&job_id) {
            if row.outcome.is_none() {
                row.stage = stage;
                if bytes.is_some() {
                    row.bytes = bytes;
                }
            }
        }
    }

    pub(crate) fn apply_done(&mut self, job_id: JobId, result: JobResultKind) {
        let Some(row) = self.jobs.get_mut(&job_id) else {
            return;
        };
        if row.outcome.is_some() {
            return;
        }
        row.stage = Stage::Done;
        row.outcome = Some(result);
        self.active_jobs -= 1;
        if self.active_jobs == 0 && self.session == SessionState::Fetching {
            self.session = SessionState::AwaitingInput;
        }
    }

    pub(crate) fn request_exit(&mut self) {
        self.session = SessionState::Exiting;
    }
}
