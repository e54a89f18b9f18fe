#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// One raw line read from standard input.
    InputSubmitted(String),
    /// Engine progress for a job.
    JobProgress {
        job_id: crate::JobId,
        stage: crate::Stage,
        bytes: Option<u64>,
    },
    /// Engine completion for a job.
    JobDone {
        job_id: crate::JobId,
        result: crate::JobResultKind,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
