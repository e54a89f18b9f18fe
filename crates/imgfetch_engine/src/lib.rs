//! Imgfetch engine: the fetch-validate-dedupe-save pipeline.
mod dedupe;
mod engine;
mod fetch;
mod filename;
mod hash;
mod persist;
mod pipeline;
mod types;

pub use dedupe::DedupeStore;
pub use engine::{EngineHandle, EngineSettings};
pub use fetch::{ChannelProgressSink, FetchSettings, Fetcher, ProgressSink, ReqwestFetcher};
pub use filename::image_filename;
pub use hash::content_hash;
pub use persist::{ensure_output_dir, AtomicFileWriter, PersistError};
pub use pipeline::SavePipeline;
pub use types::{
    EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, JobId, JobOutcome,
    JobProgress, Stage,
};
