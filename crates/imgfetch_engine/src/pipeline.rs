use std::path::PathBuf;

use engine_logging::{engine_debug, engine_info};

use crate::dedupe::DedupeStore;
use crate::filename::image_filename;
use crate::hash::content_hash;
use crate::persist::AtomicFileWriter;
use crate::{
    EngineEvent, FailureKind, FetchError, Fetcher, JobId, JobOutcome, JobProgress, ProgressSink,
    Stage,
};

/// Fetch → hash → dedupe → save, one job at a time.
///
/// Owns the dedupe store and the writer for the whole process lifetime.
pub struct SavePipeline {
    dedupe: DedupeStore,
    writer: AtomicFileWriter,
}

impl SavePipeline {
    pub fn new(save_dir: PathBuf) -> Self {
        Self {
            dedupe: DedupeStore::new(),
            writer: AtomicFileWriter::new(save_dir),
        }
    }

    /// Number of distinct payloads recorded so far.
    pub fn unique_count(&self) -> usize {
        self.dedupe.len()
    }

    pub async fn run(
        &mut self,
        fetcher: &dyn Fetcher,
        job_id: JobId,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<JobOutcome, FetchError> {
        let output = fetcher.fetch(job_id, url, sink).await?;

        sink.emit(EngineEvent::Progress(JobProgress {
            job_id,
            stage: Stage::Hashing,
            bytes: Some(output.metadata.byte_len),
        }));
        let digest = content_hash(&output.bytes);
        if self.dedupe.contains(&digest) {
            engine_debug!("job {} duplicate payload {}", job_id, digest);
            return Ok(JobOutcome::Duplicate {
                content_hash: digest,
            });
        }

        // Recorded before the write: the generated-name sequence counts this
        // payload, and a failed write still pins the hash.
        self.dedupe.record(digest.clone());
        let filename = image_filename(url, self.dedupe.len());

        sink.emit(EngineEvent::Progress(JobProgress {
            job_id,
            stage: Stage::Writing,
            bytes: Some(output.metadata.byte_len),
        }));
        let path = self
            .writer
            .write(&filename, &output.bytes)
            .map_err(|err| FetchError::new(FailureKind::Persist, err.to_string()))?;
        engine_info!(
            "job {} saved {} ({} bytes)",
            job_id,
            path.display(),
            output.metadata.byte_len
        );

        Ok(JobOutcome::Saved {
            path,
            bytes_written: output.metadata.byte_len,
            content_hash: digest,
        })
    }
}
