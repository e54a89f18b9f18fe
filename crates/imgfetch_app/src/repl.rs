//! Interactive prompt loop: reads URL lines from stdin, drives the core state
//! machine, and executes its effects against the engine.

use std::io::{self, BufRead, Write};

use engine_logging::{engine_info, engine_warn};
use imgfetch_core::{describe_result, update, AppState, Effect, JobResultKind, Msg, SessionState};
use imgfetch_engine::{
    EngineEvent, EngineHandle, EngineSettings, FailureKind, FetchError, JobOutcome,
};

const PROMPT: &str = "Enter image URL(s): ";

pub fn run() -> anyhow::Result<()> {
    let settings = EngineSettings::default();
    println!("Multi-image fetcher (separate multiple URLs with spaces).");
    println!(
        "Images are saved into {}. Type 'exit' to quit.",
        settings.save_dir.display()
    );

    let engine = EngineHandle::new(settings);
    let mut state = AppState::new();
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        print!("{PROMPT}");
        io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            // stdin closed; same as `exit`.
            println!();
            break;
        }

        let (next, effects) = update(std::mem::take(&mut state), Msg::InputSubmitted(line));
        state = next;
        for effect in effects {
            match effect {
                Effect::EnqueueUrl { job_id, url } => {
                    engine_info!("enqueue job={} url={}", job_id, url);
                    engine.enqueue(job_id, url);
                }
                Effect::Exit => {}
            }
        }
        if state.session() == SessionState::Exiting {
            println!("Exiting. All done!");
            break;
        }

        drain_batch(&engine, &mut state);
    }

    Ok(())
}

/// Block on engine events until the current batch has fully completed,
/// printing one result line per finished job. A failed job never stops the
/// rest of the batch.
fn drain_batch(engine: &EngineHandle, state: &mut AppState) {
    while state.has_active_jobs() {
        let Some(event) = engine.recv() else {
            engine_warn!("engine worker gone with jobs still active");
            break;
        };
        let msg = match event {
            EngineEvent::Progress(progress) => Msg::JobProgress {
                job_id: progress.job_id,
                stage: map_stage(progress.stage),
                bytes: progress.bytes,
            },
            EngineEvent::JobCompleted { job_id, result } => {
                if let Err(err) = &result {
                    engine_warn!("job {} failed: {}", job_id, err);
                }
                let kind = map_result(result);
                println!("{}", describe_result(&kind));
                Msg::JobDone {
                    job_id,
                    result: kind,
                }
            }
        };
        let (next, _effects) = update(std::mem::take(state), msg);
        *state = next;
    }
}

fn map_result(result: Result<JobOutcome, FetchError>) -> JobResultKind {
    match result {
        Ok(JobOutcome::Saved { path, .. }) => JobResultKind::Saved {
            path: path.display().to_string(),
        },
        Ok(JobOutcome::Duplicate { .. }) => JobResultKind::SkippedDuplicate,
        Err(err) => match err.kind {
            FailureKind::NotAnImage { content_type } => {
                JobResultKind::SkippedNotImage { content_type }
            }
            FailureKind::TooLarge { max_bytes, declared } => {
                JobResultKind::SkippedTooLarge { declared, max_bytes }
            }
            FailureKind::HttpStatus(status) => JobResultKind::ErrorHttp { status },
            FailureKind::Timeout => JobResultKind::ErrorTimeout,
            FailureKind::Network => JobResultKind::ErrorConnection {
                message: err.message,
            },
            FailureKind::InvalidUrl
            | FailureKind::RedirectLimitExceeded
            | FailureKind::Persist => JobResultKind::ErrorOther {
                message: err.message,
            },
        },
    }
}

fn map_stage(stage: imgfetch_engine::Stage) -> imgfetch_core::Stage {
    match stage {
        imgfetch_engine::Stage::Queued => imgfetch_core::Stage::Queued,
        imgfetch_engine::Stage::Downloading => imgfetch_core::Stage::Downloading,
        imgfetch_engine::Stage::Hashing => imgfetch_core::Stage::Hashing,
        imgfetch_engine::Stage::Writing => imgfetch_core::Stage::Writing,
        imgfetch_engine::Stage::Done => imgfetch_core::Stage::Done,
    }
}
