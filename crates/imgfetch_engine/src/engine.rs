use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::fetch::{ChannelProgressSink, FetchSettings, ReqwestFetcher};
use crate::pipeline::SavePipeline;
use crate::{EngineEvent, JobId};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub fetch: FetchSettings,
    pub save_dir: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            save_dir: PathBuf::from("Fetched_Images"),
        }
    }
}

impl EngineSettings {
    pub fn default_with_save_dir(save_dir: PathBuf) -> Self {
        Self {
            save_dir,
            ..Self::default()
        }
    }
}

enum EngineCommand {
    Enqueue { job_id: JobId, url: String },
}

pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: EngineSettings) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let fetcher = ReqwestFetcher::new(settings.fetch);
        let mut pipeline = SavePipeline::new(settings.save_dir);

        // One worker, one job at a time: each URL is fetched and saved before
        // the next command is taken. The pipeline and its dedupe store never
        // leave this thread.
        thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Enqueue { job_id, url } => {
                        let sink = ChannelProgressSink::new(event_tx.clone());
                        let result =
                            runtime.block_on(pipeline.run(&fetcher, job_id, &url, &sink));
                        let _ = event_tx.send(EngineEvent::JobCompleted { job_id, result });
                    }
                }
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn enqueue(&self, job_id: JobId, url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Enqueue {
            job_id,
            url: url.into(),
        });
    }

    /// Blocks until the next event; `None` once the worker is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }
}
