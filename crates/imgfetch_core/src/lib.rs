//! Imgfetch core: pure REPL state machine and result vocabulary.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use state::{AppState, JobId, JobResultKind, SessionState, Stage};
pub use update::update;
pub use view_model::{describe_result, AppViewModel, JobRowView};
