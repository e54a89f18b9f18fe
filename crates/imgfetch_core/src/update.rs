use crate::{AppState, Effect, Msg, SessionState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputSubmitted(raw) => {
            if state.session() == SessionState::Exiting {
                return (state, Vec::new());
            }
            let line = raw.trim();
            // The whole line must equal `exit`; an `exit` token among URLs is
            // fetched like any other token.
            if line.eq_ignore_ascii_case("exit") {
                state.request_exit();
                return (state, vec![Effect::Exit]);
            }
            let urls = parse_urls(line);
            if urls.is_empty() {
                return (state, Vec::new());
            }
            state
                .begin_batch(urls)
                .into_iter()
                .map(|(job_id, url)| Effect::EnqueueUrl { job_id, url })
                .collect()
        }
        Msg::JobProgress {
            job_id,
            stage,
            bytes,
        } => {
            state.apply_progress(job_id, stage, bytes);
            Vec::new()
        }
        Msg::JobDone { job_id, result } => {
            state.apply_done(job_id, result);
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn parse_urls(line: &str) -> Vec<String> {
    line.split_whitespace().map(ToOwned::to_owned).collect()
}
