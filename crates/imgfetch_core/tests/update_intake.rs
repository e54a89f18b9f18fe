use imgfetch_core::{update, AppState, Effect, JobResultKind, Msg, SessionState};

fn submit(state: AppState, line: &str) -> (AppState, Vec<Effect>) {
    update(state, Msg::InputSubmitted(line.to_string()))
}

fn finish(state: AppState, job_id: u64, result: JobResultKind) -> AppState {
    let (state, _) = update(state, Msg::JobDone { job_id, result });
    state
}

#[test]
fn splits_whitespace_separated_urls_in_order() {
    engine_logging::initialize_for_tests();
    let state = AppState::new();

    let (state, effects) = submit(state, "  http://a/x.png\thttp://b/y.png  http://c/z \n");

    assert_eq!(
        effects,
        vec![
            Effect::EnqueueUrl {
                job_id: 1,
                url: "http://a/x.png".to_string()
            },
            Effect::EnqueueUrl {
                job_id: 2,
                url: "http://b/y.png".to_string()
            },
            Effect::EnqueueUrl {
                job_id: 3,
                url: "http://c/z".to_string()
            },
        ]
    );
    assert_eq!(state.session(), SessionState::Fetching);
    assert!(state.has_active_jobs());
}

#[test]
fn blank_line_enqueues_nothing() {
    let state = AppState::new();
    let (state, effects) = submit(state, "   \n");
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::AwaitingInput);
    assert!(!state.has_active_jobs());
}

#[test]
fn exit_matches_the_whole_line_in_any_case() {
    for line in ["exit", "EXIT", "Exit", "  eXiT \n"] {
        let (state, effects) = submit(AppState::new(), line);
        assert_eq!(effects, vec![Effect::Exit], "line: {line:?}");
        assert_eq!(state.session(), SessionState::Exiting);
    }
}

#[test]
fn exit_token_among_other_tokens_is_treated_as_a_url() {
    let (state, effects) = submit(AppState::new(), "exit http://a/x.png");
    assert_eq!(effects.len(), 2);
    assert!(matches!(
        &effects[0],
        Effect::EnqueueUrl { url, .. } if url == "exit"
    ));
    assert_eq!(state.session(), SessionState::Fetching);
}

#[test]
fn input_after_exit_is_ignored() {
    let (state, _) = submit(AppState::new(), "exit");
    let (state, effects) = submit(state, "http://a/x.png");
    assert!(effects.is_empty());
    assert_eq!(state.session(), SessionState::Exiting);
}

#[test]
fn job_ids_continue_across_batches() {
    let (state, _) = submit(AppState::new(), "http://a/1.png http://a/2.png");
    let state = finish(
        state,
        1,
        JobResultKind::Saved {
            path: "Fetched_Images/1.png".to_string(),
        },
    );
    let state = finish(state, 2, JobResultKind::ErrorTimeout);
    assert_eq!(state.session(), SessionState::AwaitingInput);

    let (_, effects) = submit(state, "http://a/3.png");
    assert_eq!(
        effects,
        vec![Effect::EnqueueUrl {
            job_id: 3,
            url: "http://a/3.png".to_string()
        }]
    );
}
