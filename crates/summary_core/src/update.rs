use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::InputChanged(text) => {
            state.set_input(text);
            Vec::new()
        }
        Msg::Submitted => match state.begin_submission() {
            Some((request_id, request_url)) => vec![Effect::FetchSummary {
                request_id,
                request_url,
            }],
            None => Vec::new(),
        },
        Msg::SummaryReceived { request_id, result } => {
            state.apply_completion(request_id, result);
            Vec::new()
        }
        Msg::DebugToggled => {
            state.toggle_debug();
            Vec::new()
        }
    };

    (state, effects)
}
