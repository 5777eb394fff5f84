use summary_core::Msg;

/// Events the front end feeds into the main loop.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    Core(Msg),
    Quit,
}

/// Maps one line of terminal input onto app events.
///
/// `:debug` toggles the debug panel, `:quit` exits, an empty line resubmits
/// the current input and anything else replaces the input and submits it.
pub fn parse_line(line: &str) -> Vec<AppEvent> {
    match line.trim() {
        ":quit" | ":q" => vec![AppEvent::Quit],
        ":debug" => vec![AppEvent::Core(Msg::DebugToggled)],
        "" => vec![AppEvent::Core(Msg::Submitted)],
        _ => vec![
            AppEvent::Core(Msg::InputChanged(line.to_string())),
            AppEvent::Core(Msg::Submitted),
        ],
    }
}
