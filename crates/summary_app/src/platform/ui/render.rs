use summary_core::AppViewModel;

use super::constants::*;

const INDENT: &str = "  ";

/// Renders the widget as plain text lines.
///
/// The loading indicator only shows while no error or overview is present,
/// and the debug panel only accompanies an overview.
pub fn render(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![TITLE.to_string(), SUBTITLE.to_string(), String::new()];

    let button = if view.submit_enabled {
        BUTTON_GENERATE
    } else {
        BUTTON_ANALYZING
    };
    lines.push(format!("URL: {}  [{}]", view.input, button));

    if let Some(error) = &view.error {
        lines.push(String::new());
        lines.push(ERROR_HEADING.to_string());
        lines.push(indent(error));
    }

    if let Some(overview) = &view.overview {
        lines.push(String::new());
        lines.push(RESULT_HEADING.to_string());
        lines.push(indent(overview));

        if let Some(debug) = &view.debug {
            lines.push(String::new());
            if view.debug_expanded {
                lines.push(format!("v {DEBUG_HEADING}"));
                lines.push(indent(DEBUG_REQUEST_LABEL));
                lines.push(indent(&indent(&debug.request_url)));
                lines.push(indent(DEBUG_RESPONSE_LABEL));
                lines.extend(
                    debug
                        .response_pretty
                        .lines()
                        .map(|line| format!("{INDENT}{INDENT}{line}")),
                );
            } else {
                lines.push(format!("> {DEBUG_HEADING}"));
            }
        }
    }

    if view.is_loading && view.error.is_none() && view.overview.is_none() {
        lines.push(String::new());
        lines.push(LOADING_TEXT.to_string());
    }

    // Requests beyond the one the loading indicator stands for.
    let pending = if view.is_loading {
        view.in_flight.saturating_sub(1)
    } else {
        view.in_flight
    };
    if pending > 0 {
        lines.push(String::new());
        lines.push(format!("{PENDING_LABEL} {pending}"));
    }

    lines
}

fn indent(text: &str) -> String {
    format!("{INDENT}{text}")
}
