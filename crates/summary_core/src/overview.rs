pub const OVERVIEW_START_MARKER: &str = "1. Company Overview";
pub const OVERVIEW_END_MARKER: &str = "2. Core Services and Offerings";
/// Returned when the markers are missing or out of order.
pub const OVERVIEW_NOT_FOUND: &str = "Company Overview section not found";

/// Pulls the "Company Overview" section out of a free-text summary.
///
/// Uses the first occurrence of each marker. The span between them is trimmed
/// and a single leading `-` or `:` is dropped together with the whitespace
/// after it. A miss yields [`OVERVIEW_NOT_FOUND`], never an error.
pub fn extract_company_overview(summary: &str) -> String {
    let (Some(start), Some(end)) = (
        summary.find(OVERVIEW_START_MARKER),
        summary.find(OVERVIEW_END_MARKER),
    ) else {
        return OVERVIEW_NOT_FOUND.to_string();
    };

    let span_start = start + OVERVIEW_START_MARKER.len();
    if end < span_start {
        return OVERVIEW_NOT_FOUND.to_string();
    }

    let span = summary[span_start..end].trim();
    let span = span
        .strip_prefix(['-', ':'])
        .map(str::trim_start)
        .unwrap_or(span);
    span.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn returns_span_between_markers() {
        let text = "...1. Company OverviewCompany X builds widgets.2. Core Services and Offerings...";
        assert_eq!(extract_company_overview(text), "Company X builds widgets.");
    }

    #[test]
    fn strips_leading_colon_or_dash() {
        let colon = "1. Company Overview:  We sell coffee.\n2. Core Services and Offerings";
        let dash = "1. Company Overview\n - We sell coffee. \n2. Core Services and Offerings";
        assert_eq!(extract_company_overview(colon), "We sell coffee.");
        assert_eq!(extract_company_overview(dash), "We sell coffee.");
    }

    #[test]
    fn only_one_leading_separator_is_removed() {
        let text = "1. Company Overview:- text2. Core Services and Offerings";
        assert_eq!(extract_company_overview(text), "- text");
    }

    #[test]
    fn inner_dashes_survive() {
        let text = "1. Company Overview A well-known brand - since 1990. 2. Core Services and Offerings";
        assert_eq!(
            extract_company_overview(text),
            "A well-known brand - since 1990."
        );
    }

    #[test]
    fn empty_span_yields_empty_string() {
        let text = "1. Company Overview   2. Core Services and Offerings";
        assert_eq!(extract_company_overview(text), "");
    }

    #[test]
    fn missing_start_marker_yields_sentinel() {
        let text = "Intro only. 2. Core Services and Offerings";
        assert_eq!(extract_company_overview(text), OVERVIEW_NOT_FOUND);
    }

    #[test]
    fn missing_end_marker_yields_sentinel() {
        let text = "1. Company Overview We sell coffee.";
        assert_eq!(extract_company_overview(text), OVERVIEW_NOT_FOUND);
    }

    #[test]
    fn markers_out_of_order_yield_sentinel() {
        let text = "2. Core Services and Offerings stuff 1. Company Overview more";
        assert_eq!(extract_company_overview(text), OVERVIEW_NOT_FOUND);
    }

    #[test]
    fn markers_are_case_sensitive() {
        let text = "1. company overview x 2. core services and offerings";
        assert_eq!(extract_company_overview(text), OVERVIEW_NOT_FOUND);
    }

    #[test]
    fn multibyte_text_is_sliced_on_char_boundaries() {
        let text = "1. Company Overview — Café Gabee, 台北.2. Core Services and Offerings";
        assert_eq!(extract_company_overview(text), "— Café Gabee, 台北.");
    }
}
