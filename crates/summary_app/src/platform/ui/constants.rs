pub const TITLE: &str = "Website Summary Tool";
pub const SUBTITLE: &str = "Get an AI-generated company description from any website";
pub const BUTTON_GENERATE: &str = "Generate";
pub const BUTTON_ANALYZING: &str = "Analyzing...";
pub const PENDING_LABEL: &str = "Other requests pending:";
pub const LOADING_TEXT: &str = "Analyzing website content...";
pub const ERROR_HEADING: &str = "Error";
pub const RESULT_HEADING: &str = "Company Overview";
pub const DEBUG_HEADING: &str = "Debug Information";
pub const DEBUG_REQUEST_LABEL: &str = "API Request URL:";
pub const DEBUG_RESPONSE_LABEL: &str = "API Response:";
pub const PROMPT_HELP: &str = "Enter a website URL (empty line resubmits, :debug toggles details, :quit exits)";
