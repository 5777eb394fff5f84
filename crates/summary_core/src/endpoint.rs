use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Base address of the hosted summarization API.
pub const DEFAULT_ENDPOINT: &str = "https://tam-api-a0u1.onrender.com";

const DOMAIN_PATH: &str = "domain";
const DOMAIN_QUERY_KEY: &str = "domain_url";

/// Characters left as-is by `encodeURIComponent`: alphanumerics and `-_.!~*'()`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EndpointError {
    #[error("invalid endpoint url {input:?}: {source}")]
    Parse {
        input: String,
        source: url::ParseError,
    },
    #[error("endpoint url {0:?} cannot carry a path")]
    NotABase(String),
}

/// Summary API location. Requests go to `<base>/domain?domain_url=<target>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryEndpoint {
    base: Url,
}

impl SummaryEndpoint {
    pub fn parse(input: &str) -> Result<Self, EndpointError> {
        let base = Url::parse(input.trim()).map_err(|source| EndpointError::Parse {
            input: input.to_string(),
            source,
        })?;
        if base.cannot_be_a_base() {
            return Err(EndpointError::NotABase(input.to_string()));
        }
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the request URL for an already normalized target URL.
    pub fn request_url(&self, target_url: &str) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(DOMAIN_PATH);
        }
        // Appended by hand: `set_query` would re-escape `'` for http(s).
        let encoded = utf8_percent_encode(target_url, URI_COMPONENT);
        format!("{url}?{DOMAIN_QUERY_KEY}={encoded}")
    }
}

impl Default for SummaryEndpoint {
    fn default() -> Self {
        Self {
            base: Url::parse(DEFAULT_ENDPOINT).expect("default endpoint is a valid url"),
        }
    }
}
