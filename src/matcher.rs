//! Request comparison policy for playback.

use serde_yaml::Value;

/// Compares one aspect of two request mappings.
///
/// Each matcher reads a single field from both requests and compares the
/// values for equality; a field absent on both sides compares equal. Which
/// aspects must agree for a stored record to play back is chosen per
/// cassette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMatcher {
    /// HTTP method (`method` field).
    Method,
    /// Full URL (`url` field).
    Url,
    /// Host portion (`host` field).
    Host,
    /// Query string (`query_string` field).
    QueryString,
    /// Raw request body (`body` field).
    Body,
    /// Form-encoded post fields (`post_fields` field).
    PostFields,
    /// Request headers (`headers` field).
    Headers,
}

impl RequestMatcher {
    /// The request field this matcher compares.
    #[must_use]
    pub fn field(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Url => "url",
            Self::Host => "host",
            Self::QueryString => "query_string",
            Self::Body => "body",
            Self::PostFields => "post_fields",
            Self::Headers => "headers",
        }
    }

    /// Whether `stored` and `probe` agree on this matcher's field.
    #[must_use]
    pub fn matches(self, stored: &Value, probe: &Value) -> bool {
        stored.get(self.field()) == probe.get(self.field())
    }
}

/// Apply a matcher set conjunctively. An empty set matches everything.
#[must_use]
pub fn matches_all(matchers: &[RequestMatcher], stored: &Value, probe: &Value) -> bool {
    matchers.iter().all(|matcher| matcher.matches(stored, probe))
}

/// The default matcher set: method and URL.
#[must_use]
pub fn default_matchers() -> Vec<RequestMatcher> {
    vec![RequestMatcher::Method, RequestMatcher::Url]
}
