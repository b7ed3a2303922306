//! Header construction for outbound requests.

use reqwest::header::{
    ACCEPT, CONNECTION, HeaderMap, HeaderName, HeaderValue, REFERER, USER_AGENT,
};

/// Accept value used by the inbox status call.
pub(crate) const ACCEPT_JSON: &str = "application/json, text/javascript, */*; q=0.01";

/// Headers the web UI sends with its XHR calls.
pub(crate) const XHR_HEADERS: &[(&str, &str)] = &[
    ("Accept-Language", "en-US,en;q=0.5"),
    ("X-Requested-With", "XMLHttpRequest"),
];

/// Per-request knobs layered over the client's fixed user agent.
#[derive(Debug, Clone)]
pub(crate) struct RequestOptions<'a> {
    pub(crate) accept: &'a str,
    pub(crate) referer: Option<String>,
    pub(crate) keep_alive: bool,
    /// Applied last, replacing any header of the same name.
    pub(crate) extra_headers: &'a [(&'a str, &'a str)],
}

impl Default for RequestOptions<'_> {
    fn default() -> Self {
        Self {
            accept: "*/*",
            referer: None,
            keep_alive: false,
            extra_headers: &[],
        }
    }
}

impl RequestOptions<'_> {
    /// Build the header map for a request sent with `user_agent`.
    ///
    /// Values that are not valid header text are skipped.
    pub(crate) fn headers(&self, user_agent: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(user_agent) {
            headers.insert(USER_AGENT, value);
        }
        if let Ok(value) = HeaderValue::from_str(self.accept) {
            headers.insert(ACCEPT, value);
        }
        if let Some(value) = self
            .referer
            .as_deref()
            .and_then(|r| HeaderValue::from_str(r).ok())
        {
            headers.insert(REFERER, value);
        }
        headers.insert(
            CONNECTION,
            HeaderValue::from_static(if self.keep_alive { "keep-alive" } else { "close" }),
        );

        for (name, value) in self.extra_headers {
            let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) else {
                continue;
            };
            headers.insert(name, value);
        }

        headers
    }
}
