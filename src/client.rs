//! Mailinator async client implementation.

use crate::models::{InboxStatus, MessageDetail, MessageId, SimplifiedMail};
use crate::rate_limit::{DEFAULT_INTERVAL, RateLimiter};
use crate::request::{ACCEPT_JSON, RequestOptions, XHR_HEADERS};
use crate::session::Session;
use crate::{Error, Result};
use reqwest::Url;
use reqwest::cookie::Jar;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

const BASE_URL: &str = "https://www.mailinator.com";
const STATUS_PATH: &str = "api/webinbox2";
const MESSAGE_PATH: &str = "fetchmail";
const INBOX_PAGE_PATH: &str = "inbox2.jsp";
const USER_AGENT_VALUE: &str =
    "Mozilla/5.0 (Windows NT 10.0; WOW64; rv:49.0) Gecko/20100101 Firefox/49.0";

/// Async client for one Mailinator public inbox.
///
/// Requests issued through a client are spaced at least one second apart
/// (see [`ClientBuilder::min_request_interval`]) and share one cookie jar.
/// Use [`Client::new`] for defaults or [`Client::builder`] for custom settings.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    session: Session,
    limiter: RateLimiter,
    endpoints: Endpoints,
    proxy: Option<String>,
    user_agent: String,
}

/// Service URLs resolved once against the configured base URL.
#[derive(Debug)]
struct Endpoints {
    status: Url,
    message: Url,
    inbox_page: Url,
}

impl Endpoints {
    fn resolve(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url).map_err(|e| Error::InvalidUrl(e.to_string()))?;
        if base.path() != "/" || base.query().is_some() {
            return Err(Error::InvalidUrl(format!(
                "{base_url}: expected an origin without path or query"
            )));
        }
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| Error::InvalidUrl(format!("{base_url}: {e}")))
        };

        Ok(Self {
            status: join(STATUS_PATH)?,
            message: join(MESSAGE_PATH)?,
            inbox_page: join(INBOX_PAGE_PATH)?,
        })
    }
}

impl Client {
    /// Create a builder for the given mailbox.
    ///
    /// `mailbox` may be a bare name (`"testuser"`) or a full address
    /// (`"testuser@mailinator.com"`); only the part before the first `@` is kept.
    pub fn builder(mailbox: impl AsRef<str>) -> ClientBuilder {
        ClientBuilder::new(mailbox)
    }

    /// Create a client with default settings.
    ///
    /// No network I/O happens here.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailinator_client::Client;
    /// # fn main() -> Result<(), mailinator_client::Error> {
    /// let client = Client::new("testuser@mailinator.com")?;
    /// assert_eq!(client.mailbox(), "testuser");
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(mailbox: impl AsRef<str>) -> Result<Self> {
        ClientBuilder::new(mailbox).build()
    }

    /// The mailbox name this client reads, without any domain.
    pub fn mailbox(&self) -> &str {
        self.session.mailbox()
    }

    /// Cookie jar shared by every request of this client.
    pub fn cookies(&self) -> Arc<Jar> {
        self.session.cookies()
    }

    /// Get the proxy URL if one was configured.
    pub fn proxy(&self) -> Option<&str> {
        self.proxy.as_deref()
    }

    /// Fetch the current listing of the public inbox.
    ///
    /// # Errors
    /// [`Error::Request`] on network failure or a non-2xx status,
    /// [`Error::Json`] when the body is not a valid inbox status.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailinator_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailinator_client::Error> {
    /// let client = Client::new("testuser")?;
    /// let inbox = client.inbox_status().await?;
    /// for msg in &inbox {
    ///     println!("{}: {}", msg.from, msg.subject);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn inbox_status(&self) -> Result<InboxStatus> {
        let body = self.inbox_status_raw().await?;
        parse(&body)
    }

    /// Fetch the inbox status body without decoding it.
    pub async fn inbox_status_raw(&self) -> Result<Vec<u8>> {
        let mut url = self.endpoints.status.clone();
        url.query_pairs_mut()
            .append_pair("x", "0")
            .append_pair("public_to", self.mailbox());

        self.get_bytes(url, self.status_options()).await
    }

    /// Fetch the full message for an id or an inbox listing entry.
    ///
    /// # Errors
    /// Same as [`Client::inbox_status`].
    ///
    /// # Examples
    /// ```no_run
    /// # use mailinator_client::Client;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), mailinator_client::Error> {
    /// let client = Client::new("testuser")?;
    /// let inbox = client.inbox_status().await?;
    /// if let Some(msg) = inbox.iter().next() {
    ///     let detail = client.message_detail(msg).await?;
    ///     println!("{} part(s)", detail.data.parts.len());
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn message_detail(&self, message: impl MessageId) -> Result<MessageDetail> {
        let body = self.message_detail_raw(message).await?;
        parse(&body)
    }

    /// Fetch the message body without decoding it.
    pub async fn message_detail_raw(&self, message: impl MessageId) -> Result<Vec<u8>> {
        let mut url = self.endpoints.message.clone();
        url.query_pairs_mut()
            .append_pair("msgid", message.message_id())
            .append_pair("zone", "public");

        self.get_bytes(url, self.message_options()).await
    }

    /// Fetch a message and reduce it to from/to/subject and the first part's body.
    ///
    /// # Errors
    /// Same as [`Client::message_detail`], plus [`Error::EmptyParts`] when the
    /// message has no MIME parts.
    pub async fn simplified_mail(&self, message: impl MessageId) -> Result<SimplifiedMail> {
        let id = message.message_id();
        self.message_detail(id).await?.simplify(id)
    }

    /// Headers for the inbox status call: JSON accept, connection closed.
    fn status_options(&self) -> RequestOptions<'static> {
        RequestOptions {
            accept: ACCEPT_JSON,
            referer: Some(self.endpoints.inbox_page.to_string()),
            keep_alive: false,
            extra_headers: XHR_HEADERS,
        }
    }

    /// Headers for the message call: referer names the mailbox, connection kept alive.
    fn message_options(&self) -> RequestOptions<'static> {
        let mut referer = self.endpoints.inbox_page.clone();
        referer
            .query_pairs_mut()
            .append_pair("public_to", self.mailbox());

        RequestOptions {
            referer: Some(referer.to_string()),
            keep_alive: true,
            extra_headers: XHR_HEADERS,
            ..Default::default()
        }
    }

    /// Wait for the rate limiter, send a GET and read the whole body.
    async fn get_bytes(&self, url: Url, options: RequestOptions<'_>) -> Result<Vec<u8>> {
        self.limiter.acquire().await;

        tracing::debug!(%url, "GET");
        let response = self
            .http
            .get(url)
            .headers(options.headers(&self.user_agent))
            .send()
            .await?;
        tracing::debug!(status = %response.status(), url = %response.url(), "response");

        let bytes = response.error_for_status()?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

/// Map a response body onto a record.
fn parse<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, len = body.len(), "unexpected response body");
        Error::Json(e)
    })
}

/// Builder for configuring a Mailinator client.
///
/// Start with [`Client::builder`] to override defaults.
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    mailbox: String,
    proxy: Option<String>,
    danger_accept_invalid_certs: bool,
    user_agent: String,
    base_url: String,
    min_request_interval: Duration,
}

impl ClientBuilder {
    /// Create a new builder with default settings.
    ///
    /// Defaults:
    /// - No proxy
    /// - `danger_accept_invalid_certs = false`
    /// - Desktop Firefox user agent
    /// - `https://www.mailinator.com` as the service origin
    /// - One second between requests
    pub fn new(mailbox: impl AsRef<str>) -> Self {
        Self {
            mailbox: mailbox.as_ref().to_string(),
            proxy: None,
            danger_accept_invalid_certs: false,
            user_agent: USER_AGENT_VALUE.to_string(),
            base_url: BASE_URL.to_string(),
            min_request_interval: DEFAULT_INTERVAL,
        }
    }

    /// Set a proxy URL (e.g., "http://127.0.0.1:8080" or "socks5://127.0.0.1:1080").
    pub fn proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    /// Control whether to accept invalid TLS certificates (default: false).
    pub fn danger_accept_invalid_certs(mut self, value: bool) -> Self {
        self.danger_accept_invalid_certs = value;
        self
    }

    /// Override the default user agent string.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Override the service origin.
    ///
    /// Endpoint paths are resolved against it, so pass an origin such as
    /// `http://127.0.0.1:8080`. A base with a path or query makes
    /// [`ClientBuilder::build`] fail with [`Error::InvalidUrl`].
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Minimum time between the starts of two requests (default: one second).
    ///
    /// Values above thirty years are clamped.
    pub fn min_request_interval(mut self, interval: Duration) -> Self {
        self.min_request_interval = interval;
        self
    }

    /// Build the client.
    ///
    /// No request is sent; the session starts with an empty cookie jar.
    ///
    /// # Examples
    /// ```no_run
    /// # use mailinator_client::Client;
    /// # fn main() -> Result<(), mailinator_client::Error> {
    /// let client = Client::builder("testuser")
    ///     .user_agent("my-app/1.0")
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(self) -> Result<Client> {
        let endpoints = Endpoints::resolve(&self.base_url)?;
        let session = Session::new(&self.mailbox);

        let mut builder = reqwest::Client::builder()
            .danger_accept_invalid_certs(self.danger_accept_invalid_certs)
            .cookie_provider(session.cookies())
            .gzip(true)
            .deflate(true);

        if let Some(proxy_url) = &self.proxy {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        }

        let http = builder.build()?;

        Ok(Client {
            http,
            session,
            limiter: RateLimiter::new(self.min_request_interval),
            endpoints,
            proxy: self.proxy,
            user_agent: self.user_agent,
        })
    }
}
