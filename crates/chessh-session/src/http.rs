//! The HTTP identity source: asks the backend via `GET /api/player/token/me`.

use std::time::Duration;

use chessh_protocol::{Codec, IDENTITY_PATH, IdentityResponse, JsonCodec};
use reqwest::header::{ACCEPT, COOKIE, HeaderValue};
use reqwest::Url;

use crate::{IdentitySource, SessionError};

// ---------------------------------------------------------------------------
// HttpIdentityConfig
// ---------------------------------------------------------------------------

/// Configuration for [`HttpIdentitySource`].
#[derive(Debug, Clone)]
pub struct HttpIdentityConfig {
    /// Origin the front end is served from. The identity path is resolved
    /// against it, so requests stay same-origin and go through the dev
    /// proxy when one is running.
    ///
    /// Default: `http://localhost:3000`.
    pub origin: String,

    /// Session credential to attach, as a raw `Cookie` header value
    /// (`name=value`). A browser attaches this automatically; native
    /// callers have to pass it in.
    pub session_cookie: Option<String>,

    /// Upper bound on the whole request. `None` waits forever, which
    /// leaves the landing page pending for as long as the backend hangs.
    pub request_timeout: Option<Duration>,
}

impl Default for HttpIdentityConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:3000".to_string(),
            session_cookie: None,
            request_timeout: None,
        }
    }
}

// ---------------------------------------------------------------------------
// HttpIdentitySource
// ---------------------------------------------------------------------------

/// [`IdentitySource`] that calls the real identity endpoint.
///
/// One GET, no body, no query parameters. Any non-2xx status is a
/// failure, and so is a body that doesn't decode.
pub struct HttpIdentitySource<C: Codec = JsonCodec> {
    client: reqwest::Client,
    url: Url,
    session_cookie: Option<HeaderValue>,
    codec: C,
}

impl HttpIdentitySource<JsonCodec> {
    /// Builds a source that decodes bodies as JSON.
    ///
    /// # Errors
    /// - [`SessionError::InvalidOrigin`]: origin isn't a base URL, or the
    ///   cookie isn't a valid header value
    /// - [`SessionError::Transport`]: the HTTP client couldn't be built
    pub fn new(config: HttpIdentityConfig) -> Result<Self, SessionError> {
        Self::with_codec(config, JsonCodec)
    }
}

impl<C: Codec> HttpIdentitySource<C> {
    /// Builds a source with a custom body codec.
    pub fn with_codec(config: HttpIdentityConfig, codec: C) -> Result<Self, SessionError> {
        let url = Url::parse(&config.origin)
            .and_then(|origin| origin.join(IDENTITY_PATH))
            .map_err(|e| SessionError::InvalidOrigin(format!("{}: {e}", config.origin)))?;

        let session_cookie = config
            .session_cookie
            .as_deref()
            .map(HeaderValue::from_str)
            .transpose()
            .map_err(|e| SessionError::InvalidOrigin(format!("session cookie: {e}")))?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(SessionError::Transport)?;

        tracing::debug!(%url, "identity source configured");

        Ok(Self {
            client,
            url,
            session_cookie,
            codec,
        })
    }

    /// The full URL requests are sent to.
    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl<C: Codec> IdentitySource for HttpIdentitySource<C> {
    async fn fetch_identity(&self) -> Result<IdentityResponse, SessionError> {
        let mut request = self
            .client
            .get(self.url.clone())
            .header(ACCEPT, "application/json");
        if let Some(cookie) = &self.session_cookie {
            request = request.header(COOKIE, cookie.clone());
        }

        let response = request.send().await.map_err(SessionError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SessionError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(SessionError::Transport)?;
        let identity = self.codec.decode(&body)?;
        Ok(identity)
    }
}
