// Bridge HTTP client
//
// Wraps `reqwest::Client` with bridge URL construction, session token
// handling, and status-to-error mapping. The auth handshake lives in
// `auth.rs`; this module keeps the transport mechanics and the
// `DeviceTransport` impl.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::bridge::models::{Ack, SendRequest};
use crate::device::{DeviceAddress, DeviceTransport};
use crate::error::Error;
use crate::transport::TransportConfig;

pub(crate) const SESSION_HEADER: &str = "X-Session-Token";

/// HTTP client for a device bridge fronting one transmitter.
///
/// Holds the session token negotiated by [`login`](Self::login). Without a
/// token every send fails with [`Error::SessionExpired`], which the retry
/// layer answers with a fresh login.
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: Url,
    device: DeviceAddress,
    timeout_secs: u64,
    pub(crate) token: Option<String>,
}

impl BridgeClient {
    /// Create a bridge client from a `TransportConfig`.
    ///
    /// `base_url` is the bridge root (e.g. `http://127.0.0.1:8780`).
    pub fn new(
        base_url: Url,
        device: DeviceAddress,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            device,
            timeout_secs: transport.timeout_secs(),
            token: None,
        })
    }

    /// Create a bridge client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        device: DeviceAddress,
        timeout_secs: u64,
    ) -> Self {
        Self {
            http,
            base_url,
            device,
            timeout_secs,
            token: None,
        }
    }

    /// The transmitter this client is bound to.
    pub fn device(&self) -> &DeviceAddress {
        &self.device
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    pub fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Whether a session token is currently held.
    pub fn has_session(&self) -> bool {
        self.token.is_some()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/api/{path}`, tolerating a trailing slash on the base.
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!("{}/api/{}", self.base_url.as_str().trim_end_matches('/'), path);
        Url::parse(&full).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Transmit one packet over the current session.
    pub async fn transmit(&self, packet: &[u8]) -> Result<(), Error> {
        let token = self.token.as_deref().ok_or(Error::SessionExpired)?;
        let url = self.api_url("device/send")?;

        debug!(%url, bytes = packet.len(), "POST packet");

        let body = SendRequest {
            host: &self.device.host,
            mac: &self.device.mac,
            packet: STANDARD.encode(packet),
        };

        let resp = self
            .http
            .post(url)
            .header(SESSION_HEADER, token)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let ack: Ack = self.parse_response(resp).await?;
        if ack.ok {
            Ok(())
        } else {
            Err(Error::InvalidResponse {
                message: ack
                    .message
                    .unwrap_or_else(|| "device rejected packet".into()),
            })
        }
    }

    /// Collapse reqwest timeouts into [`Error::Timeout`] so they carry the
    /// configured value; everything else stays a transport error.
    pub(crate) fn map_request_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            Error::Transport(err)
        }
    }

    /// Map the bridge status code and decode the JSON body.
    pub(crate) async fn parse_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();
        let body = resp.text().await.map_err(|e| self.map_request_error(e))?;

        match status {
            StatusCode::UNAUTHORIZED => return Err(Error::SessionExpired),
            StatusCode::GATEWAY_TIMEOUT => {
                return Err(Error::Timeout {
                    timeout_secs: self.timeout_secs,
                });
            }
            StatusCode::UNPROCESSABLE_ENTITY => {
                return Err(Error::InvalidResponse { message: body });
            }
            s if !s.is_success() => {
                return Err(Error::Bridge {
                    status: s.as_u16(),
                    message: body,
                });
            }
            _ => {}
        }

        serde_json::from_str(&body).map_err(|e| Error::InvalidResponse {
            message: format!("{e}: {body}"),
        })
    }
}

impl DeviceTransport for BridgeClient {
    async fn send_data(&mut self, packet: &[u8]) -> Result<(), Error> {
        self.transmit(packet).await
    }

    async fn authenticate(&mut self) -> Result<(), Error> {
        self.login().await
    }
}
