// Bridge session authentication
//
// The bridge performs the device handshake and returns an opaque token.
// A successful login replaces any previous token; a rejected one clears
// it so stale sessions are never reused.

use reqwest::StatusCode;
use tracing::debug;

use crate::bridge::client::BridgeClient;
use crate::bridge::models::{AuthRequest, AuthResponse};
use crate::error::Error;

impl BridgeClient {
    /// Negotiate a new session with the transmitter via the bridge.
    ///
    /// `401`/`403` are reported as [`Error::Authentication`]; timeouts and
    /// unparseable replies keep their usual mapping.
    pub async fn login(&mut self) -> Result<(), Error> {
        let url = self.api_url("device/auth")?;
        debug!(%url, host = %self.device().host, "authenticating");

        let body = AuthRequest {
            host: &self.device().host,
            mac: &self.device().mac,
            timeout: self.timeout_secs(),
        };

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_request_error(e));

        let resp = match resp {
            Ok(resp) => resp,
            Err(e) => {
                self.token = None;
                return Err(e);
            }
        };

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            self.token = None;
            let message = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("device refused handshake (HTTP {status}): {message}"),
            });
        }

        match self.parse_response::<AuthResponse>(resp).await {
            Ok(auth) => {
                self.token = Some(auth.token);
                debug!("authentication successful");
                Ok(())
            }
            Err(e) => {
                self.token = None;
                Err(e)
            }
        }
    }

    /// Drop the current session token.
    pub fn clear_session(&mut self) {
        self.token = None;
    }
}
