// Wire types for the device bridge.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/device/auth`.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub host: &'a str,
    pub mac: &'a str,
    pub timeout: u64,
}

/// Successful auth reply: the token to present on every send.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Body of `POST /api/device/send`. `packet` is standard base64.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub host: &'a str,
    pub mac: &'a str,
    pub packet: String,
}

/// Acknowledgement returned for a transmitted packet.
#[derive(Debug, Deserialize)]
pub struct Ack {
    pub ok: bool,
    #[serde(default)]
    pub message: Option<String>,
}
