// Device transport abstraction
//
// The seam between cover logic and whatever actually talks to the
// transmitter. Session negotiation, payload encryption and framing all
// live behind this trait; callers only see "send these bytes" and
// "renew the session".

use std::future::Future;

use crate::error::Error;

/// Network identity of one physical transmitter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceAddress {
    /// IP address or hostname of the transmitter.
    pub host: String,
    /// Device identifier, lowercase colon-separated hex.
    pub mac: String,
}

/// A session-oriented link to one IR/RF transmitter.
///
/// Both methods take `&mut self`: a transport owns its session key and
/// replaces it on [`authenticate`](Self::authenticate). Sharing one
/// transport between several covers is done one level up, behind a mutex.
pub trait DeviceTransport: Send {
    /// Transmit one pre-recorded command packet.
    ///
    /// An expired session typically surfaces as [`Error::Timeout`] or
    /// [`Error::InvalidResponse`] rather than an explicit auth error.
    fn send_data(&mut self, packet: &[u8]) -> impl Future<Output = Result<(), Error>> + Send;

    /// Negotiate a fresh session key with the device.
    fn authenticate(&mut self) -> impl Future<Output = Result<(), Error>> + Send;
}
