// ── Shared device handle ──
//
// Several covers can hang off one transmitter. The transport behind them
// is not safe for interleaved use, so every call goes through one async
// mutex per physical device.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use rmcover_api::DeviceTransport;

/// Cheaply cloneable handle to one transmitter's transport.
///
/// The lock is held for a single send or handshake, never across a cover's
/// travel wait, so covers on the same hub can interleave their sequences.
pub struct SharedDevice<T> {
    inner: Arc<Mutex<T>>,
}

impl<T> Clone for SharedDevice<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: DeviceTransport> SharedDevice<T> {
    pub fn new(transport: T) -> Self {
        Self {
            inner: Arc::new(Mutex::new(transport)),
        }
    }

    /// Exclusive access to the transport for one call.
    pub async fn lock(&self) -> MutexGuard<'_, T> {
        self.inner.lock().await
    }
}
