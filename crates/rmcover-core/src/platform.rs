// ── Platform setup ──
//
// Builds every configured cover on top of one shared transmitter. The
// initial handshake is attempted once; a failure is logged and the covers
// are still created, since the retrier reauthenticates on first use.

use tracing::{error, info};

use rmcover_api::DeviceTransport;

use crate::config::{CoverConfig, DeviceConfig};
use crate::cover::CoverController;
use crate::device::SharedDevice;
use crate::error::CoreError;

/// One transmitter and the covers it drives.
pub struct Platform<T> {
    device: DeviceConfig,
    shared: SharedDevice<T>,
    covers: Vec<CoverController<T>>,
    connected: bool,
}

impl<T: DeviceTransport> Platform<T> {
    /// Connect to the transmitter and create a controller per cover.
    ///
    /// Covers keep their configured order. Connection failure is not fatal.
    pub async fn setup(device: DeviceConfig, transport: T, covers: Vec<CoverConfig>) -> Self {
        let shared = SharedDevice::new(transport);

        let connected = match shared.lock().await.authenticate().await {
            Ok(()) => {
                info!(host = %device.host, mac = %device.mac, "connected to device");
                true
            }
            Err(e) => {
                error!(host = %device.host, error = %e, "failed to connect to device");
                false
            }
        };

        let covers = covers
            .into_iter()
            .map(|config| CoverController::new(config, shared.clone(), device.retry))
            .collect();

        Self {
            device,
            shared,
            covers,
            connected,
        }
    }

    pub fn device_config(&self) -> &DeviceConfig {
        &self.device
    }

    /// Whether the initial handshake succeeded.
    pub fn connected(&self) -> bool {
        self.connected
    }

    pub fn device(&self) -> &SharedDevice<T> {
        &self.shared
    }

    pub fn covers(&self) -> &[CoverController<T>] {
        &self.covers
    }

    pub fn covers_mut(&mut self) -> &mut [CoverController<T>] {
        &mut self.covers
    }

    pub fn get(&self, object_id: &str) -> Option<&CoverController<T>> {
        self.covers.iter().find(|c| c.object_id() == object_id)
    }

    /// Mutable lookup that reports unknown covers as an error.
    pub fn cover_mut(&mut self, object_id: &str) -> Result<&mut CoverController<T>, CoreError> {
        self.covers
            .iter_mut()
            .find(|c| c.object_id() == object_id)
            .ok_or_else(|| CoreError::CoverNotFound {
                object_id: object_id.to_owned(),
            })
    }

    pub fn into_covers(self) -> Vec<CoverController<T>> {
        self.covers
    }
}
