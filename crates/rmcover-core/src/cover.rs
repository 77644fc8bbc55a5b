// ── Cover controller ──
//
// One physical cover actuator. State is assumed, never observed: it moves
// only when a command sequence has been delivered. Closing is timed, since
// the device has no end-stop feedback.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use rmcover_api::DeviceTransport;

use crate::command::{CommandOutcome, CoverCommand};
use crate::config::{CoverConfig, RetryPolicy};
use crate::device::SharedDevice;
use crate::model::{CoverFeature, CoverState, DeviceClass, SUPPORTED_FEATURES};
use crate::retry::Retrier;

/// Open/close/stop surface for a single cover.
///
/// Operations take `&mut self` and run to completion, including the travel
/// wait in [`close`](Self::close). The device handle may be shared with
/// other covers on the same transmitter.
pub struct CoverController<T> {
    config: CoverConfig,
    retrier: Retrier<T>,
    state: CoverState,
    available: bool,
    last_changed: Option<DateTime<Utc>>,
}

impl<T: DeviceTransport> CoverController<T> {
    pub fn new(config: CoverConfig, device: SharedDevice<T>, policy: RetryPolicy) -> Self {
        Self {
            config,
            retrier: Retrier::new(device, policy),
            state: CoverState::Unknown,
            available: true,
            last_changed: None,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn object_id(&self) -> &str {
        &self.config.object_id
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &CoverConfig {
        &self.config
    }

    pub fn state(&self) -> CoverState {
        self.state
    }

    /// `None` while the position is unknown; see [`CoverState::is_closed`].
    pub fn is_closed(&self) -> Option<bool> {
        self.state.is_closed()
    }

    /// False after a command exhausted its retries, until one gets through.
    pub fn available(&self) -> bool {
        self.available
    }

    pub fn device_class(&self) -> DeviceClass {
        DeviceClass::Garage
    }

    pub fn supported_features(&self) -> &'static [CoverFeature] {
        &SUPPORTED_FEATURES
    }

    /// When the cached state last changed.
    pub fn last_changed(&self) -> Option<DateTime<Utc>> {
        self.last_changed
    }

    /// Seed a previously known state, e.g. one a host persisted across
    /// restarts. No command is sent.
    pub fn restore_state(&mut self, state: CoverState) {
        debug!(cover = %self.config.object_id, %state, "restoring state");
        self.set_state(state);
    }

    // ── Operations ───────────────────────────────────────────────────

    pub async fn execute(&mut self, command: CoverCommand) -> CommandOutcome {
        match command {
            CoverCommand::Open => self.open().await,
            CoverCommand::Close => self.close().await,
            CoverCommand::Stop => self.stop().await,
        }
    }

    /// Send the open command; the cover is assumed open once it is delivered.
    pub async fn open(&mut self) -> CommandOutcome {
        if !self.transmit(CoverCommand::Open).await {
            return CommandOutcome::Failed;
        }
        self.set_state(CoverState::Open);
        CommandOutcome::Sent
    }

    /// Run the timed close sequence: close, wait `trigger_time`, stop.
    ///
    /// Only runs from [`CoverState::Open`]. If the close packet does not get
    /// through, the travel wait and stop are skipped and state is left alone.
    /// A failed stop after a completed travel still leaves the cover Closed.
    pub async fn close(&mut self) -> CommandOutcome {
        if self.state != CoverState::Open {
            debug!(
                cover = %self.config.object_id,
                state = %self.state,
                "ignoring close: cover is not open"
            );
            return CommandOutcome::Skipped;
        }

        if !self.transmit(CoverCommand::Close).await {
            warn!(cover = %self.config.object_id, "close not delivered, aborting travel");
            return CommandOutcome::Failed;
        }

        debug!(
            cover = %self.config.object_id,
            secs = self.config.trigger_time.as_secs_f64(),
            "waiting for cover travel"
        );
        tokio::time::sleep(self.config.trigger_time).await;

        let stopped = self.transmit(CoverCommand::Stop).await;
        self.set_state(CoverState::Closed);

        if stopped {
            CommandOutcome::Sent
        } else {
            CommandOutcome::Failed
        }
    }

    /// Send the stop command. Cached state is not touched.
    pub async fn stop(&mut self) -> CommandOutcome {
        if self.transmit(CoverCommand::Stop).await {
            CommandOutcome::Sent
        } else {
            CommandOutcome::Failed
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    /// Deliver one command's packet and track availability.
    async fn transmit(&mut self, command: CoverCommand) -> bool {
        let packet = self.config.packet(command).cloned();

        match self.retrier.send(packet.as_ref()).await {
            Ok(()) => {
                if packet.is_some() && !self.available {
                    info!(cover = %self.config.object_id, "device reachable again");
                    self.available = true;
                }
                true
            }
            Err(e) => {
                error!(
                    cover = %self.config.object_id,
                    %command,
                    error = %e,
                    "command failed"
                );
                self.available = false;
                false
            }
        }
    }

    fn set_state(&mut self, state: CoverState) {
        if self.state != state {
            self.state = state;
            self.last_changed = Some(Utc::now());
        }
    }
}
