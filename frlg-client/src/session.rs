use std::sync::Arc;
use std::time::Duration;

use frlg_core::data::{DataSnapshot, GameVersion};
use tokio::sync::watch;
use tokio::time::{interval, MissedTickBehavior};

use crate::host::HostSession;
use crate::layout::{FlagLayout, MemoryLayout};
use crate::reconciler::{PollOutcome, Reconciler};
use crate::rom::{read_auth, validate_rom, RomCheck};
use crate::transport::{MemoryTransport, TransportError};
use crate::{ClientError, Result};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(125);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    ValidatingRom,
    Authenticated(GameVersion),
    Polling(GameVersion),
}

/// Drives one emulator connection from ROM validation through polling.
pub struct Session<T, H> {
    transport: T,
    host: H,
    data: Arc<DataSnapshot>,
    state: ConnectionState,
    reconciler: Option<Reconciler>,
    last_diagnostic: Option<RomCheck>,
    poll_interval: Duration,
}

impl<T: MemoryTransport, H: HostSession> Session<T, H> {
    pub fn new(transport: T, host: H, data: Arc<DataSnapshot>) -> Self {
        Session {
            transport,
            host,
            data,
            state: ConnectionState::Disconnected,
            reconciler: None,
            last_diagnostic: None,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    pub fn reconciler(&self) -> Option<&Reconciler> {
        self.reconciler.as_ref()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    /// Advances the state machine by one transition or one poll.
    ///
    /// Transport failures drop the session state and fall back to ROM validation;
    /// only snapshot errors are returned.
    pub async fn step(&mut self) -> Result<()> {
        match self.advance().await {
            Err(ClientError::Transport(err)) => {
                log::debug!("Transport failure, revalidating ROM: {err}");
                self.reconciler = None;
                self.state = match err {
                    TransportError::Disconnected => ConnectionState::Disconnected,
                    TransportError::RequestFailed(_) => ConnectionState::ValidatingRom,
                };
                Ok(())
            }
            Err(ClientError::Host(err)) => {
                log::warn!("Host did not accept update, retrying next poll: {err}");
                Ok(())
            }
            other => other,
        }
    }

    async fn advance(&mut self) -> Result<()> {
        match self.state {
            ConnectionState::Disconnected => {
                self.reconciler = None;
                self.state = ConnectionState::ValidatingRom;
            }
            ConnectionState::ValidatingRom => {
                let check = validate_rom(&self.transport).await?;
                let RomCheck::Valid(version) = check else {
                    self.diagnose(check);
                    return Ok(());
                };
                let layout = MemoryLayout::for_version(&self.data, version)?;
                let auth = read_auth(&self.transport, &layout).await?;
                self.host.authenticate(auth).await?;
                log::info!("Connected to {version} ROM");
                self.last_diagnostic = None;
                self.state = ConnectionState::Authenticated(version);
            }
            ConnectionState::Authenticated(version) => {
                let layout = MemoryLayout::for_version(&self.data, version)?;
                let flags = FlagLayout::from_snapshot(&self.data)?;
                self.reconciler = Some(Reconciler::new(layout, flags));
                self.state = ConnectionState::Polling(version);
            }
            ConnectionState::Polling(_) => {
                let Some(reconciler) = self.reconciler.as_mut() else {
                    self.state = ConnectionState::ValidatingRom;
                    return Ok(());
                };
                match reconciler.poll(&self.transport, &self.host).await? {
                    PollOutcome::Abandoned => log::debug!("Poll abandoned: not in the overworld"),
                    PollOutcome::Skipped => {}
                    PollOutcome::Completed(report) if !report.sent.is_empty() => {
                        if let Ok(json) = serde_json::to_string(&report.sent) {
                            log::debug!("Sent {json}");
                        }
                    }
                    PollOutcome::Completed(_) => {}
                }
            }
        }
        Ok(())
    }

    fn diagnose(&mut self, check: RomCheck) {
        if self.last_diagnostic == Some(check) {
            return;
        }
        match check {
            RomCheck::Unpatched => log::error!(
                "You appear to be running an unpatched FireRed or LeafGreen ROM. \
                 Generate a patch file and use it to create a patched ROM."
            ),
            RomCheck::IncompatiblePatch => log::error!(
                "The patch used to create this ROM is not compatible with this client. \
                 Check the client version against the one used by the generator."
            ),
            RomCheck::NotThisGame | RomCheck::Unreadable | RomCheck::Valid(_) => {}
        }
        self.last_diagnostic = Some(check);
    }

    /// Steps on a fixed interval until `shutdown` turns true or its sender goes away.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        let mut ticker = interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        while !*shutdown.borrow() {
            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    continue;
                }
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                changed = shutdown.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                result = self.step() => result?,
            }
        }

        log::info!("Session stopped in state {:?}", self.state);
        Ok(())
    }
}
