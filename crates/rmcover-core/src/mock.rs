// Scripted transport for unit tests.
//
// Replies are queued per call kind; once a queue drains the fallback
// reply is used. Every call is recorded with its (tokio) timestamp so
// tests can check ordering and elapsed travel time under paused time.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::time::Instant;

use rmcover_api::{DeviceTransport, Error};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reply {
    Ok,
    Timeout,
    Invalid,
    Refused,
    ServerError,
}

impl Reply {
    fn into_result(self) -> Result<(), Error> {
        match self {
            Self::Ok => Ok(()),
            Self::Timeout => Err(Error::Timeout { timeout_secs: 10 }),
            Self::Invalid => Err(Error::InvalidResponse {
                message: "scripted".into(),
            }),
            Self::Refused => Err(Error::Authentication {
                message: "scripted".into(),
            }),
            Self::ServerError => Err(Error::Bridge {
                status: 500,
                message: "scripted".into(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Send(Vec<u8>),
    Auth,
}

#[derive(Debug)]
struct Script {
    sends: VecDeque<Reply>,
    auths: VecDeque<Reply>,
    send_fallback: Reply,
    auth_fallback: Reply,
    calls: Vec<(Call, Instant)>,
}

pub(crate) struct MockTransport {
    script: Arc<Mutex<Script>>,
}

/// Test-side view of a [`MockTransport`] that has been moved into a device.
#[derive(Clone)]
pub(crate) struct MockHandle {
    script: Arc<Mutex<Script>>,
}

pub(crate) fn mock() -> (MockTransport, MockHandle) {
    let script = Arc::new(Mutex::new(Script {
        sends: VecDeque::new(),
        auths: VecDeque::new(),
        send_fallback: Reply::Ok,
        auth_fallback: Reply::Ok,
        calls: Vec::new(),
    }));
    (
        MockTransport {
            script: Arc::clone(&script),
        },
        MockHandle { script },
    )
}

fn lock(script: &Mutex<Script>) -> MutexGuard<'_, Script> {
    script.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockHandle {
    pub(crate) fn queue_sends(&self, replies: &[Reply]) -> &Self {
        lock(&self.script).sends.extend(replies.iter().copied());
        self
    }

    pub(crate) fn queue_auths(&self, replies: &[Reply]) -> &Self {
        lock(&self.script).auths.extend(replies.iter().copied());
        self
    }

    pub(crate) fn always_send(&self, reply: Reply) -> &Self {
        lock(&self.script).send_fallback = reply;
        self
    }

    pub(crate) fn always_auth(&self, reply: Reply) -> &Self {
        lock(&self.script).auth_fallback = reply;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        lock(&self.script).calls.iter().map(|(c, _)| c.clone()).collect()
    }

    pub(crate) fn timed_calls(&self) -> Vec<(Call, Instant)> {
        lock(&self.script).calls.clone()
    }

    pub(crate) fn send_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Send(_)))
            .count()
    }

    pub(crate) fn auth_count(&self) -> usize {
        self.calls().iter().filter(|c| **c == Call::Auth).count()
    }

    pub(crate) fn clear_calls(&self) {
        lock(&self.script).calls.clear();
    }
}

impl DeviceTransport for MockTransport {
    async fn send_data(&mut self, packet: &[u8]) -> Result<(), Error> {
        let mut script = lock(&self.script);
        script.calls.push((Call::Send(packet.to_vec()), Instant::now()));
        let reply = script.sends.pop_front().unwrap_or(script.send_fallback);
        reply.into_result()
    }

    async fn authenticate(&mut self) -> Result<(), Error> {
        let mut script = lock(&self.script);
        script.calls.push((Call::Auth, Instant::now()));
        let reply = script.auths.pop_front().unwrap_or(script.auth_fallback);
        reply.into_result()
    }
}
