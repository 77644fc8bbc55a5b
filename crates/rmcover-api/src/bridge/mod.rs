// HTTP bridge adapter
//
// Talks to a device bridge that keeps the encrypted session with the
// transmitter. The bridge hands out a session token on auth; every send
// carries it. Session rollover on the device shows up as 401/504/422 here.

pub mod auth;
pub mod client;
pub mod models;

pub use client::BridgeClient;
