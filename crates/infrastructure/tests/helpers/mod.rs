#![allow(dead_code)]
mod dns_server_mock;
mod scripted;
pub mod wire;

pub use dns_server_mock::{MockDnsServer, Responder};
pub use scripted::{RecordingCache, ScriptedTransport};
