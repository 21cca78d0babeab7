//! Point-to-point character transfer between two application instances.
//!
//! Two roles, one connection, one archive. The receiver binds a fixed port
//! and blocks for a single connection; the sender connects, streams the
//! archive blob in fixed-size chunks, and closes. There is no framing and no
//! acknowledgment: end-of-stream is end-of-archive. A connection dropped
//! mid-stream therefore looks like a short archive, and the receiver can only
//! detect it when unpacking fails.
//!
//! Both roles are blocking; cancellation is terminating the process.

use crate::core::error::CharbinderError;
use crate::core::store::Store;
use crate::plugins::{codec, roster};
use std::io::{Read, Write};
use std::net::{IpAddr, Shutdown, SocketAddr, TcpListener, TcpStream, ToSocketAddrs};

/// Fixed port shared by convention between sender and receiver.
pub const TRANSFER_PORT: u16 = 42420;
/// Chunk size for reading and writing the archive blob.
const CHUNK_SIZE: usize = 4096;

/// Outcome of a completed transfer, suitable for direct display.
#[derive(Debug)]
pub struct TransferReport {
    pub name: String,
    pub bytes: u64,
}

/// Sender role: pack the named record and stream it to `host`.
///
/// The record stays in the local store; a transfer is a copy, not a move.
pub fn send_character(
    store: &Store,
    name: &str,
    host: &str,
) -> Result<TransferReport, CharbinderError> {
    let addr = resolve_peer(host)?;
    send_character_to(store, name, addr)
}

/// Sender role against an explicit address instead of the fixed port.
pub fn send_character_to(
    store: &Store,
    name: &str,
    addr: SocketAddr,
) -> Result<TransferReport, CharbinderError> {
    let mut conn = TcpStream::connect(addr).map_err(|e| {
        CharbinderError::ConnectionFailed(format!("could not reach {}: {}", addr, e))
    })?;

    let blob = codec::pack_character(store, name)?;

    for chunk in blob.chunks(CHUNK_SIZE) {
        conn.write_all(chunk).map_err(|e| {
            CharbinderError::ConnectionFailed(format!("connection lost while sending: {}", e))
        })?;
    }
    // Closing the write half is the end-of-archive signal.
    conn.shutdown(Shutdown::Write)
        .map_err(CharbinderError::IoError)?;

    Ok(TransferReport {
        name: name.to_string(),
        bytes: blob.len() as u64,
    })
}

/// Receiver role: accept exactly one connection on the fixed port, rebuild
/// the record, and merge it into the local store.
///
/// A record whose name already exists locally is rejected and discarded; the
/// local store is left untouched.
pub fn receive_character(store: &Store) -> Result<TransferReport, CharbinderError> {
    let listener = TcpListener::bind(("0.0.0.0", TRANSFER_PORT)).map_err(|e| {
        CharbinderError::ConnectionFailed(format!(
            "could not listen on port {}: {}",
            TRANSFER_PORT, e
        ))
    })?;
    receive_character_on(store, listener)
}

/// Receiver role against a listener the caller already bound.
pub fn receive_character_on(
    store: &Store,
    listener: TcpListener,
) -> Result<TransferReport, CharbinderError> {
    let (mut conn, _peer) = listener
        .accept()
        .map_err(|e| CharbinderError::ConnectionFailed(format!("accept failed: {}", e)))?;
    // Only one transfer per invocation; the listener drops with this frame,
    // so no further connection is ever accepted.

    let mut blob = Vec::new();
    let mut buf = [0u8; CHUNK_SIZE];
    loop {
        match conn.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => blob.extend_from_slice(&buf[..n]),
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => {
                return Err(CharbinderError::ConnectionFailed(format!(
                    "connection lost while receiving: {}",
                    e
                )));
            }
        }
    }

    let (name, record) = codec::unpack_character(&blob)?;

    if roster::character_exists(store, &name)? {
        return Err(CharbinderError::DuplicateName(name));
    }
    roster::create_character(store, &record)?;

    Ok(TransferReport {
        name,
        bytes: blob.len() as u64,
    })
}

fn resolve_peer(host: &str) -> Result<SocketAddr, CharbinderError> {
    (host, TRANSFER_PORT)
        .to_socket_addrs()
        .map_err(|e| {
            CharbinderError::ConnectionFailed(format!("cannot resolve '{}': {}", host, e))
        })?
        .next()
        .ok_or_else(|| {
            CharbinderError::ConnectionFailed(format!("'{}' resolved to no address", host))
        })
}

/// Best-effort list of addresses the operator can read to the sender.
/// Enumeration failure is not an error; the transfer does not depend on it.
pub fn local_addresses() -> Vec<IpAddr> {
    // A UDP socket "connected" to a routable address reveals the preferred
    // local interface without sending anything.
    let mut addrs = Vec::new();
    if let Ok(sock) = std::net::UdpSocket::bind(("0.0.0.0", 0)) {
        if sock.connect(("192.0.2.1", 80)).is_ok() {
            if let Ok(local) = sock.local_addr() {
                addrs.push(local.ip());
            }
        }
    }
    addrs
}

pub fn schema() -> serde_json::Value {
    serde_json::json!({
        "name": "transfer",
        "version": "0.1.0",
        "description": "One-shot character handoff over TCP",
        "commands": [
            { "name": "send", "description": "Stream one character to a receiving instance" },
            { "name": "receive", "description": "Wait for one character from a sending instance" }
        ],
        "storage": []
    })
}
