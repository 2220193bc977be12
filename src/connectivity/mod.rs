//! Connectivity gate
//!
//! Fast-fail check consulted before any network fetch is attempted, so the
//! engine can reject an operation without paying for a doomed request.
//! The check is synchronous, re-evaluated on every attempt (never cached),
//! and answers `false` conservatively when the status cannot be
//! determined.

use std::net::{SocketAddr, TcpStream};
use std::time::Duration;

/// Reports whether a network path is currently available.
pub trait ConnectivityGate: Send + Sync {
    /// Current reachability at call time. Side-effect-free from the
    /// caller's perspective; must not cache across calls.
    fn is_available(&self) -> bool;
}

/// Gate that probes a well-known endpoint with a short TCP connect.
///
/// The default probe targets a public DNS resolver on port 53, which is
/// reachable from virtually any network that has internet access. The
/// connect timeout bounds the worst-case cost of the pre-flight check.
#[derive(Debug, Clone)]
pub struct TcpProbeGate {
    probe_addr: SocketAddr,
    timeout: Duration,
}

impl TcpProbeGate {
    /// Create a gate probing the given address
    pub fn new(probe_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            probe_addr,
            timeout,
        }
    }

    /// The address this gate probes
    pub fn probe_addr(&self) -> SocketAddr {
        self.probe_addr
    }
}

impl Default for TcpProbeGate {
    fn default() -> Self {
        Self {
            probe_addr: SocketAddr::from(([1, 1, 1, 1], 53)),
            timeout: Duration::from_millis(500),
        }
    }
}

impl ConnectivityGate for TcpProbeGate {
    fn is_available(&self) -> bool {
        TcpStream::connect_timeout(&self.probe_addr, self.timeout).is_ok()
    }
}

/// Gate that always reports an available network.
///
/// Useful when connectivity is managed externally, and as the default in
/// tests that exercise the fetch path itself.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysOnline;

impl ConnectivityGate for AlwaysOnline {
    fn is_available(&self) -> bool {
        true
    }
}
