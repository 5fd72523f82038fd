//! Non-blocking UDP endpoint toward the hardware.

use std::io;
use std::net::{SocketAddr, UdpSocket};
use std::sync::Arc;

/// A UDP socket bound locally and connected to the hardware's address.
///
/// The socket is non-blocking from the start: the event-driven host must
/// never stall inside a send or receive, so `WouldBlock` is an expected
/// outcome on both paths and is handled by the link layer above.
#[derive(Debug, Clone)]
pub struct HardwareSocket {
    socket: Arc<UdpSocket>,
}

impl HardwareSocket {
    /// Bind to `local` and connect to the hardware at `remote`.
    pub fn open(local: SocketAddr, remote: SocketAddr) -> io::Result<Self> {
        let socket = UdpSocket::bind(local)?;
        socket.connect(remote)?;
        socket.set_nonblocking(true)?;
        Ok(Self {
            socket: Arc::new(socket),
        })
    }

    /// Send one datagram to the connected peer.
    pub fn send(&self, buf: &[u8]) -> io::Result<usize> {
        self.socket.send(buf)
    }

    /// Receive one datagram from the connected peer.
    pub fn recv(&self, buf: &mut [u8]) -> io::Result<usize> {
        self.socket.recv(buf)
    }

    /// Local address of this endpoint.
    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.socket.local_addr()
    }
}
