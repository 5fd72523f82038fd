//! The datagram link to the external hardware.
//!
//! Outbound requests are fire-and-forget: the host's event handler must
//! not wait for the radio, so a full socket buffer drops the datagram with
//! a warning instead of blocking. Inbound traffic is drained one datagram
//! per [`HardwareLink::poll`] call, so receptions interleave with the
//! host's own events in simulation order. Only a hard socket failure is
//! fatal.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;
use tracing::{trace, warn};

use crate::protocol::header::DataIndicationHeader;

use super::socket::HardwareSocket;
use super::translate::{indication_meta, request_header};
use super::types::{BtpDataIndication, BtpDataRequest};

/// Largest datagram the hardware is expected to send.
const MAX_DATAGRAM: usize = 4096;

/// Hard failures of the hardware link.
#[derive(Debug, Error)]
pub enum LinkError {
    /// The socket failed in a way that is not a benign would-block.
    #[error("hardware socket failed")]
    Io(#[from] io::Error),
}

/// Bidirectional UDP link carrying Cohda-framed traffic.
#[derive(Debug)]
pub struct HardwareLink {
    socket: HardwareSocket,
    recv_buf: Box<[u8; MAX_DATAGRAM]>,
}

impl HardwareLink {
    /// Open the link between `local` and the hardware at `remote`.
    pub fn connect(local: SocketAddr, remote: SocketAddr) -> Result<Self, LinkError> {
        Ok(Self {
            socket: HardwareSocket::open(local, remote)?,
            recv_buf: Box::new([0; MAX_DATAGRAM]),
        })
    }

    /// Send one outbound request as a single header-plus-payload datagram.
    ///
    /// A full send buffer drops the datagram with a warning; the caller
    /// observes no difference from a radio-side loss.
    pub fn send_request(&self, request: &BtpDataRequest) -> Result<(), LinkError> {
        let header = request_header(request);
        let mut datagram = header.serialize();
        datagram.extend_from_slice(&request.payload);

        match self.socket.send(&datagram) {
            Ok(sent) => {
                trace!(bytes = sent, port = request.destination_port, "request sent");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => {
                warn!(
                    bytes = datagram.len(),
                    "send buffer full, outbound request dropped"
                );
                Ok(())
            }
            Err(e) => Err(LinkError::Io(e)),
        }
    }

    /// Receive at most one inbound indication.
    ///
    /// Returns `Ok(None)` when no datagram is pending or when the pending
    /// datagram was malformed (logged and skipped). Deserialization sees
    /// exactly the header-sized prefix; the rest of the datagram is the
    /// payload, truncated to the header's declared length when the two
    /// disagree.
    pub fn poll(&mut self) -> Result<Option<BtpDataIndication>, LinkError> {
        let len = match self.socket.recv(&mut self.recv_buf[..]) {
            Ok(len) => len,
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => return Ok(None),
            Err(e) => return Err(LinkError::Io(e)),
        };

        if len < DataIndicationHeader::SIZE {
            warn!(bytes = len, "short datagram, skipped");
            return Ok(None);
        }

        let header =
            match DataIndicationHeader::deserialize(&self.recv_buf[..DataIndicationHeader::SIZE]) {
                Ok(header) => header,
                Err(e) => {
                    warn!(error = %e, "malformed indication header, skipped");
                    return Ok(None);
                }
            };

        let mut payload = &self.recv_buf[DataIndicationHeader::SIZE..len];
        let declared = usize::from(header.data_length);
        if payload.len() != declared {
            warn!(
                declared,
                got = payload.len(),
                "payload length disagrees with header"
            );
            payload = &payload[..payload.len().min(declared)];
        }

        let mut indication = indication_meta(&header);
        indication.payload = bytes::Bytes::copy_from_slice(payload);
        trace!(
            port = indication.destination_port,
            bytes = indication.payload.len(),
            "indication received"
        );
        Ok(Some(indication))
    }

    /// Local address of the link's socket.
    pub fn local_addr(&self) -> Result<SocketAddr, LinkError> {
        Ok(self.socket.local_addr()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::net::UdpSocket;

    fn local() -> SocketAddr {
        "127.0.0.1:0".parse().unwrap()
    }

    #[test]
    fn request_reaches_the_wire_framed() {
        let hardware = UdpSocket::bind(local()).unwrap();
        let link = HardwareLink::connect(local(), hardware.local_addr().unwrap()).unwrap();

        let request = BtpDataRequest {
            destination_port: 2001,
            payload: Bytes::from_static(b"cam-bytes"),
            ..BtpDataRequest::default()
        };
        link.send_request(&request).unwrap();

        let mut buf = [0u8; 256];
        let (n, _) = hardware.recv_from(&mut buf).unwrap();
        assert_eq!(n, crate::protocol::REQUEST_HEADER_SIZE + 9);
        assert_eq!(&buf[crate::protocol::REQUEST_HEADER_SIZE..n], b"cam-bytes");
        // declared payload length sits in the header's last two bytes
        assert_eq!(&buf[38..40], &[0, 9]);
    }

    #[test]
    fn poll_returns_one_indication_then_none() {
        let hardware = UdpSocket::bind(local()).unwrap();
        let mut link = HardwareLink::connect(local(), hardware.local_addr().unwrap()).unwrap();

        let mut header = DataIndicationHeader::default();
        header.packet_transport = crate::protocol::header::packet_transport::SINGLE_HOP_BROADCAST;
        header.security_its_aid = crate::protocol::header::its_aid::CAM;
        header.data_length = 4;
        let mut datagram = header.serialize();
        datagram.extend_from_slice(&[1, 2, 3, 4]);
        hardware
            .send_to(&datagram, link.local_addr().unwrap())
            .unwrap();

        // the datagram may not be queued instantly on loopback
        let mut indication = None;
        for _ in 0..100 {
            if let Some(found) = link.poll().unwrap() {
                indication = Some(found);
                break;
            }
            std::thread::sleep(std::time::Duration::from_millis(1));
        }
        let indication = indication.expect("indication delivered");
        assert_eq!(indication.its_aid, crate::protocol::header::its_aid::CAM);
        assert_eq!(indication.payload.as_ref(), &[1, 2, 3, 4]);

        assert!(link.poll().unwrap().is_none());
    }

    #[test]
    fn short_datagram_is_skipped() {
        let hardware = UdpSocket::bind(local()).unwrap();
        let mut link = HardwareLink::connect(local(), hardware.local_addr().unwrap()).unwrap();

        hardware
            .send_to(&[0u8; 10], link.local_addr().unwrap())
            .unwrap();
        std::thread::sleep(std::time::Duration::from_millis(20));
        assert!(link.poll().unwrap().is_none());
    }
}
