// Copyright 2026 U.S. Federal Government (in countries where recognized)
// SPDX-License-Identifier: Apache-2.0

//! Datagram transport used by the exchange, and the UDP implementation of it.

use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs, UdpSocket};
use std::time::Duration;

use log::debug;

use crate::config::ClientConfig;
use crate::error::{NtpError, ResolutionError};

/// A connected, message-oriented channel to one server.
///
/// Implementations release their underlying resources on drop, so an exchange
/// that fails part way never leaks a descriptor.
pub trait Transport {
    /// Send one datagram, returning the number of bytes written.
    fn send(&mut self, buf: &[u8]) -> io::Result<usize>;

    /// Wait up to `timeout` for one datagram.
    ///
    /// Returns `Ok(Some(n))` when `n` bytes were received into `buf`, and
    /// `Ok(None)` when the bound elapsed with nothing to read. A zero timeout
    /// polls without blocking.
    fn recv_within(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        (**self).send(buf)
    }

    fn recv_within(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>> {
        (**self).recv_within(buf, timeout)
    }
}

/// Select the appropriate bind address based on the target address family.
///
/// Returns `0.0.0.0:0` for IPv4 targets and `[::]:0` for IPv6 targets.
pub(crate) fn bind_addr_for(target: &SocketAddr) -> SocketAddr {
    match target {
        SocketAddr::V4(_) => SocketAddr::from(([0, 0, 0, 0], 0)),
        SocketAddr::V6(_) => SocketAddr::from(([0u16; 8], 0)),
    }
}

/// Order resolved addresses by family preference.
///
/// With `prefer_ipv4` the IPv4 addresses are kept when there are any;
/// otherwise every address is returned unchanged.
pub(crate) fn prefer_addresses(addrs: Vec<SocketAddr>, prefer_ipv4: bool) -> Vec<SocketAddr> {
    if !prefer_ipv4 {
        return addrs;
    }
    let v4: Vec<SocketAddr> = addrs.iter().filter(|a| a.is_ipv4()).copied().collect();
    if v4.is_empty() { addrs } else { v4 }
}

/// Split a server address into host and port, applying `default_port` when
/// the address carries none.
///
/// Accepts `host`, `host:port`, IPv4 and IPv6 literals, and `[v6]:port`.
pub(crate) fn split_host_port(server: &str, default_port: u16) -> (&str, u16) {
    if server.parse::<IpAddr>().is_ok() {
        return (server, default_port);
    }
    if let Some(rest) = server.strip_prefix('[') {
        if let Some((host, tail)) = rest.split_once(']') {
            let port = tail
                .strip_prefix(':')
                .and_then(|p| p.parse().ok())
                .unwrap_or(default_port);
            return (host, port);
        }
    }
    if let Some((host, port)) = server.rsplit_once(':') {
        if !host.contains(':') {
            if let Ok(port) = port.parse() {
                return (host, port);
            }
        }
    }
    (server, default_port)
}

/// Resolve a server address to the socket addresses to try, best first.
pub fn resolve(server: &str, config: &ClientConfig) -> Result<Vec<SocketAddr>, ResolutionError> {
    let (host, port) = split_host_port(server, config.port);
    let addrs: Vec<SocketAddr> = (host, port)
        .to_socket_addrs()
        .map_err(|source| ResolutionError::Lookup {
            address: server.to_string(),
            source,
        })?
        .collect();
    let addrs = prefer_addresses(addrs, config.prefer_ipv4);
    if addrs.is_empty() {
        return Err(ResolutionError::NoAddresses {
            address: server.to_string(),
        });
    }
    Ok(addrs)
}

/// A UDP socket connected to one NTP server.
#[derive(Debug)]
pub struct UdpTransport {
    sock: UdpSocket,
    peer: SocketAddr,
}

impl UdpTransport {
    /// Resolve `server`, bind an ephemeral local port of the same family, and
    /// connect to the first preferred address.
    pub fn connect(server: &str, config: &ClientConfig) -> Result<UdpTransport, NtpError> {
        let addrs = resolve(server, config)?;
        let peer = addrs[0];
        debug!("resolved {} to {}", server, peer);
        UdpTransport::connect_addr(peer).map_err(NtpError::Transport)
    }

    /// Bind an ephemeral local port and connect to `peer`.
    pub fn connect_addr(peer: SocketAddr) -> io::Result<UdpTransport> {
        let sock = UdpSocket::bind(bind_addr_for(&peer))?;
        sock.connect(peer)?;
        debug!("{:?} connected to {}", sock.local_addr(), peer);
        Ok(UdpTransport { sock, peer })
    }

    /// The server address this transport is connected to.
    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }
}

impl Transport for UdpTransport {
    fn send(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sock.send(buf)
    }

    fn recv_within(&mut self, buf: &mut [u8], timeout: Duration) -> io::Result<Option<usize>> {
        if timeout.is_zero() {
            self.sock.set_nonblocking(true)?;
            let res = self.sock.recv(buf);
            self.sock.set_nonblocking(false)?;
            return pending_as_none(res);
        }
        self.sock.set_read_timeout(Some(timeout))?;
        pending_as_none(self.sock.recv(buf))
    }
}

/// Map the "nothing arrived" error kinds of a timed receive to `None`.
fn pending_as_none(res: io::Result<usize>) -> io::Result<Option<usize>> {
    match res {
        Ok(n) => Ok(Some(n)),
        Err(e) if matches!(e.kind(), io::ErrorKind::WouldBlock | io::ErrorKind::TimedOut) => {
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_host_port() {
        assert_eq!(split_host_port("pool.ntp.org", 123), ("pool.ntp.org", 123));
        assert_eq!(split_host_port("pool.ntp.org:1123", 123), ("pool.ntp.org", 1123));
        assert_eq!(split_host_port("127.0.0.1", 123), ("127.0.0.1", 123));
        assert_eq!(split_host_port("127.0.0.1:9", 123), ("127.0.0.1", 9));
        assert_eq!(split_host_port("::1", 123), ("::1", 123));
        assert_eq!(split_host_port("[::1]", 123), ("::1", 123));
        assert_eq!(split_host_port("[::1]:4123", 123), ("::1", 4123));
    }

    #[test]
    fn test_prefer_addresses() {
        let v4: SocketAddr = "127.0.0.1:123".parse().unwrap();
        let v6: SocketAddr = "[::1]:123".parse().unwrap();
        assert_eq!(prefer_addresses(vec![v6, v4], true), vec![v4]);
        assert_eq!(prefer_addresses(vec![v6, v4], false), vec![v6, v4]);
        assert_eq!(prefer_addresses(vec![v6], true), vec![v6]);
    }

    #[test]
    fn test_bind_addr_matches_family() {
        let v4: SocketAddr = "192.0.2.1:123".parse().unwrap();
        let v6: SocketAddr = "[2001:db8::1]:123".parse().unwrap();
        assert!(bind_addr_for(&v4).is_ipv4());
        assert!(bind_addr_for(&v6).is_ipv6());
    }

    #[test]
    fn test_resolve_literal_applies_default_port() {
        let addrs = resolve("127.0.0.1", &ClientConfig::default()).unwrap();
        assert_eq!(addrs, vec!["127.0.0.1:123".parse::<SocketAddr>().unwrap()]);
    }

    #[test]
    fn test_resolve_failure_is_resolution_error() {
        let err = resolve("host.invalid", &ClientConfig::default()).unwrap_err();
        assert!(err.to_string().contains("host.invalid"));
    }

    #[test]
    fn test_recv_within_times_out() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let mut transport = UdpTransport::connect_addr(server.local_addr().unwrap()).unwrap();
        let mut buf = [0u8; 64];
        let got = transport
            .recv_within(&mut buf, Duration::from_millis(20))
            .unwrap();
        assert_eq!(got, None);
    }

    #[test]
    fn test_recv_within_zero_timeout_polls() {
        let server = UdpSocket::bind("127.0.0.1:0").unwrap();
        let mut transport = UdpTransport::connect_addr(server.local_addr().unwrap()).unwrap();
        let mut buf = [0u8; 64];
        assert_eq!(transport.recv_within(&mut buf, Duration::ZERO).unwrap(), None);
    }
}
