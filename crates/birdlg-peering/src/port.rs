// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::net::Ipv4Addr;
use tokio::net::UdpSocket;

/// First port of the range derived from peer ASNs.
pub const PORT_BASE: u16 = 20000;

/// `20000 + asn mod 10000`, so AS4242421234 listens on 21234.
pub fn derive_port(asn: u32) -> u16 {
	// asn % 10_000 always fits in u16
	PORT_BASE + (asn % 10_000) as u16
}

/// Check that nothing on this host holds `port` by binding and releasing it.
///
/// The port is not reserved afterwards.
pub async fn probe_udp_port(port: u16) -> std::io::Result<()> {
	let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, port)).await?;
	drop(socket);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn dn42_asn_maps_to_last_four_digits() {
		assert_eq!(derive_port(4242421234), 21234);
		assert_eq!(derive_port(4242420000), 20000);
		assert_eq!(derive_port(64512), 24512);
	}

	#[tokio::test]
	async fn probe_fails_on_bound_port() {
		let held = std::net::UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).unwrap();
		let port = held.local_addr().unwrap().port();

		assert!(probe_udp_port(port).await.is_err());
		drop(held);
		assert!(probe_udp_port(port).await.is_ok());
	}

	proptest! {
		/// Derived ports stay inside 20000..30000.
		#[test]
		fn derived_port_in_range(asn in any::<u32>()) {
			let port = derive_port(asn);
			prop_assert!((20000..30000).contains(&port));
		}
	}
}
