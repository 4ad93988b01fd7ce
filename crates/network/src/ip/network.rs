/*
 * SPDX-FileCopyrightText: Copyright (c) 2026 NVIDIA CORPORATION & AFFILIATES. All rights reserved.
 * SPDX-License-Identifier: Apache-2.0
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 * http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */
use std::fmt::Display;
use std::net::{IpAddr, Ipv6Addr};
use std::str::FromStr;

// These are part of our public API because of the conversion traits.
pub use ipnet::{IpNet, Ipv4Net, Ipv6Net};
#[cfg(feature = "ipnetwork")]
use ipnetwork::{IpNetwork, Ipv4Network, Ipv6Network};
use serde::{Deserialize, Serialize};

use super::address_family::{IdentifyAddressFamily, IpAddressFamily};
use crate::errors::{AllocationError, CidrError};

//
// Type definitions
//

/// An address pool as written by an administrator: a base address and a
/// prefix length.
///
/// Parsing truncates any bits after the prefix, the same way CIDR notation is
/// usually read, so `10.99.97.5/24` names the `10.99.97.0/24` network. The
/// value is `Copy`; anything derived from it is a fresh address, never a view
/// into the caller's network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Network {
    V4(Ipv4Net),
    V6(Ipv6Net),
}

impl Network {
    /// The first address of the network (all host bits zero).
    pub fn base_addr(&self) -> IpAddr {
        match self {
            Network::V4(net) => IpAddr::V4(net.network()),
            Network::V6(net) => IpAddr::V6(net.network()),
        }
    }

    pub fn prefix_len(&self) -> u8 {
        match self {
            Network::V4(net) => net.prefix_len(),
            Network::V6(net) => net.prefix_len(),
        }
    }

    /// Number of address bits not fixed by the prefix.
    pub fn host_bits(&self) -> u8 {
        self.address_family().address_bits() - self.prefix_len()
    }

    /// Whether `addr` falls inside this network. Addresses of the other
    /// family are never contained.
    pub fn contains(&self, addr: &IpAddr) -> bool {
        match (self, addr) {
            (Network::V4(net), IpAddr::V4(addr)) => net.contains(addr),
            (Network::V6(net), IpAddr::V6(addr)) => net.contains(addr),
            _ => false,
        }
    }

    pub fn as_v4(&self) -> Option<Ipv4Net> {
        match self {
            Network::V4(net) => Some(*net),
            Network::V6(_) => None,
        }
    }

    pub fn as_v6(&self) -> Option<Ipv6Net> {
        match self {
            Network::V4(_) => None,
            Network::V6(net) => Some(*net),
        }
    }
}

//
// Functions
//

/// Link-local unicast, `fe80::/10`. IPv4-mapped addresses are classified by
/// their embedded IPv4 address (`169.254.0.0/16`).
pub fn is_link_local_unicast(addr: &Ipv6Addr) -> bool {
    if let Some(v4) = addr.to_ipv4_mapped() {
        return v4.is_link_local();
    }
    addr.segments()[0] & 0xffc0 == 0xfe80
}

/// Global unicast in the classic sense: any unicast address that is not
/// unspecified, loopback or link-local. Unique-local and documentation ranges
/// are included.
pub fn is_global_unicast(addr: &Ipv6Addr) -> bool {
    if let Some(v4) = addr.to_ipv4_mapped() {
        return !(v4.is_unspecified()
            || v4.is_broadcast()
            || v4.is_loopback()
            || v4.is_multicast()
            || v4.is_link_local());
    }
    !(addr.is_unspecified()
        || addr.is_loopback()
        || addr.is_multicast()
        || is_link_local_unicast(addr))
}

//
// Trait implementations
//

impl IdentifyAddressFamily for Network {
    fn address_family(&self) -> IpAddressFamily {
        match self {
            Network::V4(_) => IpAddressFamily::Ipv4,
            Network::V6(_) => IpAddressFamily::Ipv6,
        }
    }
}

impl Display for Network {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Network::V4(net) => net.fmt(f),
            Network::V6(net) => net.fmt(f),
        }
    }
}

impl FromStr for Network {
    type Err = AllocationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IpNet::from_str(s.trim())
            .map(Network::from)
            .map_err(|e| AllocationError::invalid_cidr(s, CidrError::from(e)))
    }
}

impl TryFrom<String> for Network {
    type Error = AllocationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Network::from_str(&value)
    }
}

impl From<Network> for String {
    fn from(value: Network) -> Self {
        value.to_string()
    }
}

impl From<IpNet> for Network {
    fn from(value: IpNet) -> Self {
        match value {
            IpNet::V4(net) => Network::from(net),
            IpNet::V6(net) => Network::from(net),
        }
    }
}

impl From<Ipv4Net> for Network {
    fn from(value: Ipv4Net) -> Self {
        Network::V4(value.trunc())
    }
}

impl From<Ipv6Net> for Network {
    fn from(value: Ipv6Net) -> Self {
        Network::V6(value.trunc())
    }
}

impl From<Network> for IpNet {
    fn from(value: Network) -> Self {
        match value {
            Network::V4(net) => IpNet::V4(net),
            Network::V6(net) => IpNet::V6(net),
        }
    }
}

#[cfg(feature = "ipnetwork")]
impl From<Network> for IpNetwork {
    fn from(value: Network) -> Self {
        // ipnet already validated the prefix length, so if ipnetwork rejects
        // it something has gone very wrong and we should just panic.
        match value {
            Network::V4(net) => IpNetwork::V4(
                Ipv4Network::new(net.network(), net.prefix_len()).expect(
                    "Ipv4Network::new() returned an unexpected Err (this shouldn't happen, please file a bug)",
                ),
            ),
            Network::V6(net) => IpNetwork::V6(
                Ipv6Network::new(net.network(), net.prefix_len()).expect(
                    "Ipv6Network::new() returned an unexpected Err (this shouldn't happen, please file a bug)",
                ),
            ),
        }
    }
}

#[cfg(feature = "ipnetwork")]
impl TryFrom<IpNetwork> for Network {
    type Error = AllocationError;

    fn try_from(value: IpNetwork) -> Result<Self, Self::Error> {
        IpNet::new(value.ip(), value.prefix())
            .map(Network::from)
            .map_err(|_| {
                AllocationError::invalid_cidr(
                    value.to_string(),
                    CidrError::WrongAddressFamily(value.address_family()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    #[test]
    fn test_parse_truncates_host_bits() {
        let network = Network::from_str("10.99.97.5/24").expect("Couldn't parse IPv4 pool");
        assert_eq!(network.to_string(), "10.99.97.0/24");
        assert_eq!(network.base_addr(), IpAddr::V4(Ipv4Addr::new(10, 99, 97, 0)));
        assert_eq!(network.host_bits(), 8);

        let network = Network::from_str("fd00::10:97:1/112").expect("Couldn't parse IPv6 pool");
        assert_eq!(network.to_string(), "fd00::10:97:0/112");
        assert_eq!(network.host_bits(), 16);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "10.99.97.0", "10.99.97.0/33", "fd00::/129", "not-a-network"] {
            let err = Network::from_str(bad).expect_err("Unexpectedly parsed a bad pool");
            assert!(
                matches!(
                    err,
                    AllocationError::InvalidCidr {
                        reason: CidrError::ParseError(_),
                        ..
                    }
                ),
                "unexpected error for {bad:?}: {err}"
            );
        }
    }

    #[test]
    fn test_contains() {
        let network = Network::from_str("10.0.0.0/8").unwrap();
        assert!(network.contains(&IpAddr::from_str("10.255.255.255").unwrap()));
        assert!(!network.contains(&IpAddr::from_str("11.0.0.0").unwrap()));
        assert!(!network.contains(&IpAddr::from_str("2001:db8::1").unwrap()));
    }

    #[test]
    fn test_address_family() {
        let v4 = Network::from_str("10.0.0.0/8").unwrap();
        assert!(v4.is_address_family(IpAddressFamily::Ipv4));
        assert_eq!(v4.as_v6(), None);

        let v6 = Network::from_str("2001:db8::/32").unwrap();
        assert_eq!(
            v6.require_address_family_or_else(IpAddressFamily::Ipv4, |n| n.prefix_len()),
            Err(32)
        );
    }

    #[test]
    fn test_serde_as_cidr_string() {
        let network = Network::from_str("fe80::/64").unwrap();
        let json = serde_json::to_string(&network).unwrap();
        assert_eq!(json, "\"fe80::/64\"");
        let back: Network = serde_json::from_str(&json).unwrap();
        assert_eq!(back, network);

        serde_json::from_str::<Network>("\"fe80::/200\"")
            .expect_err("Unexpectedly deserialized an invalid pool");
    }

    #[test]
    fn test_unicast_classification() {
        let global = Ipv6Addr::from_str("2001:db8::1").unwrap();
        let unique_local = Ipv6Addr::from_str("fd00::10:97:2").unwrap();
        let link_local = Ipv6Addr::from_str("fe80::100").unwrap();
        assert!(is_global_unicast(&global));
        assert!(is_global_unicast(&unique_local));
        assert!(!is_global_unicast(&link_local));
        assert!(is_link_local_unicast(&link_local));

        for not_unicast in ["::", "::1", "ff02::1"] {
            let addr = Ipv6Addr::from_str(not_unicast).unwrap();
            assert!(!is_global_unicast(&addr), "{addr} is not global unicast");
            assert!(!is_link_local_unicast(&addr), "{addr} is not link-local");
        }

        let mapped_loopback = Ipv6Addr::from_str("::ffff:127.0.0.1").unwrap();
        assert!(!is_global_unicast(&mapped_loopback));
    }

    #[test]
    fn test_ipnet_conversion() {
        let ipnet = IpNet::from_str("fd00::10:97:1/112").unwrap();
        let network = Network::from(ipnet);
        assert_eq!(network.to_string(), "fd00::10:97:0/112");
        assert_eq!(IpNet::from(network), ipnet.trunc());
        assert_eq!(network.as_v4(), None);
    }

    #[cfg(feature = "ipnetwork")]
    #[test]
    fn test_ipnetwork_conversion() {
        let network = Network::from_str("10.99.97.0/24").unwrap();
        let ipnetwork = IpNetwork::from(network);
        assert_eq!(ipnetwork.to_string(), "10.99.97.0/24");
        assert_eq!(Network::try_from(ipnetwork).unwrap(), network);
    }
}
