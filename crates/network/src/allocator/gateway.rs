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
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

use ipnet::{Ipv4Net, Ipv6Net};
use serde::Serialize;

use crate::errors::{AllocationError, AllocationResult, CidrError};
use crate::ip::network::Network;

/// A parsed pool together with the address it advertises as default router.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PoolGateway {
    pub network: Network,
    pub gateway: IpAddr,
}

/// Parse `cidr` and work out its gateway: the base address with the lowest
/// bit of its final byte set. The gateway occupies host slot 1
/// ([`super::ClientId::GATEWAY`]) and is never handed to a client.
///
/// Fails with [`AllocationError::InvalidCidr`] if `cidr` doesn't parse, or if
/// the prefix leaves no room for hosts (a /32 or a /128).
pub fn calc_default_gateway(cidr: &str) -> AllocationResult<PoolGateway> {
    let network = Network::from_str(cidr)?;
    if network.host_bits() == 0 {
        return Err(AllocationError::invalid_cidr(cidr, CidrError::NoHostBits));
    }

    Ok(PoolGateway {
        network,
        gateway: gateway_addr(&network),
    })
}

/// Gateway address of an already-parsed network. Unlike
/// [`calc_default_gateway`] this doesn't check for host bits.
pub fn gateway_addr(network: &Network) -> IpAddr {
    match network {
        Network::V4(net) => IpAddr::V4(gateway_v4(net)),
        Network::V6(net) => IpAddr::V6(gateway_v6(net)),
    }
}

pub(crate) fn gateway_v4(network: &Ipv4Net) -> Ipv4Addr {
    let mut octets = network.network().octets();
    octets[3] |= 1;
    Ipv4Addr::from(octets)
}

pub(crate) fn gateway_v6(network: &Ipv6Net) -> Ipv6Addr {
    let mut octets = network.network().octets();
    octets[15] |= 1;
    Ipv6Addr::from(octets)
}
