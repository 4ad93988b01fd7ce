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
use std::net::{Ipv4Addr, Ipv6Addr};

use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use serde::{Deserialize, Serialize};

use super::client_id::ClientId;
use super::gateway::{calc_default_gateway, gateway_v4, gateway_v6};
use super::generator::{AllocatedAddress, generate_ip_addr};
use super::host_limit::hosts_max_v4;
use crate::errors::{AllocationError, AllocationResult, CidrError};
use crate::ip::address_family::{IdentifyAddressFamily, IpAddressFamily};
use crate::ip::network::Network;

const DEFAULT_IPV4_CIDR: &str = "10.99.97.0/24";
const DEFAULT_IPV6_CIDR: &str = "fd00::10:97:0/112";

/// Pool settings as the configuration store hands them over. Nothing here is
/// validated until it is turned into an [`AddressPool`]. An empty CIDR string
/// disables that family.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PoolConfig {
    #[serde(default = "Defaults::ipv4_cidr")]
    pub ipv4_cidr: Option<String>,
    #[serde(default = "Defaults::ipv6_cidr")]
    pub ipv6_cidr: Option<String>,
    #[serde(default = "Defaults::next_id")]
    pub next_id: ClientId,
}

pub struct Defaults;

impl Defaults {
    pub fn ipv4_cidr() -> Option<String> {
        Some(DEFAULT_IPV4_CIDR.to_string())
    }
    pub fn ipv6_cidr() -> Option<String> {
        Some(DEFAULT_IPV6_CIDR.to_string())
    }
    pub fn next_id() -> ClientId {
        ClientId::FIRST_ALLOCATABLE
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            ipv4_cidr: Defaults::ipv4_cidr(),
            ipv6_cidr: Defaults::ipv6_cidr(),
            next_id: Defaults::next_id(),
        }
    }
}

/// Validated pools, at most one per address family and at least one overall.
/// Every configured pool has room for at least one host.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct AddressPool {
    ipv4: Option<Ipv4Net>,
    ipv6: Option<Ipv6Net>,
}

/// Default routers to advertise to clients of a pool.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Gateways {
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

/// One client's addresses, each carrying its pool's prefix length so it can
/// go straight into an interface `Address =` line (`10.99.97.2/24`).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct Allocation {
    pub id: ClientId,
    pub ipv4: Option<Ipv4Net>,
    pub ipv6: Option<Ipv6Net>,
}

impl Allocation {
    pub fn host_addresses(&self) -> AllocatedAddress {
        AllocatedAddress {
            ipv4: self.ipv4.map(|net| net.addr()),
            ipv6: self.ipv6.map(|net| net.addr()),
        }
    }

    pub fn interface_addresses(&self) -> Vec<IpNet> {
        self.ipv4
            .map(IpNet::V4)
            .into_iter()
            .chain(self.ipv6.map(IpNet::V6))
            .collect()
    }
}

impl AddressPool {
    pub fn new(ipv4: Option<Ipv4Net>, ipv6: Option<Ipv6Net>) -> AllocationResult<Self> {
        let ipv4 = ipv4.map(|net| require_hosts(Network::from(net))).transpose()?;
        let ipv6 = ipv6.map(|net| require_hosts(Network::from(net))).transpose()?;
        if ipv4.is_none() && ipv6.is_none() {
            return Err(AllocationError::invalid_cidr("", CidrError::NoPool));
        }

        Ok(Self {
            ipv4: ipv4.and_then(|n| n.as_v4()),
            ipv6: ipv6.and_then(|n| n.as_v6()),
        })
    }

    pub fn from_config(config: &PoolConfig) -> AllocationResult<Self> {
        let ipv4 = parse_pool(config.ipv4_cidr.as_deref(), IpAddressFamily::Ipv4)?;
        let ipv6 = parse_pool(config.ipv6_cidr.as_deref(), IpAddressFamily::Ipv6)?;
        let pool = Self::new(
            ipv4.and_then(|n| n.as_v4()),
            ipv6.and_then(|n| n.as_v6()),
        )?;
        tracing::debug!(%pool, "Loaded address pool");
        Ok(pool)
    }

    pub fn ipv4(&self) -> Option<Ipv4Net> {
        self.ipv4
    }

    pub fn ipv6(&self) -> Option<Ipv6Net> {
        self.ipv6
    }

    pub fn gateways(&self) -> Gateways {
        Gateways {
            ipv4: self.ipv4.as_ref().map(gateway_v4),
            ipv6: self.ipv6.as_ref().map(gateway_v6),
        }
    }

    /// Usable IPv4 host count, when an IPv4 pool is configured.
    pub fn capacity(&self) -> Option<u32> {
        self.ipv4.as_ref().map(hosts_max_v4)
    }

    pub fn allocate(&self, id: ClientId) -> AllocationResult<Allocation> {
        let addrs = generate_ip_addr(self.ipv4.as_ref(), self.ipv6.as_ref(), id)
            .inspect_err(|e| {
                tracing::warn!(%id, pool = %self, error = %e, "Address allocation failed")
            })?;

        let allocation = Allocation {
            id,
            ipv4: self
                .ipv4
                .zip(addrs.ipv4)
                .map(|(net, addr)| Ipv4Net::new_assert(addr, net.prefix_len())),
            ipv6: self
                .ipv6
                .zip(addrs.ipv6)
                .map(|(net, addr)| Ipv6Net::new_assert(addr, net.prefix_len())),
        };
        tracing::debug!(%id, ipv4 = ?allocation.ipv4, ipv6 = ?allocation.ipv6, "Allocated client addresses");
        Ok(allocation)
    }

    /// Allocate for the caller's counter and move it on to the next ID. The
    /// counter is only advanced when the allocation succeeds.
    pub fn allocate_next(&self, next_id: &mut ClientId) -> AllocationResult<Allocation> {
        let id = *next_id;
        let allocation = self.allocate(id)?;
        *next_id = id
            .checked_next()
            .ok_or_else(|| AllocationError::limit_exceeded(self, id))?;
        Ok(allocation)
    }
}

impl Display for AddressPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (self.ipv4, self.ipv6) {
            (Some(v4), Some(v6)) => write!(f, "{v4}, {v6}"),
            (Some(v4), None) => v4.fmt(f),
            (None, Some(v6)) => v6.fmt(f),
            (None, None) => f.write_str("<none>"),
        }
    }
}

/// Parse and validate the pool configured for one address family. A blank
/// CIDR means the family is not configured. Host-only prefixes and pools of
/// the other family are [`AllocationError::InvalidCidr`].
pub fn parse_pool(
    cidr: Option<&str>,
    family: IpAddressFamily,
) -> AllocationResult<Option<Network>> {
    let Some(cidr) = cidr.map(str::trim).filter(|c| !c.is_empty()) else {
        return Ok(None);
    };
    let network = calc_default_gateway(cidr)?
        .network
        .require_address_family_or_else(family, |_| {
            AllocationError::invalid_cidr(cidr, CidrError::WrongAddressFamily(family))
        })?;
    Ok(Some(network))
}

fn require_hosts(network: Network) -> AllocationResult<Network> {
    match network.host_bits() {
        0 => Err(AllocationError::invalid_cidr(
            network.to_string(),
            CidrError::NoHostBits,
        )),
        _ => Ok(network),
    }
}
