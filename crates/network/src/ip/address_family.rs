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
use std::net::IpAddr;

/// A representation of an address family. Pools are configured per family,
/// so most of the allocator is written against this rather than against
/// concrete address types.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum IpAddressFamily {
    Ipv4,
    Ipv6,
}

impl IpAddressFamily {
    /// Number of bits in an address of this family.
    pub fn address_bits(&self) -> u8 {
        match self {
            IpAddressFamily::Ipv4 => 32,
            IpAddressFamily::Ipv6 => 128,
        }
    }
}

impl Display for IpAddressFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IpAddressFamily::Ipv4 => f.write_str("IPv4"),
            IpAddressFamily::Ipv6 => f.write_str("IPv6"),
        }
    }
}

pub trait IdentifyAddressFamily {
    /// Return the address family for this value.
    fn address_family(&self) -> IpAddressFamily;

    /// Check whether this value matches the specified `address_family`.
    fn is_address_family(&self, address_family: IpAddressFamily) -> bool {
        address_family == self.address_family()
    }

    fn require_address_family_or_else<F, E>(
        self,
        address_family: IpAddressFamily,
        err: F,
    ) -> Result<Self, E>
    where
        Self: Sized,
        F: FnOnce(Self) -> E,
    {
        match self.is_address_family(address_family) {
            true => Ok(self),
            false => Err(err(self)),
        }
    }
}

impl IdentifyAddressFamily for IpAddr {
    fn address_family(&self) -> IpAddressFamily {
        match self {
            IpAddr::V4(_) => IpAddressFamily::Ipv4,
            IpAddr::V6(_) => IpAddressFamily::Ipv6,
        }
    }
}

impl IdentifyAddressFamily for ipnet::IpNet {
    fn address_family(&self) -> IpAddressFamily {
        match self {
            ipnet::IpNet::V4(_) => IpAddressFamily::Ipv4,
            ipnet::IpNet::V6(_) => IpAddressFamily::Ipv6,
        }
    }
}

#[cfg(feature = "ipnetwork")]
impl IdentifyAddressFamily for ipnetwork::IpNetwork {
    fn address_family(&self) -> IpAddressFamily {
        match self {
            ipnetwork::IpNetwork::V4(_) => IpAddressFamily::Ipv4,
            ipnetwork::IpNetwork::V6(_) => IpAddressFamily::Ipv6,
        }
    }
}
