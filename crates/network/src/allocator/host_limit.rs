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
use std::net::Ipv4Addr;

use ipnet::Ipv4Net;
use serde::Serialize;

/// Capacity report for an IPv4 pool.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct HostLimits {
    pub network: Ipv4Net,
    pub broadcast: Ipv4Addr,
    pub hosts_max: u32,
}

pub fn host_limits(network: &Ipv4Net) -> HostLimits {
    HostLimits {
        network: network.trunc(),
        broadcast: broadcast_addr_v4(network),
        hosts_max: hosts_max_v4(network),
    }
}

/// The last address in the given network, i.e. the broadcast address: each
/// byte of the base address OR-ed with the inverted netmask byte.
pub fn broadcast_addr_v4(network: &Ipv4Net) -> Ipv4Addr {
    let base = network.network().octets();
    let mask = network.netmask().octets();
    let mut broadcast = [0u8; 4];
    for (i, byte) in broadcast.iter_mut().enumerate() {
        *byte = base[i] | !mask[i];
    }
    Ipv4Addr::from(broadcast)
}

/// The maximum number of hosts in the given network, `2^host_bits - 2`
/// (the network and broadcast addresses are excluded). /31 and /32 networks
/// have no usable hosts.
pub fn hosts_max_v4(network: &Ipv4Net) -> u32 {
    let host_bits = u32::from(network.max_prefix_len() - network.prefix_len());
    let usable = (1u64 << host_bits).saturating_sub(2);
    // 2^32 - 2 is the largest possible value, which still fits.
    u32::try_from(usable).unwrap_or(u32::MAX)
}
