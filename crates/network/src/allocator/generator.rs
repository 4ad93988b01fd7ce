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
use std::net::{Ipv4Addr, Ipv6Addr};

use ipnet::{Ipv4Net, Ipv6Net};
use serde::Serialize;

use super::client_id::ClientId;
use super::host_limit::broadcast_addr_v4;
use crate::errors::{AllocationError, AllocationResult, CidrError};
use crate::ip::network::{is_global_unicast, is_link_local_unicast};

/// Host addresses generated for one client, one per configured pool.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize)]
pub struct AllocatedAddress {
    pub ipv4: Option<Ipv4Addr>,
    pub ipv6: Option<Ipv6Addr>,
}

/// Map a client ID to its host address in each of the given pools.
///
/// The ID is laid over the base address one byte at a time, least
/// significant byte first, starting from the end of the address. Each byte is
/// added on its own and wraps within its position; nothing carries into the
/// next byte. For IPv6 every ID byte covers two address bytes and is written
/// so that its decimal digits read back as hex digits (client 123 ends in
/// `::123`).
///
/// The same pools and ID always give the same addresses.
pub fn generate_ip_addr(
    v4_net: Option<&Ipv4Net>,
    v6_net: Option<&Ipv6Net>,
    id: ClientId,
) -> AllocationResult<AllocatedAddress> {
    if !id.is_allocatable() {
        return Err(AllocationError::InvalidId(id));
    }

    if v4_net.is_none() && v6_net.is_none() {
        return Err(AllocationError::invalid_cidr("", CidrError::NoPool));
    }

    let ipv4 = v4_net.map(|net| generate_v4(net, id)).transpose()?;
    let ipv6 = v6_net.map(|net| generate_v6(net, id)).transpose()?;

    Ok(AllocatedAddress { ipv4, ipv6 })
}

fn generate_v4(network: &Ipv4Net, id: ClientId) -> AllocationResult<Ipv4Addr> {
    let mut octets = network.network().octets();
    for (octet, id_byte) in octets.iter_mut().rev().zip(id_bytes(id)) {
        *octet = octet.wrapping_add(id_byte);
    }
    let addr = Ipv4Addr::from(octets);

    // The all-ones address masked down to the prefix is kept out as well.
    let all_ones_masked = Ipv4Addr::from(Ipv4Addr::BROADCAST.to_bits() & network.netmask().to_bits());
    if !network.contains(&addr) || addr == all_ones_masked || addr == broadcast_addr_v4(network) {
        return Err(AllocationError::limit_exceeded(network.trunc(), id));
    }

    Ok(addr)
}

fn generate_v6(network: &Ipv6Net, id: ClientId) -> AllocationResult<Ipv6Addr> {
    let mut octets = network.network().octets();
    for (pair, id_byte) in octets.rchunks_exact_mut(2).zip(id_bytes(id)) {
        let [high, low] = decimal_as_hex(id_byte).to_be_bytes();
        pair[0] = pair[0].wrapping_add(high);
        pair[1] = pair[1].wrapping_add(low);
    }
    let addr = Ipv6Addr::from(octets);

    if !network.contains(&addr) || !(is_global_unicast(&addr) || is_link_local_unicast(&addr)) {
        return Err(AllocationError::limit_exceeded(network.trunc(), id));
    }

    Ok(addr)
}

/// The bytes of `id`, least significant first, stopping once no set bits
/// remain.
fn id_bytes(id: ClientId) -> impl Iterator<Item = u8> {
    std::iter::successors(Some(id.get()), |rest| Some(rest >> 8).filter(|rest| *rest != 0))
        .map(|rest| (rest & 0xff) as u8)
}

/// Re-encode a byte so its decimal digits become hex nibbles: 123 -> 0x123,
/// 99 -> 0x99, 255 -> 0x255.
fn decimal_as_hex(value: u8) -> u16 {
    let value = u16::from(value);
    value % 10 + (value / 10 % 10) * 16 + (value / 100) * 256
}
