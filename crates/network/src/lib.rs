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

//! Address allocation for Subspace client pools.
//!
//! Every client gets a numeric ID from whoever owns the pool configuration,
//! and that ID maps to exactly one host address in each configured pool. The
//! mapping is a pure function, so the same (pool, ID) pair always produces the
//! same address and a failed provisioning attempt can simply be retried.

pub mod allocator;
pub mod errors;
pub mod ip;

pub use allocator::{
    AddressPool, AllocatedAddress, Allocation, ClientId, Gateways, HostLimits, PoolConfig,
    PoolGateway, broadcast_addr_v4, calc_default_gateway, generate_ip_addr, host_limits,
    hosts_max_v4, parse_pool,
};
pub use errors::{AllocationError, AllocationResult, CidrError};
pub use ip::address_family::{IdentifyAddressFamily, IpAddressFamily};
pub use ip::network::Network;
