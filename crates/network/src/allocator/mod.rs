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

//! The address allocator: gateway and capacity calculations for a pool, and
//! the ID-to-address mapping used when provisioning a client.

mod client_id;
mod gateway;
mod generator;
mod host_limit;
mod pool;

pub use client_id::ClientId;
pub use gateway::{PoolGateway, calc_default_gateway, gateway_addr};
pub use generator::{AllocatedAddress, generate_ip_addr};
pub use host_limit::{HostLimits, broadcast_addr_v4, host_limits, hosts_max_v4};
pub use pool::{AddressPool, Allocation, Defaults, Gateways, PoolConfig, parse_pool};
