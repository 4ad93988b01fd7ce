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

use eyre::WrapErr;
use serde::Serialize;
use subspace_network::{
    AddressPool, AllocatedAddress, Allocation, AllocationError, CidrError, ClientId, Gateways,
    HostLimits, IpAddressFamily, PoolGateway, calc_default_gateway, generate_ip_addr,
    host_limits, parse_pool,
};

use crate::config::Config;
use crate::output::{field, render};

pub mod args;

#[cfg(test)]
mod tests;

pub use args::{Cli, Commands, GenerateArgs, NextArgs, OutputFormat};

/// Run a parsed command line and return what should be printed on stdout.
pub fn run_cli(cli: Cli) -> eyre::Result<String> {
    let format = cli.format;
    match cli.command {
        Commands::Gateway { cidr } => render(&gateway(&cidr)?, format),
        Commands::Capacity { cidr } => render(&capacity(&cidr)?, format),
        Commands::Generate(args) => render(&generate(args)?, format),
        Commands::Next(args) => {
            let config = Config::try_from(args).wrap_err("Failed to load pool config")?;
            render(&next(&config)?, format)
        }
    }
}

pub fn gateway(cidr: &str) -> Result<GatewayReport, AllocationError> {
    calc_default_gateway(cidr).map(GatewayReport)
}

pub fn capacity(cidr: &str) -> Result<CapacityReport, AllocationError> {
    let network = parse_pool(Some(cidr), IpAddressFamily::Ipv4)?
        .and_then(|n| n.as_v4())
        .ok_or_else(|| AllocationError::invalid_cidr(cidr, CidrError::NoPool))?;
    Ok(CapacityReport(host_limits(&network)))
}

pub fn generate(args: GenerateArgs) -> Result<GenerateReport, AllocationError> {
    let v4_net = parse_pool(args.ipv4_pool.as_deref(), IpAddressFamily::Ipv4)?
        .and_then(|n| n.as_v4());
    let v6_net = parse_pool(args.ipv6_pool.as_deref(), IpAddressFamily::Ipv6)?
        .and_then(|n| n.as_v6());

    let addresses = generate_ip_addr(v4_net.as_ref(), v6_net.as_ref(), args.id)?;
    Ok(GenerateReport {
        id: args.id,
        addresses,
    })
}

pub fn next(config: &Config) -> Result<NextReport, AllocationError> {
    let pool = AddressPool::from_config(&config.pool)?;
    let mut next_id = config.pool.next_id;
    let allocation = pool.allocate_next(&mut next_id)?;
    tracing::info!(
        id = %allocation.id,
        %next_id,
        "Allocated addresses, store the new next_id in the pool config"
    );

    Ok(NextReport {
        pool: pool.to_string(),
        allocation,
        gateways: pool.gateways(),
        next_id,
    })
}

//
// Reports
//

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct GatewayReport(pub PoolGateway);

impl Display for GatewayReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        field(f, "network:", Some(self.0.network))?;
        field(f, "gateway:", Some(self.0.gateway))
    }
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct CapacityReport(pub HostLimits);

impl Display for CapacityReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        field(f, "network:", Some(self.0.network))?;
        field(f, "broadcast:", Some(self.0.broadcast))?;
        field(f, "hosts:", Some(self.0.hosts_max))
    }
}

#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub id: ClientId,
    #[serde(flatten)]
    pub addresses: AllocatedAddress,
}

impl Display for GenerateReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        field(f, "id:", Some(self.id))?;
        field(f, "ipv4:", self.addresses.ipv4)?;
        field(f, "ipv6:", self.addresses.ipv6)
    }
}

#[derive(Debug, Serialize)]
pub struct NextReport {
    pub pool: String,
    pub allocation: Allocation,
    pub gateways: Gateways,
    pub next_id: ClientId,
}

impl Display for NextReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        field(f, "pool:", Some(&self.pool))?;
        field(f, "id:", Some(self.allocation.id))?;
        field(f, "ipv4:", self.allocation.ipv4)?;
        field(f, "ipv6:", self.allocation.ipv6)?;
        field(f, "gateway4:", self.gateways.ipv4)?;
        field(f, "gateway6:", self.gateways.ipv6)?;
        field(f, "next_id:", Some(self.next_id))
    }
}
