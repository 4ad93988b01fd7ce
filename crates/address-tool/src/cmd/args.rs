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
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use subspace_network::ClientId;

use crate::config::{Config, ConfigError};

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    #[value(name = "text")]
    Text,
    #[value(name = "json")]
    Json,
    #[value(name = "yaml")]
    Yaml,
}

#[derive(Parser, Debug)]
#[command(name = "subspace-alloc")]
#[command(about = "Inspect Subspace address pools and work out client addresses")]
#[command(version)]
pub struct Cli {
    // --verbose turns on debug logging (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    // --format picks how results are printed on stdout.
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    // `gateway` parses a pool and prints the address it advertises as
    // default router.
    Gateway {
        // cidr is the pool definition, e.g. 10.99.97.0/24.
        cidr: String,
    },
    // `capacity` prints the broadcast address and usable host count of
    // an IPv4 pool.
    Capacity {
        // cidr is the IPv4 pool definition.
        cidr: String,
    },
    // `generate` maps a single client ID onto the given pools.
    Generate(GenerateArgs),
    // `next` allocates for the next unused ID from a pool config, and
    // reports the ID the caller should store afterwards.
    Next(NextArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    // --id is the client ID to map; 0 and 1 are reserved.
    #[arg(long)]
    pub id: ClientId,

    #[arg(long)]
    pub ipv4_pool: Option<String>,

    #[arg(long)]
    pub ipv6_pool: Option<String>,
}

#[derive(Args, Debug)]
pub struct NextArgs {
    #[arg(long, short = 'c', help = "Path to TOML configuration file")]
    pub config_file: Option<PathBuf>,

    #[arg(long, help = "Override the IPv4 pool (empty string disables it)")]
    pub ipv4_pool: Option<String>,

    #[arg(long, help = "Override the IPv6 pool (empty string disables it)")]
    pub ipv6_pool: Option<String>,

    #[arg(long, help = "Override the next unused client ID")]
    pub next_id: Option<ClientId>,
}

impl TryFrom<NextArgs> for Config {
    type Error = ConfigError;

    fn try_from(args: NextArgs) -> Result<Self, Self::Error> {
        let mut config = Config::load_or_default(args.config_file.as_ref())?;

        if let Some(ipv4_pool) = args.ipv4_pool {
            config.pool.ipv4_cidr = Some(ipv4_pool);
        }
        if let Some(ipv6_pool) = args.ipv6_pool {
            config.pool.ipv6_cidr = Some(ipv6_pool);
        }
        if let Some(next_id) = args.next_id {
            config.pool.next_id = next_id;
        }

        Ok(config)
    }
}
