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

// The intent of the tests.rs file is to test the integrity of the
// command, including basic structure parsing, argument validation,
// and the reports each subcommand produces.
//
// Command Structure - Baseline debug_assert() of the entire command.
// Argument Parsing  - Ensure required/optional arg combinations parse correctly.
// Reports           - Run subcommands end to end and check their output.

use std::io::Write;

use clap::{CommandFactory, Parser};
use subspace_network::{AllocationError, ClientId};

use super::*;

// verify_cmd_structure runs a baseline clap debug_assert()
// to do basic command configuration checking and validation,
// ensuring things like unique argument definitions and global
// flags don't clash with subcommand arguments.
#[test]
fn verify_cmd_structure() {
    Cli::command().debug_assert();
}

/////////////////////////////////////////////////////////////////////////////
// Argument Parsing
//

// parse_generate_with_pools ensures generate accepts both pools
// and parses the ID into a ClientId.
#[test]
fn parse_generate_with_pools() {
    let cli = Cli::try_parse_from([
        "subspace-alloc",
        "generate",
        "--id",
        "100",
        "--ipv4-pool",
        "127.10.0.0/16",
        "--ipv6-pool",
        "fe80::/112",
    ])
    .expect("should parse generate");

    match cli.command {
        Commands::Generate(args) => {
            assert_eq!(args.id, ClientId::new(100));
            assert_eq!(args.ipv4_pool.as_deref(), Some("127.10.0.0/16"));
            assert_eq!(args.ipv6_pool.as_deref(), Some("fe80::/112"));
        }
        _ => panic!("expected Generate variant"),
    }
}

// parse_generate_requires_id ensures --id is mandatory.
#[test]
fn parse_generate_requires_id() {
    let result = Cli::try_parse_from(["subspace-alloc", "generate", "--ipv4-pool", "10.0.0.0/24"]);
    assert!(result.is_err(), "should fail without --id");
}

// parse_generate_rejects_non_numeric_id ensures bad IDs are caught
// by clap rather than at allocation time.
#[test]
fn parse_generate_rejects_non_numeric_id() {
    let result = Cli::try_parse_from(["subspace-alloc", "generate", "--id", "two"]);
    assert!(result.is_err(), "should fail with a non-numeric id");
}

// parse_global_format ensures --format works after the subcommand.
#[test]
fn parse_global_format() {
    let cli = Cli::try_parse_from(["subspace-alloc", "gateway", "10.0.0.0/24", "--format", "json"])
        .expect("should parse gateway with format");
    assert_eq!(cli.format, OutputFormat::Json);
    assert!(!cli.verbose);
}

/////////////////////////////////////////////////////////////////////////////
// Reports
//

fn run(args: &[&str]) -> eyre::Result<String> {
    let mut argv = vec!["subspace-alloc"];
    argv.extend_from_slice(args);
    run_cli(Cli::try_parse_from(argv)?)
}

#[test]
fn gateway_text_report() {
    let output = run(&["gateway", "127.168.128.0/18"]).unwrap();
    assert_eq!(
        output,
        "network:    127.168.128.0/18\ngateway:    127.168.128.1"
    );
}

#[test]
fn gateway_rejects_host_only_prefix() {
    let err = gateway("fe80:1234:1234:1234::/128").unwrap_err();
    assert!(matches!(err, AllocationError::InvalidCidr { .. }));
}

#[test]
fn capacity_json_report() {
    let output = run(&["capacity", "127.0.0.0/20", "--format", "json"]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["network"], "127.0.0.0/20");
    assert_eq!(value["broadcast"], "127.0.15.255");
    assert_eq!(value["hosts_max"], 4094);
}

#[test]
fn capacity_rejects_ipv6() {
    let err = capacity("fd00::/64").unwrap_err();
    assert!(matches!(
        err,
        AllocationError::InvalidCidr {
            reason: CidrError::WrongAddressFamily(IpAddressFamily::Ipv4),
            ..
        }
    ));
}

#[test]
fn generate_report() {
    let output = run(&[
        "generate",
        "--id",
        "100",
        "--ipv4-pool",
        "127.10.0.0/16",
        "--ipv6-pool",
        "fe80::/112",
        "--format",
        "json",
    ])
    .unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["id"], 100);
    assert_eq!(value["ipv4"], "127.10.0.100");
    assert_eq!(value["ipv6"], "fe80::100");
}

#[test]
fn generate_errors() {
    let err = run(&["generate", "--id", "1", "--ipv4-pool", "10.0.0.0/24"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AllocationError>(),
        Some(AllocationError::InvalidId(_))
    ));

    let err = run(&["generate", "--id", "256", "--ipv6-pool", "fe80::/112"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AllocationError>(),
        Some(AllocationError::IpLimitExceeds { .. })
    ));

    let err = run(&["generate", "--id", "2"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AllocationError>(),
        Some(AllocationError::InvalidCidr { .. })
    ));

    let err = run(&["generate", "--id", "2", "--ipv4-pool", "fd00::/64"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AllocationError>(),
        Some(AllocationError::InvalidCidr {
            reason: CidrError::WrongAddressFamily(IpAddressFamily::Ipv4),
            ..
        })
    ));
}

#[test]
fn generate_rejects_host_only_pools() {
    // A /32 or /128 pool has no room for a gateway and a client, so the pool
    // itself is invalid rather than exhausted.
    for (flag, pool) in [("--ipv4-pool", "10.0.0.1/32"), ("--ipv6-pool", "fd00::1/128")] {
        let err = run(&["generate", "--id", "2", flag, pool]).unwrap_err();
        assert!(
            matches!(
                err.downcast_ref::<AllocationError>(),
                Some(AllocationError::InvalidCidr {
                    reason: CidrError::NoHostBits,
                    ..
                })
            ),
            "unexpected error for {pool}: {err}"
        );
    }

    let err = run(&["capacity", "10.0.0.1/32"]).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<AllocationError>(),
        Some(AllocationError::InvalidCidr {
            reason: CidrError::NoHostBits,
            ..
        })
    ));
}

#[test]
fn next_from_config_file_with_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[pool]\nipv4_cidr = \"10.99.97.0/24\"\nipv6_cidr = \"fd00::10:97:0/112\"\nnext_id = 5"
    )
    .unwrap();
    let path = file.path().to_string_lossy().to_string();

    let output = run(&["next", "--config-file", &path, "--format", "yaml"]).unwrap();
    let value: serde_yaml::Value = serde_yaml::from_str(&output).unwrap();
    assert_eq!(value["allocation"]["ipv4"].as_str(), Some("10.99.97.5/24"));
    assert_eq!(value["allocation"]["ipv6"].as_str(), Some("fd00::10:97:5/112"));
    assert_eq!(value["gateways"]["ipv4"].as_str(), Some("10.99.97.1"));
    assert_eq!(value["next_id"].as_u64(), Some(6));

    let output = run(&["next", "--config-file", &path, "--ipv6-pool", "", "--next-id", "12"])
        .unwrap();
    assert!(output.contains("ipv4:       10.99.97.12/24"), "{output}");
    assert!(output.contains("ipv6:       -"), "{output}");
    assert!(output.contains("next_id:    13"), "{output}");
}

#[test]
fn next_with_defaults() {
    let report = next(&Config::default()).unwrap();
    assert_eq!(report.allocation.id, ClientId::FIRST_ALLOCATABLE);
    assert_eq!(report.next_id, ClientId::new(3));
    assert_eq!(report.pool, "10.99.97.0/24, fd00::10:97:0/112");
}

#[test]
fn next_reports_missing_config_file() {
    let err = run(&["next", "--config-file", "/nonexistent/subspace-alloc.toml"]).unwrap_err();
    assert!(
        err.chain()
            .any(|cause| cause.downcast_ref::<crate::config::ConfigError>().is_some())
    );
}
