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
use ipnet::AddrParseError;

use crate::allocator::ClientId;
use crate::ip::address_family::IpAddressFamily;

pub type AllocationResult<T> = Result<T, AllocationError>;

/// Everything the allocator can refuse to do. None of these are fatal: they
/// describe a single bad request and are handed straight back to the caller,
/// which decides whether to ask again with a different ID or pool.
#[derive(Debug, thiserror::Error)]
pub enum AllocationError {
    #[error("invalid CIDR {cidr:?}: {reason}")]
    InvalidCidr {
        cidr: String,
        #[source]
        reason: CidrError,
    },

    #[error("invalid ID {0}: client IDs start at {min}", min = ClientId::FIRST_ALLOCATABLE)]
    InvalidId(ClientId),

    #[error("num of devices exceeds the limit of IP addr pool {pool}: no address left for ID {id}")]
    IpLimitExceeds { pool: String, id: ClientId },
}

impl AllocationError {
    pub fn invalid_cidr(cidr: impl Into<String>, reason: CidrError) -> Self {
        Self::InvalidCidr {
            cidr: cidr.into(),
            reason,
        }
    }

    pub fn limit_exceeded(pool: impl ToString, id: ClientId) -> Self {
        Self::IpLimitExceeds {
            pool: pool.to_string(),
            id,
        }
    }
}

/// Why a pool definition was rejected.
#[derive(Debug, thiserror::Error)]
pub enum CidrError {
    #[error("Parse error: {0}")]
    ParseError(#[from] AddrParseError),

    #[error("prefix leaves no host bits")]
    NoHostBits,

    #[error("expected an {0} network")]
    WrongAddressFamily(IpAddressFamily),

    #[error("no address pool configured")]
    NoPool,
}
