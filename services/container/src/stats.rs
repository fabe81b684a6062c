// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use cloudfiles_core::{Error, Result};
use http::header::HeaderName;
use http::HeaderMap;

use crate::constants::*;

/// AccountStats carries the account-wide counters of an account HEAD.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccountStats {
    /// Number of containers in the account.
    pub container_count: u64,
    /// Total bytes stored across all containers.
    pub bytes_used: u64,
    /// Number of objects across all containers, if the service reported it.
    pub object_count: Option<u64>,
}

/// Extract [`AccountStats`] from the headers of an account HEAD response.
///
/// `X-Account-Container-Count` and `X-Account-Bytes-Used` are required,
/// `X-Account-Object-Count` is read when present and well formed.
pub fn extract_account_stats(headers: &HeaderMap) -> Result<AccountStats> {
    Ok(AccountStats {
        container_count: required_counter(headers, &X_ACCOUNT_CONTAINER_COUNT)?,
        bytes_used: required_counter(headers, &X_ACCOUNT_BYTES_USED)?,
        object_count: optional_counter(headers, &X_ACCOUNT_OBJECT_COUNT),
    })
}

fn required_counter(headers: &HeaderMap, name: &HeaderName) -> Result<u64> {
    let value = headers
        .get(name)
        .ok_or_else(|| Error::missing_header(format!("header {name} is absent")))?;

    value
        .to_str()
        .ok()
        .and_then(parse_decimal)
        .ok_or_else(|| {
            Error::missing_header(format!(
                "header {name} is not a non-negative integer: {value:?}"
            ))
        })
}

fn optional_counter(headers: &HeaderMap, name: &HeaderName) -> Option<u64> {
    headers.get(name)?.to_str().ok().and_then(parse_decimal)
}

/// Parse a plain decimal counter. Signs and other non-digits are rejected,
/// surrounding whitespace is not significant.
pub(crate) fn parse_decimal(value: &str) -> Option<u64> {
    let value = value.trim();
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse().ok()
}
