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

use cloudfiles_core::{Error, Operation, RequestDescriptor, Result};
use http::header::ACCEPT;
use http::HeaderValue;

use crate::constants::*;
use crate::Config;

/// RequestBuilder turns an [`Operation`] into a [`RequestDescriptor`].
///
/// It's a pure value constructor: nothing here performs I/O, and the only
/// failures are invalid arguments caught before any request exists.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    api_version: String,
    account: String,
}

impl RequestBuilder {
    /// Create a builder for `account` using the default api version.
    pub fn new(account: impl Into<String>) -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.to_string(),
            account: account.into(),
        }
    }

    /// Create a builder from config.
    pub fn from_config(cfg: &Config) -> Result<Self> {
        Ok(Self::new(cfg.account()?).with_api_version(cfg.api_version()))
    }

    /// Set the api version, the first path segment.
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Build the descriptor for `op`.
    pub fn build(&self, op: Operation) -> Result<RequestDescriptor> {
        match &op {
            Operation::AccountInfo => Ok(RequestDescriptor::new(op, self.account_path())
                .with_response_header(X_ACCOUNT_CONTAINER_COUNT)
                .with_response_header(X_ACCOUNT_BYTES_USED)),
            Operation::ListContainers { limit, marker } => {
                if *limit == Some(0) {
                    return Err(Error::invalid_argument("limit must be a positive integer"));
                }
                let limit = *limit;
                // An empty marker means "from the start", same as no marker.
                let marker = marker.clone().filter(|v| !v.is_empty());

                let op = Operation::ListContainers {
                    limit,
                    marker: marker.clone(),
                };
                let mut desc = RequestDescriptor::new(op, self.account_path())
                    .with_header(ACCEPT, HeaderValue::from_static("application/xml"));
                if let Some(limit) = limit {
                    desc = desc.with_query("limit", limit.to_string());
                }
                if let Some(marker) = marker {
                    desc = desc.with_query("marker", marker);
                }
                Ok(desc)
            }
            Operation::CreateContainer { name } | Operation::DeleteContainer { name } => {
                validate_container_name(name)?;
                let mut path = self.account_path();
                path.push(name.clone());
                Ok(RequestDescriptor::new(op, path))
            }
        }
    }

    /// `HEAD /<version>/<account>`
    pub fn account_info_request(&self) -> Result<RequestDescriptor> {
        self.build(Operation::AccountInfo)
    }

    /// `GET /<version>/<account>` with optional `limit` and `marker`.
    pub fn list_containers_request(
        &self,
        limit: Option<usize>,
        marker: Option<&str>,
    ) -> Result<RequestDescriptor> {
        self.build(Operation::ListContainers {
            limit,
            marker: marker.map(str::to_string),
        })
    }

    /// `PUT /<version>/<account>/<name>`
    pub fn create_container_request(&self, name: &str) -> Result<RequestDescriptor> {
        self.build(Operation::CreateContainer {
            name: name.to_string(),
        })
    }

    /// `DELETE /<version>/<account>/<name>`
    pub fn delete_container_request(&self, name: &str) -> Result<RequestDescriptor> {
        self.build(Operation::DeleteContainer {
            name: name.to_string(),
        })
    }

    fn account_path(&self) -> Vec<String> {
        vec![self.api_version.clone(), self.account.clone()]
    }
}

/// Check a container name against the service's path-segment rules.
///
/// Percent-encoding is left to the transport, only names that can never be
/// valid are rejected here.
pub fn validate_container_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::invalid_argument("container name must not be empty"));
    }
    if name.contains('/') {
        return Err(Error::invalid_argument(format!(
            "container name {name:?} must not contain '/'"
        )));
    }
    if name.len() > MAX_CONTAINER_NAME_LENGTH {
        return Err(Error::invalid_argument(format!(
            "container name is {} bytes, longer than {MAX_CONTAINER_NAME_LENGTH}",
            name.len()
        )));
    }
    Ok(())
}
