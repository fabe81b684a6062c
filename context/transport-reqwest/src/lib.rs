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

//! Reqwest-based transport for cloudfiles.
//!
//! This crate provides `ReqwestTransport`, which implements the `Transport`
//! trait from `cloudfiles_core` on top of `reqwest::Client`. Response bodies
//! are streamed chunk by chunk, nothing is buffered ahead of the parser.
//!
//! ## Example
//!
//! ```no_run
//! use cloudfiles_core::Transport;
//! use cloudfiles_core::{Operation, RequestDescriptor};
//! use cloudfiles_transport_reqwest::ReqwestTransport;
//!
//! # async fn example() -> cloudfiles_core::Result<()> {
//! let transport = ReqwestTransport::new("https://storage101.dfw1.clouddrive.com")
//!     .with_auth_token("AUTH_tk0123456789abcdef");
//!
//! let req = RequestDescriptor::new(
//!     Operation::AccountInfo,
//!     vec!["v1".to_string(), "MossoCloudFS_1".to_string()],
//! );
//! let resp = transport.execute(&req).await?;
//! println!("status: {}", resp.status);
//! # Ok(())
//! # }
//! ```

use std::fmt::{Debug, Formatter};

use async_trait::async_trait;
use bytes::Bytes;
use cloudfiles_core::utils::Redact;
use cloudfiles_core::{Error, RequestDescriptor, Response, ResponseBody, Result, Transport};
use http::header::HeaderName;
use http::HeaderValue;
use log::debug;
use reqwest::Client;

/// Header carrying the auth token on every request.
pub const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

/// Reqwest-based implementation of the `Transport` trait.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    storage_url: String,
    auth_token: Option<String>,
}

impl Debug for ReqwestTransport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("storage_url", &self.storage_url)
            .field("auth_token", &Redact::from(&self.auth_token))
            .finish_non_exhaustive()
    }
}

impl ReqwestTransport {
    /// Create a transport rooted at `storage_url` with a default client.
    pub fn new(storage_url: impl Into<String>) -> Self {
        Self {
            client: Client::default(),
            storage_url: storage_url.into(),
            auth_token: None,
        }
    }

    /// Replace the reqwest client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Send `token` in `X-Auth-Token` on every request.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    fn to_request(&self, desc: &RequestDescriptor) -> Result<reqwest::Request> {
        let mut req = desc.to_http_request(&self.storage_url)?;
        if let Some(token) = &self.auth_token {
            let mut value = HeaderValue::from_str(token).map_err(|err| {
                Error::config_invalid("auth token is not a valid header value").with_source(err)
            })?;
            value.set_sensitive(true);
            req.headers_mut().insert(X_AUTH_TOKEN, value);
        }

        reqwest::Request::try_from(req)
            .map_err(|err| Error::unexpected("failed to build reqwest request").with_source(err))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, desc: &RequestDescriptor) -> Result<Response> {
        let req = self.to_request(desc)?;
        debug!("executing {} {}", req.method(), req.url());

        let resp = self
            .client
            .execute(req)
            .await
            .map_err(|err| Error::unexpected("failed to send request").with_source(err))?;

        Ok(Response::new(resp.status(), resp.headers().clone()).with_body(ReqwestBody(resp)))
    }
}

/// Body of a reqwest response, read with `reqwest::Response::chunk`.
struct ReqwestBody(reqwest::Response);

#[async_trait]
impl ResponseBody for ReqwestBody {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        self.0
            .chunk()
            .await
            .map_err(|err| Error::unexpected("failed to read response body").with_source(err))
    }
}
