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

use std::sync::Arc;

use cloudfiles_core::{Error, RequestDescriptor, Response, Result, Transport};
use http::StatusCode;
use log::{debug, warn};

use crate::{
    extract_account_stats, AccountStats, Container, RequestBuilder, StreamingContainerParser,
};

/// ContainerClient runs container operations over a [`Transport`].
///
/// It builds the request, executes it and turns the response into domain
/// values. Nothing is retried here, retries belong to the transport.
#[derive(Debug, Clone)]
pub struct ContainerClient {
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ContainerClient {
    /// Create a new client.
    pub fn new(builder: RequestBuilder, transport: impl Transport) -> Self {
        Self {
            builder,
            transport: Arc::new(transport),
        }
    }

    /// Request builder used by this client.
    pub fn builder(&self) -> &RequestBuilder {
        &self.builder
    }

    /// Fetch the account counters.
    pub async fn account_info(&self) -> Result<AccountStats> {
        let req = self.builder.account_info_request()?;
        let mut resp = self.execute(&req).await?;

        if !resp.status.is_success() {
            return Err(status_error(&req, &mut resp).await);
        }
        extract_account_stats(&resp.headers)
    }

    /// Fetch one page of containers.
    ///
    /// The page holds at most `limit` containers whose names sort strictly
    /// after `marker`.
    pub async fn list_containers(
        &self,
        limit: Option<usize>,
        marker: Option<&str>,
    ) -> Result<Vec<Container>> {
        let req = self.builder.list_containers_request(limit, marker)?;
        let mut resp = self.execute(&req).await?;

        match resp.status {
            StatusCode::OK => {}
            // An account without containers may answer with no content at all.
            StatusCode::NO_CONTENT => {
                resp.discard_body().await?;
                return Ok(Vec::new());
            }
            _ => return Err(status_error(&req, &mut resp).await),
        }

        let mut parser = StreamingContainerParser::new();
        while let Some(chunk) = resp.body.next_chunk().await? {
            parser.feed(&chunk)?;
        }
        parser.finish()?;

        Ok(parser.into_containers())
    }

    /// Iterate over every container page by page.
    pub fn pager(&self, page_size: Option<usize>) -> ContainerPager<'_> {
        ContainerPager {
            client: self,
            page_size,
            marker: None,
            done: false,
        }
    }

    /// Fetch every container of the account, following markers until an
    /// empty page.
    pub async fn list_all_containers(&self, page_size: Option<usize>) -> Result<Vec<Container>> {
        let mut pager = self.pager(page_size);
        let mut containers = Vec::new();
        while let Some(page) = pager.next_page().await? {
            containers.extend(page);
        }
        Ok(containers)
    }

    /// Create a container, succeeding if it already exists.
    pub async fn create_container(&self, name: &str) -> Result<()> {
        let req = self.builder.create_container_request(name)?;
        let mut resp = self.execute(&req).await?;

        match resp.status {
            StatusCode::CREATED | StatusCode::ACCEPTED => {
                resp.discard_body().await?;
                Ok(())
            }
            _ => Err(status_error(&req, &mut resp).await),
        }
    }

    /// Delete an empty container.
    pub async fn delete_container(&self, name: &str) -> Result<()> {
        let req = self.builder.delete_container_request(name)?;
        let mut resp = self.execute(&req).await?;

        match resp.status {
            StatusCode::NO_CONTENT | StatusCode::OK => {
                resp.discard_body().await?;
                Ok(())
            }
            StatusCode::CONFLICT => Err(Error::container_not_empty(format!(
                "container {name} still holds objects"
            ))),
            _ => Err(status_error(&req, &mut resp).await),
        }
    }

    async fn execute(&self, req: &RequestDescriptor) -> Result<Response> {
        debug!("sending {} {}", req.method(), req.path());
        let resp = self.transport.execute(req).await?;
        debug!(
            "received {} for {} {}",
            resp.status,
            req.method(),
            req.path()
        );
        Ok(resp)
    }
}

/// ContainerPager walks an account listing one page at a time.
///
/// Each page starts after the last name of the previous one, and the walk
/// ends at the first empty page.
#[derive(Debug)]
pub struct ContainerPager<'a> {
    client: &'a ContainerClient,
    page_size: Option<usize>,
    marker: Option<String>,
    done: bool,
}

impl ContainerPager<'_> {
    /// Fetch the next page, or `None` once the listing is exhausted.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Container>>> {
        if self.done {
            return Ok(None);
        }

        let page = match self
            .client
            .list_containers(self.page_size, self.marker.as_deref())
            .await
        {
            Ok(page) => page,
            Err(err) => {
                self.done = true;
                return Err(err);
            }
        };

        let Some(last) = page.last() else {
            self.done = true;
            return Ok(None);
        };
        if self.marker.as_deref() == Some(last.name.as_str()) {
            self.done = true;
            return Err(Error::unexpected(format!(
                "listing did not advance past marker {:?}",
                last.name
            )));
        }

        self.marker = Some(last.name.clone());
        Ok(Some(page))
    }

    /// Marker the next page starts after.
    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }
}

async fn status_error(req: &RequestDescriptor, resp: &mut Response) -> Error {
    // The body is only drained so the connection can be reused.
    if let Err(err) = resp.discard_body().await {
        debug!("failed to drain error response body: {err}");
    }

    let msg = format!(
        "{} {} responded with {}",
        req.method(),
        req.path(),
        resp.status
    );
    match (resp.status, req.operation().container_name()) {
        (StatusCode::NOT_FOUND, Some(name)) => {
            Error::not_found(format!("container {name} does not exist: {msg}"))
        }
        (StatusCode::NOT_FOUND, None) => Error::not_found(msg),
        _ => {
            warn!("{msg}");
            Error::unexpected(msg)
        }
    }
}
