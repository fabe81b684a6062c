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

use bytes::Bytes;
use http::header::HeaderName;
use http::HeaderMap;
use http::HeaderValue;
use http::Method;
use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

use crate::Result;

/// Characters left as-is inside one path segment, everything else is
/// percent-encoded. `/` is always encoded so a segment can't split the path.
pub const PATH_SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Operation is the intent a request is built for.
///
/// Every variant maps to exactly one method and path shape, so illegal
/// combinations (a limit on a delete, a create without a name) can't be
/// expressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// `HEAD /<version>/<account>`: read account counters from headers.
    AccountInfo,
    /// `GET /<version>/<account>`: list containers, optionally paginated.
    ListContainers {
        /// Maximum number of containers in the page.
        limit: Option<usize>,
        /// Exclusive lower bound; the page starts strictly after this name.
        marker: Option<String>,
    },
    /// `PUT /<version>/<account>/<container>`
    CreateContainer {
        /// Container to create.
        name: String,
    },
    /// `DELETE /<version>/<account>/<container>`
    DeleteContainer {
        /// Container to delete.
        name: String,
    },
}

impl Operation {
    /// HTTP method used by this operation.
    pub fn method(&self) -> Method {
        match self {
            Operation::AccountInfo => Method::HEAD,
            Operation::ListContainers { .. } => Method::GET,
            Operation::CreateContainer { .. } => Method::PUT,
            Operation::DeleteContainer { .. } => Method::DELETE,
        }
    }

    /// Container addressed by this operation, if any.
    pub fn container_name(&self) -> Option<&str> {
        match self {
            Operation::CreateContainer { name } | Operation::DeleteContainer { name } => {
                Some(name)
            }
            _ => None,
        }
    }
}

/// RequestDescriptor is an immutable description of a pending HTTP operation.
///
/// It carries no endpoint or credentials: the transport roots it at a
/// storage URL and attaches authentication when it sends it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestDescriptor {
    operation: Operation,
    method: Method,
    path_segments: Vec<String>,
    query: Vec<(String, String)>,
    headers: HeaderMap,
    response_headers: Vec<HeaderName>,
}

impl RequestDescriptor {
    /// Create a descriptor for `operation` addressed by `path_segments`.
    pub fn new(operation: Operation, path_segments: Vec<String>) -> Self {
        Self {
            method: operation.method(),
            operation,
            path_segments,
            query: Vec::new(),
            headers: HeaderMap::new(),
            response_headers: Vec::new(),
        }
    }

    /// Append a query pair.
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Set a request header.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Declare a response header the caller is going to read.
    pub fn with_response_header(mut self, name: HeaderName) -> Self {
        self.response_headers.push(name);
        self
    }

    /// Operation this descriptor was built for.
    pub fn operation(&self) -> &Operation {
        &self.operation
    }

    /// HTTP method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Raw, unencoded path segments: `[version, account, container?]`.
    pub fn path_segments(&self) -> &[String] {
        &self.path_segments
    }

    /// Query pairs in insertion order.
    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    /// Get a query value by key.
    pub fn query_get(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Request headers.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Response headers of interest.
    pub fn response_headers(&self) -> &[HeaderName] {
        &self.response_headers
    }

    /// Percent-encoded path, starting with `/`.
    ///
    /// ```shell
    /// ["v1", "acct", "my photos"] => "/v1/acct/my%20photos"
    /// ```
    pub fn path(&self) -> String {
        let mut s = String::with_capacity(
            self.path_segments.iter().map(|v| v.len() + 1).sum::<usize>(),
        );
        for seg in &self.path_segments {
            s.push('/');
            s.extend(utf8_percent_encode(seg, PATH_SEGMENT_ENCODE_SET));
        }
        if s.is_empty() {
            s.push('/');
        }
        s
    }

    /// Form-url-encoded query string, empty if there is no query.
    pub fn query_string(&self) -> String {
        if self.query.is_empty() {
            return String::new();
        }

        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.query.iter())
            .finish()
    }

    /// Build an `http::Request` rooted at `storage_url`.
    ///
    /// `storage_url` is the scheme and authority of the storage endpoint,
    /// optionally followed by a path prefix. A trailing `/` is ignored.
    pub fn to_http_request(&self, storage_url: &str) -> Result<http::Request<Bytes>> {
        let mut uri = storage_url.trim_end_matches('/').to_string();
        uri.push_str(&self.path());

        let query = self.query_string();
        if !query.is_empty() {
            uri.push('?');
            uri.push_str(&query);
        }

        let uri = http::Uri::try_from(uri)?;
        let mut req = http::Request::builder()
            .method(self.method.clone())
            .uri(uri)
            .body(Bytes::new())?;
        req.headers_mut().extend(self.headers.clone());

        Ok(req)
    }
}
