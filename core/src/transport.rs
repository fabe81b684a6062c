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

use std::collections::VecDeque;
use std::fmt::Debug;

use bytes::Bytes;
use http::HeaderMap;
use http::StatusCode;

use crate::RequestDescriptor;
use crate::Result;

/// Transport sends a [`RequestDescriptor`] and hands back the response.
///
/// Connection management, TLS, authentication and socket-level retries all
/// live behind this trait.
#[async_trait::async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    /// Execute the request and return status, headers and a body stream.
    async fn execute(&self, req: &RequestDescriptor) -> Result<Response>;
}

/// ResponseBody yields the response body as a sequence of chunks.
///
/// Chunk boundaries carry no meaning.
#[async_trait::async_trait]
pub trait ResponseBody: Send {
    /// Return the next chunk, or `None` once the body is exhausted.
    async fn next_chunk(&mut self) -> Result<Option<Bytes>>;
}

/// Response returned by a [`Transport`].
pub struct Response {
    /// HTTP status code.
    pub status: StatusCode,
    /// HTTP headers.
    pub headers: HeaderMap,
    /// Body stream, read lazily.
    pub body: Box<dyn ResponseBody>,
}

impl Debug for Response {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Response")
            .field("status", &self.status)
            .field("headers", &self.headers)
            .finish_non_exhaustive()
    }
}

impl Response {
    /// Create a response with an empty body.
    pub fn new(status: StatusCode, headers: HeaderMap) -> Self {
        Self {
            status,
            headers,
            body: Box::new(ChunkedBody::default()),
        }
    }

    /// Replace the body stream.
    pub fn with_body(mut self, body: impl ResponseBody + 'static) -> Self {
        self.body = Box::new(body);
        self
    }

    /// Drain the body, discarding its content.
    pub async fn discard_body(&mut self) -> Result<usize> {
        let mut n = 0;
        while let Some(chunk) = self.body.next_chunk().await? {
            n += chunk.len();
        }
        Ok(n)
    }
}

/// ChunkedBody is an in-memory body that yields pre-split chunks in order.
///
/// This is useful for testing or for replaying a captured response.
#[derive(Debug, Clone, Default)]
pub struct ChunkedBody {
    chunks: VecDeque<Bytes>,
}

impl ChunkedBody {
    /// Create a body from chunks.
    pub fn new(chunks: impl IntoIterator<Item = impl Into<Bytes>>) -> Self {
        Self {
            chunks: chunks.into_iter().map(Into::into).collect(),
        }
    }

    /// Split `content` into chunks of at most `size` bytes.
    pub fn split(content: impl Into<Bytes>, size: usize) -> Self {
        let mut content = content.into();
        let size = size.max(1);
        let mut chunks = VecDeque::with_capacity(content.len() / size + 1);
        while !content.is_empty() {
            let n = size.min(content.len());
            chunks.push_back(content.split_to(n));
        }
        Self { chunks }
    }
}

#[async_trait::async_trait]
impl ResponseBody for ChunkedBody {
    async fn next_chunk(&mut self) -> Result<Option<Bytes>> {
        Ok(self.chunks.pop_front())
    }
}
