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

//! Container operations for Cloud Files style object stores.
//!
//! This crate shapes the requests for account and container operations and
//! parses their responses as they stream in:
//!
//! - [`RequestBuilder`] turns an [`Operation`] into a [`RequestDescriptor`]
//! - [`StreamingContainerParser`] builds [`Container`]s from listing chunks
//! - [`extract_account_stats`] reads [`AccountStats`] from response headers
//! - [`ContainerClient`] runs all of the above over a [`Transport`](cloudfiles_core::Transport)
//!
//! # Example
//!
//! ```
//! use cloudfiles_container::{RequestBuilder, StreamingContainerParser};
//!
//! # fn main() -> cloudfiles_core::Result<()> {
//! let builder = RequestBuilder::new("MossoCloudFS_1");
//! let req = builder.list_containers_request(Some(2), Some("backups"))?;
//! assert_eq!(req.query_get("marker"), Some("backups"));
//!
//! let mut parser = StreamingContainerParser::new();
//! parser.feed(b"<account><container><name>pho")?;
//! parser.feed(b"tos</name><count>12</count></container></account>")?;
//! parser.finish()?;
//!
//! assert_eq!(parser.containers()[0].name, "photos");
//! assert_eq!(parser.containers()[0].object_count, Some(12));
//! # Ok(())
//! # }
//! ```

pub use cloudfiles_core::{Operation, RequestDescriptor};

mod constants;
pub use constants::*;

mod config;
pub use config::Config;

mod container;
pub use container::Container;

mod build;
pub use build::{validate_container_name, RequestBuilder};

mod parse;
pub use parse::StreamingContainerParser;

mod stats;
pub use stats::{extract_account_stats, AccountStats};

mod client;
pub use client::{ContainerClient, ContainerPager};
