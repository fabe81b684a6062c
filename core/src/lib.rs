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

//! Core types for talking to a Cloud Files style object store.
//!
//! This crate holds the pieces every service crate and transport shares:
//!
//! - [`RequestDescriptor`] and [`Operation`]: what to send, without any I/O
//! - [`Transport`], [`Response`] and [`ResponseBody`]: how a descriptor is executed
//!   and how the body streams back in chunks
//! - [`Error`] and [`ErrorKind`]: the error model
//! - [`Env`]: environment access for configuration loading
//!
//! ## Example
//!
//! ```
//! use cloudfiles_core::{Operation, RequestDescriptor};
//!
//! let desc = RequestDescriptor::new(
//!     Operation::AccountInfo,
//!     vec!["v1".to_string(), "MossoCloudFS_1".to_string()],
//! );
//!
//! assert_eq!(desc.path(), "/v1/MossoCloudFS_1");
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod utils;

mod env;
pub use env::Env;
pub use env::OsEnv;
pub use env::StaticEnv;
mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::{Operation, RequestDescriptor, PATH_SEGMENT_ENCODE_SET};
mod transport;
pub use transport::{ChunkedBody, Response, ResponseBody, Transport};
