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

use http::header::HeaderName;

// Headers returned by account HEAD requests.
pub const X_ACCOUNT_CONTAINER_COUNT: HeaderName =
    HeaderName::from_static("x-account-container-count");
pub const X_ACCOUNT_BYTES_USED: HeaderName = HeaderName::from_static("x-account-bytes-used");
pub const X_ACCOUNT_OBJECT_COUNT: HeaderName = HeaderName::from_static("x-account-object-count");

// Env values used by cloudfiles.
pub const CLOUDFILES_STORAGE_URL: &str = "CLOUDFILES_STORAGE_URL";
pub const CLOUDFILES_ACCOUNT: &str = "CLOUDFILES_ACCOUNT";
pub const CLOUDFILES_API_VERSION: &str = "CLOUDFILES_API_VERSION";
pub const CLOUDFILES_AUTH_TOKEN: &str = "CLOUDFILES_AUTH_TOKEN";

pub const DEFAULT_API_VERSION: &str = "v1";

/// Longest container name the service accepts, in bytes.
pub const MAX_CONTAINER_NAME_LENGTH: usize = 256;

// Elements of an XML account listing.
pub(crate) const ELEMENT_CONTAINER: &[u8] = b"container";
pub(crate) const ELEMENT_NAME: &[u8] = b"name";
pub(crate) const ELEMENT_COUNT: &[u8] = b"count";
pub(crate) const ELEMENT_BYTES: &[u8] = b"bytes";
