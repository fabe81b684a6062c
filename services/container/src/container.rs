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

/// Container is one storage container as reported by an account listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Container {
    /// Container name, unique within the account.
    pub name: String,
    /// Number of objects, present only when the listing reported it.
    pub object_count: Option<u64>,
    /// Total bytes stored in the container.
    pub bytes_used: u64,
}

impl Container {
    /// Create a container with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            object_count: None,
            bytes_used: 0,
        }
    }

    /// Set the object count.
    pub fn with_object_count(mut self, object_count: u64) -> Self {
        self.object_count = Some(object_count);
        self
    }

    /// Set the bytes used.
    pub fn with_bytes_used(mut self, bytes_used: u64) -> Self {
        self.bytes_used = bytes_used;
        self
    }
}
