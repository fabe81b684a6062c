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

//! List every container of an account page by page.
//!
//! ```shell
//! CLOUDFILES_STORAGE_URL=https://storage101.dfw1.clouddrive.com \
//! CLOUDFILES_ACCOUNT=MossoCloudFS_1 \
//! CLOUDFILES_AUTH_TOKEN=... \
//! RUST_LOG=debug cargo run --example list_containers
//! ```

use anyhow::Result;
use cloudfiles_container::{Config, ContainerClient, RequestBuilder};
use cloudfiles_core::OsEnv;
use cloudfiles_transport_reqwest::ReqwestTransport;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let cfg = Config::default().from_env(&OsEnv);
    let mut transport = ReqwestTransport::new(cfg.storage_url()?);
    if let Some(token) = &cfg.auth_token {
        transport = transport.with_auth_token(token);
    }
    let client = ContainerClient::new(RequestBuilder::from_config(&cfg)?, transport);

    let stats = client.account_info().await?;
    println!(
        "{} containers, {} bytes used",
        stats.container_count, stats.bytes_used
    );

    let mut pager = client.pager(Some(100));
    while let Some(page) = pager.next_page().await? {
        for c in page {
            match c.object_count {
                Some(n) => println!("{:<40} {:>10} objects {:>14} bytes", c.name, n, c.bytes_used),
                None => println!("{:<40} {:>14} bytes", c.name, c.bytes_used),
            }
        }
    }

    Ok(())
}
