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

use std::env;

use cloudfiles_container::{Config, ContainerClient, RequestBuilder};
use cloudfiles_core::{ErrorKind, OsEnv};
use cloudfiles_transport_reqwest::ReqwestTransport;
use log::warn;

use super::init_logger;

fn init_client() -> Option<ContainerClient> {
    init_logger();
    let _ = dotenv::dotenv();

    if env::var("CLOUDFILES_TEST").unwrap_or_default() != "on" {
        return None;
    }

    let cfg = Config::default().from_env(&OsEnv);
    let storage_url = cfg
        .storage_url()
        .expect("env CLOUDFILES_STORAGE_URL must set");
    let mut transport = ReqwestTransport::new(storage_url);
    if let Some(token) = &cfg.auth_token {
        transport = transport.with_auth_token(token);
    }

    let builder = RequestBuilder::from_config(&cfg).expect("env CLOUDFILES_ACCOUNT must set");
    Some(ContainerClient::new(builder, transport))
}

#[tokio::test]
async fn test_container_lifecycle() -> anyhow::Result<()> {
    let Some(client) = init_client() else {
        warn!("CLOUDFILES_TEST is not set, skipped");
        return Ok(());
    };

    let name = format!("cloudfiles-test-{}", std::process::id());

    let before = client.account_info().await?;
    client.create_container(&name).await?;

    let all = client.list_all_containers(Some(2)).await?;
    assert!(all.iter().any(|c| c.name == name), "{name} must be listed");
    let names: Vec<_> = all.iter().map(|c| c.name.clone()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted, "listing must be in server order");

    let after = client.account_info().await?;
    assert!(after.container_count >= before.container_count);

    client.delete_container(&name).await?;
    let err = client
        .delete_container(&name)
        .await
        .expect_err("second delete must fail");
    assert_eq!(err.kind(), ErrorKind::NotFound);
    Ok(())
}
