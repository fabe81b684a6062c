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

use cloudfiles_container::{AccountStats, Container, ContainerClient, RequestBuilder};
use cloudfiles_core::{ErrorKind, Operation};
use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use test_case::test_case;

use super::{init_logger, MockTransport, Scripted};

const PAGE_ONE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<account name="MossoCloudFS_1">
<container><name>backups</name><count>3</count><bytes>1024</bytes></container>
<container><name>photos</name><count>12</count><bytes>409600</bytes></container>
</account>"#;

const PAGE_TWO: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<account name="MossoCloudFS_1">
<container><name>videos</name><count>1</count><bytes>73400320</bytes></container>
</account>"#;

const EMPTY_PAGE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<account name="MossoCloudFS_1"></account>"#;

fn client(transport: &MockTransport) -> ContainerClient {
    init_logger();
    ContainerClient::new(RequestBuilder::new("MossoCloudFS_1"), transport.clone())
}

#[tokio::test]
async fn test_account_info() -> anyhow::Result<()> {
    let transport = MockTransport::new([Scripted::new(StatusCode::NO_CONTENT)
        .header("X-Account-Container-Count", "12")
        .header("X-Account-Bytes-Used", "409600")]);

    let stats = client(&transport).account_info().await?;

    assert_eq!(
        stats,
        AccountStats {
            container_count: 12,
            bytes_used: 409600,
            object_count: None,
        }
    );
    let reqs = transport.requests();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].method(), &Method::HEAD);
    assert_eq!(reqs[0].path(), "/v1/MossoCloudFS_1");
    Ok(())
}

#[tokio::test]
async fn test_account_info_missing_header() {
    let transport = MockTransport::new([
        Scripted::new(StatusCode::NO_CONTENT).header("X-Account-Container-Count", "12")
    ]);

    let err = client(&transport)
        .account_info()
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::MissingHeader);
}

#[test_case(1; "one byte chunks")]
#[test_case(5; "five byte chunks")]
#[test_case(4096; "single chunk")]
#[tokio::test]
async fn test_list_containers(size: usize) {
    let transport = MockTransport::new([Scripted::new(StatusCode::OK).body(PAGE_ONE, size)]);

    let containers = client(&transport)
        .list_containers(Some(2), Some("archive"))
        .await
        .expect("listing must succeed");

    assert_eq!(
        containers,
        vec![
            Container::new("backups")
                .with_object_count(3)
                .with_bytes_used(1024),
            Container::new("photos")
                .with_object_count(12)
                .with_bytes_used(409600),
        ]
    );
    let reqs = transport.requests();
    assert_eq!(
        reqs[0].operation(),
        &Operation::ListContainers {
            limit: Some(2),
            marker: Some("archive".to_string()),
        }
    );
    assert_eq!(reqs[0].query_get("limit"), Some("2"));
    assert_eq!(reqs[0].query_get("marker"), Some("archive"));
}

#[tokio::test]
async fn test_list_containers_no_content() -> anyhow::Result<()> {
    let transport = MockTransport::new([Scripted::new(StatusCode::NO_CONTENT)]);

    let containers = client(&transport).list_containers(None, None).await?;

    assert!(containers.is_empty());
    Ok(())
}

#[tokio::test]
async fn test_list_containers_truncated_body() {
    let transport = MockTransport::new([Scripted::new(StatusCode::OK).body(
        "<account><container><name>backups</name></container><container><name>pho",
        8,
    )]);

    let err = client(&transport)
        .list_containers(None, None)
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[tokio::test]
async fn test_list_containers_zero_limit_sends_nothing() {
    let transport = MockTransport::default();

    let err = client(&transport)
        .list_containers(Some(0), None)
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(transport.requests().is_empty());
}

#[tokio::test]
async fn test_list_all_containers_follows_marker() -> anyhow::Result<()> {
    let transport = MockTransport::new([
        Scripted::new(StatusCode::OK).body(PAGE_ONE, 16),
        Scripted::new(StatusCode::OK).body(PAGE_TWO, 16),
        Scripted::new(StatusCode::OK).body(EMPTY_PAGE, 16),
    ]);

    let containers = client(&transport).list_all_containers(Some(2)).await?;

    let names: Vec<_> = containers.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["backups", "photos", "videos"]);

    let markers: Vec<_> = transport
        .requests()
        .iter()
        .map(|r| r.query_get("marker").map(str::to_string))
        .collect();
    assert_eq!(
        markers,
        [None, Some("photos".to_string()), Some("videos".to_string())]
    );
    Ok(())
}

#[tokio::test]
async fn test_pager_stops_on_no_content() -> anyhow::Result<()> {
    let transport = MockTransport::new([
        Scripted::new(StatusCode::OK).body(PAGE_TWO, 3),
        Scripted::new(StatusCode::NO_CONTENT),
    ]);
    let client = client(&transport);
    let mut pager = client.pager(None);

    let page = pager.next_page().await?.expect("first page");
    assert_eq!(page.len(), 1);
    assert_eq!(pager.marker(), Some("videos"));

    assert!(pager.next_page().await?.is_none());
    // Exhausted pagers don't hit the transport again.
    assert!(pager.next_page().await?.is_none());
    assert_eq!(transport.requests().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_pager_rejects_stuck_marker() {
    let transport = MockTransport::new([
        Scripted::new(StatusCode::OK).body(PAGE_TWO, 64),
        Scripted::new(StatusCode::OK).body(PAGE_TWO, 64),
    ]);

    let err = client(&transport)
        .list_all_containers(None)
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::Unexpected);
}

#[test_case(StatusCode::CREATED; "created")]
#[test_case(StatusCode::ACCEPTED; "already exists")]
#[tokio::test]
async fn test_create_container(status: StatusCode) {
    let transport = MockTransport::new([Scripted::new(status)]);

    client(&transport)
        .create_container("photos")
        .await
        .expect("create must succeed");

    let reqs = transport.requests();
    assert_eq!(reqs[0].method(), &Method::PUT);
    assert_eq!(reqs[0].path(), "/v1/MossoCloudFS_1/photos");
}

#[tokio::test]
async fn test_create_container_empty_name_sends_nothing() {
    let transport = MockTransport::default();

    let err = client(&transport)
        .create_container("")
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    assert!(transport.requests().is_empty());
}

#[test_case(StatusCode::NO_CONTENT, None; "deleted")]
#[test_case(StatusCode::NOT_FOUND, Some(ErrorKind::NotFound); "not found")]
#[test_case(StatusCode::CONFLICT, Some(ErrorKind::ContainerNotEmpty); "not empty")]
#[test_case(StatusCode::INTERNAL_SERVER_ERROR, Some(ErrorKind::Unexpected); "server error")]
#[tokio::test]
async fn test_delete_container(status: StatusCode, expected: Option<ErrorKind>) {
    let transport = MockTransport::new([Scripted::new(status).body("oops", 2)]);

    let result = client(&transport).delete_container("photos").await;

    let reqs = transport.requests();
    assert_eq!(reqs[0].method(), &Method::DELETE);
    assert_eq!(reqs[0].path(), "/v1/MossoCloudFS_1/photos");
    assert_eq!(result.err().map(|err| err.kind()), expected);
}

#[tokio::test]
async fn test_delete_missing_container_names_it() {
    let transport = MockTransport::new([Scripted::new(StatusCode::NOT_FOUND)]);

    let err = client(&transport)
        .delete_container("old logs")
        .await
        .expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.message().starts_with("container old logs does not exist"), "{err}");
}
