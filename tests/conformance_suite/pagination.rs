//! Pagination walks against an in-process mock feature server.

use ogcapi_conformance::error::Error;
use ogcapi_conformance::pagination::PaginationWalker;
use serde_json::json;

use crate::common::PagingServer;

fn walker() -> PaginationWalker {
    PaginationWalker::new(reqwest::Client::new())
}

#[tokio::test]
async fn counts_features_across_all_pages() {
    // Served pages hold 10, 5 and 0 features; the empty page still links a
    // further page that must never be fetched.
    let server = PagingServer::start(vec![10, 5, 0, 99]).await;
    let initial_page = server.initial_page(10);

    let total = walker()
        .count_all_features(&initial_page, None)
        .await
        .unwrap();

    assert_eq!(total, 25);
    let requests = server.requests();
    assert_eq!(requests.len(), 3, "walk must stop at the empty page: {:?}", requests);
}

#[tokio::test]
async fn stops_without_next_link() {
    let page = json!({
        "type": "FeatureCollection",
        "features": [{}, {}, {}],
        "links": [
            { "href": "http://example.org/items", "rel": "self", "type": "application/geo+json" }
        ]
    });
    assert_eq!(walker().count_all_features(&page, None).await.unwrap(), 3);
}

#[tokio::test]
async fn preserves_query_parameters_and_overrides_limit() {
    let server = PagingServer::start(vec![4, 0]).await;
    let initial_page = server.initial_page(10);

    let total = walker()
        .count_all_features(&initial_page, Some(7))
        .await
        .unwrap();
    assert_eq!(total, 14);

    for request in server.requests() {
        assert!(request.contains("f=json"), "query dropped: {}", request);
        assert!(request.contains("offset="), "query dropped: {}", request);
        assert!(request.contains("limit=7"), "limit not overridden: {}", request);
    }
}

#[tokio::test]
async fn detects_next_link_cycles() {
    let server = PagingServer::start_looping(vec![3]).await;
    let initial_page = server.initial_page(10);

    let result = walker().count_all_features(&initial_page, None).await;
    assert!(matches!(result, Err(Error::PaginationLoop { .. })), "{:?}", result);
}

#[tokio::test]
async fn enforces_page_cap() {
    let server = PagingServer::start(vec![1, 1, 1, 1, 1, 0]).await;
    let initial_page = server.initial_page(1);

    let result = walker()
        .with_max_pages(3)
        .count_all_features(&initial_page, None)
        .await;
    assert!(matches!(result, Err(Error::PaginationLoop { pages: 3 })), "{:?}", result);
}

#[tokio::test]
async fn non_success_status_is_a_hard_failure() {
    let server = PagingServer::start(vec![1]).await;
    let initial_page = json!({
        "type": "FeatureCollection",
        "features": [{}],
        "links": [
            { "href": format!("{}/does-not-exist", server.base_url), "rel": "next", "type": "application/geo+json" }
        ]
    });

    let result = walker().count_all_features(&initial_page, None).await;
    match result {
        Err(Error::UnexpectedStatus { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected UnexpectedStatus, got {:?}", other),
    }
}
