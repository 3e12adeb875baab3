//! End-to-end lookups against an in-process GraphQL server
//!
//! Exercises the real HTTP transport: header set, request body, status
//! handling, response decompression and the response size limit.

use std::io::Write;
use std::sync::{Arc, Mutex};

use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};
use cyberid_client::prelude::*;
use serde_json::{Value, json};

fn answer(body: &Value) -> Value {
    let query = body["query"].as_str().unwrap_or_default();
    let variables = &body["variables"];

    if query.starts_with("query cyberIdOwner(") {
        match variables["name"].as_str() {
            Some("alice") => json!({ "data": { "cyberIdByName": {
                "tokenId": "7", "name": "alice", "owner": { "address": "0xABC" }
            } } }),
            _ => json!({ "data": { "cyberIdByName": null } }),
        }
    } else if query.starts_with("query holdingCyberIds(") {
        let names: &[&str] = match (variables["address"].as_str(), variables["chainId"].as_u64()) {
            (Some("0xDEF"), Some(CYBER_TESTNET_ID)) => &["bob", "bob2"],
            _ => &[],
        };
        let edges: Vec<Value> = names
            .iter()
            .map(|name| json!({ "node": { "tokenId": "1", "name": name } }))
            .collect();
        json!({ "data": { "wallet": { "cyberIds": { "edges": edges } } } })
    } else {
        json!({ "errors": [{ "message": "unknown operation" }] })
    }
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/v3/")
}

fn config_for(endpoint: &str) -> ResolverConfig {
    ResolverConfig {
        endpoints: Endpoints {
            production: endpoint.to_string(),
            staging: endpoint.to_string(),
        },
        ..ResolverConfig::default()
    }
}

async fn graphql_server() -> (String, Arc<Mutex<Vec<HeaderMap>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorded = seen.clone();
    let router = Router::new().route(
        "/v3/",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let recorded = recorded.clone();
            async move {
                recorded.lock().unwrap().push(headers);
                Json(answer(&body))
            }
        }),
    );
    (serve(router).await, seen)
}

#[tokio::test]
async fn resolves_domain_over_http() {
    let (endpoint, seen) = graphql_server().await;
    let resolver = NameResolver::with_config(config_for(&endpoint)).unwrap();

    let response = resolver
        .on_lookup(&LookupRequest::for_domain("eip155:7560", "alice"))
        .await;

    assert_eq!(
        response,
        Some(ResolutionResponse::ResolvedAddresses(vec![ResolvedAddress::new(
            "0xABC", "alice"
        )]))
    );

    let seen = seen.lock().unwrap();
    let headers = &seen[0];
    assert_eq!(headers[header::ORIGIN], "altair://-");
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::ACCEPT], "application/json");
    assert_eq!(headers[header::ACCEPT_ENCODING], "gzip, deflate, br");
}

#[tokio::test]
async fn resolves_holdings_over_http() {
    let (endpoint, _) = graphql_server().await;
    let resolver = NameResolver::with_config(config_for(&endpoint)).unwrap();

    let response = resolver
        .on_lookup(&LookupRequest::for_address("eip155:111557560", "0xDEF"))
        .await;

    assert_eq!(
        response,
        Some(ResolutionResponse::ResolvedDomains(vec![
            ResolvedDomain::new("bob"),
            ResolvedDomain::new("bob2"),
        ]))
    );

    // Same wallet on mainnet holds nothing
    let response = resolver
        .on_lookup(&LookupRequest::for_address("eip155:7560", "0xDEF"))
        .await;
    assert_eq!(response, None);
}

#[tokio::test]
async fn unknown_domain_has_no_answer() {
    let (endpoint, _) = graphql_server().await;
    let resolver = NameResolver::with_config(config_for(&endpoint)).unwrap();

    let response = resolver
        .on_lookup(&LookupRequest::for_domain("eip155:7560", "nobody"))
        .await;
    assert_eq!(response, None);
}

#[tokio::test]
async fn gzip_response_is_decoded() {
    let router = Router::new().route(
        "/v3/",
        post(|Json(body): Json<Value>| async move {
            let mut encoder = flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
            encoder.write_all(answer(&body).to_string().as_bytes()).unwrap();
            (
                [
                    (header::CONTENT_ENCODING, "gzip"),
                    (header::CONTENT_TYPE, "application/json"),
                ],
                encoder.finish().unwrap(),
            )
        }),
    );
    let endpoint = serve(router).await;
    let resolver = NameResolver::with_config(config_for(&endpoint)).unwrap();

    let owner = resolver.resolve_owner_of_domain("alice", Network::Mainnet).await;
    assert_eq!(owner.as_deref(), Some("0xABC"));
}

#[tokio::test]
async fn error_status_body_is_still_read() {
    let router = Router::new().route(
        "/v3/",
        post(|Json(body): Json<Value>| async move {
            (StatusCode::INTERNAL_SERVER_ERROR, Json(answer(&body))).into_response()
        }),
    );
    let endpoint = serve(router).await;
    let resolver = NameResolver::with_config(config_for(&endpoint)).unwrap();

    let owner = resolver.resolve_owner_of_domain("alice", Network::Mainnet).await;
    assert_eq!(owner.as_deref(), Some("0xABC"));
}

#[tokio::test]
async fn html_error_page_has_no_answer() {
    let router = Router::new().route(
        "/v3/",
        post(|| async { (StatusCode::BAD_GATEWAY, "<html>bad gateway</html>") }),
    );
    let endpoint = serve(router).await;
    let resolver = NameResolver::with_config(config_for(&endpoint)).unwrap();

    let err = resolver
        .try_owner_of_domain("alice", Network::Mainnet)
        .await
        .unwrap_err();
    assert!(err.is_decode());

    let response = resolver
        .on_lookup(&LookupRequest::for_domain("eip155:7560", "alice"))
        .await;
    assert_eq!(response, None);
}

#[tokio::test]
async fn oversize_response_has_no_answer() {
    let (endpoint, _) = graphql_server().await;
    let config = ResolverConfig {
        max_response_bytes: 16,
        ..config_for(&endpoint)
    };
    let resolver = NameResolver::with_config(config).unwrap();

    let err = resolver
        .try_owner_of_domain("alice", Network::Mainnet)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), Kind::PayloadTooLarge);
    assert_eq!(
        resolver.resolve_owner_of_domain("alice", Network::Mainnet).await,
        None
    );
}

#[tokio::test]
async fn unreachable_service_has_no_answer() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let endpoint = format!("http://{}/v3/", listener.local_addr().unwrap());
    drop(listener);
    let resolver = NameResolver::with_config(config_for(&endpoint)).unwrap();

    let response = resolver
        .on_lookup(&LookupRequest::for_address("eip155:7560", "0xDEF"))
        .await;
    assert_eq!(response, None);
}
