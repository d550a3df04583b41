//! Request forwarding to the backend origin.
//!
//! # Responsibilities
//! - Rewrite the request to the rule's backend origin
//! - Enforce connect and upstream response timeouts
//! - Stream the backend response back unchanged (minus hop-by-hop headers)
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors (504 vs 502)
//! - Outbound requests always use HTTP/1.1, whatever the client spoke

use std::net::SocketAddr;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response, Version};
use hyper_util::client::legacy::{connect::HttpConnector, Client};
use hyper_util::rt::TokioExecutor;

use super::headers;
use super::rule::ProxyRule;
use super::ProxyError;
use crate::config::TimeoutConfig;

/// Pooled HTTP client shared by all proxied requests.
#[derive(Clone)]
pub struct Forwarder {
    client: Client<HttpConnector, Body>,
    upstream_timeout: Duration,
}

impl Forwarder {
    pub fn new(timeouts: &TimeoutConfig) -> Self {
        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(Duration::from_secs(timeouts.connect_secs)));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Self {
            client,
            upstream_timeout: Duration::from_secs(timeouts.upstream_secs),
        }
    }

    /// Forward `request` according to `rule`.
    pub async fn forward(
        &self,
        rule: &ProxyRule,
        request: Request<Body>,
        client_addr: Option<SocketAddr>,
    ) -> Result<Response<Body>, ProxyError> {
        let (mut parts, body) = request.into_parts();

        parts.uri = rule.rewrite(&parts.uri)?;
        parts.version = Version::HTTP_11;
        headers::strip_hop_by_hop(&mut parts.headers);
        if rule.adds_forwarded() {
            headers::add_forwarded(&mut parts.headers, client_addr.map(|a| a.ip()));
        }
        if rule.changes_origin() {
            headers::set_host(&mut parts.headers, rule.authority().as_str());
        }

        tracing::trace!(uri = %parts.uri, "Sending upstream request");
        let outbound = Request::from_parts(parts, body);

        let response = match tokio::time::timeout(self.upstream_timeout, self.client.request(outbound)).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                return Err(ProxyError::Upstream {
                    target: rule.target().to_string(),
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(ProxyError::Timeout {
                    target: rule.target().to_string(),
                    secs: self.upstream_timeout.as_secs(),
                })
            }
        };

        let (mut parts, body) = response.into_parts();
        headers::strip_hop_by_hop(&mut parts.headers);
        Ok(Response::from_parts(parts, Body::new(body)))
    }
}
