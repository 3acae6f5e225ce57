//! Scripted in-memory transport and fixture loading shared by the integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use rezka_scraper::infrastructure::{
    Method, SiteConfig, Transport, TransportError, TransportRequest, TransportResponse,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

pub const BASE_URL: &str = "https://rezka.ag/";

pub fn fixture(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    std::fs::read_to_string(&path).unwrap_or_else(|e| panic!("fixture {}: {e}", path.display()))
}

pub fn site_config() -> SiteConfig {
    SiteConfig {
        base_url: BASE_URL.to_string(),
        page_size: 36,
        ..SiteConfig::default()
    }
}

struct Route {
    method: Method,
    target: String,
    params: Vec<(String, String)>,
    response: Result<TransportResponse, TransportError>,
}

impl Route {
    fn matches(&self, request: &TransportRequest) -> bool {
        self.method == request.method
            && self.target == request.target
            && self
                .params
                .iter()
                .all(|(key, value)| request.param(key) == Some(value.as_str()))
    }
}

/// Answers requests from a fixed script; unscripted requests are `NotFound`
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<Vec<Route>>,
    requests: Mutex<Vec<TransportRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    fn push(&self, method: Method, target: &str, params: &[(&str, &str)], response: Result<TransportResponse, TransportError>) {
        self.routes.lock().unwrap().push(Route {
            method,
            target: target.to_string(),
            params: params
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
            response,
        });
    }

    pub fn on_get(&self, target: &str, params: &[(&str, &str)], body: impl Into<String>) {
        self.push(Method::Get, target, params, Ok(TransportResponse::ok(body)));
    }

    pub fn on_post(&self, target: &str, params: &[(&str, &str)], body: impl Into<String>) {
        self.push(Method::Post, target, params, Ok(TransportResponse::ok(body)));
    }

    pub fn on_post_response(&self, target: &str, params: &[(&str, &str)], response: TransportResponse) {
        self.push(Method::Post, target, params, Ok(response));
    }

    pub fn fail_get(&self, target: &str, params: &[(&str, &str)], error: TransportError) {
        self.push(Method::Get, target, params, Err(error));
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn targets(&self) -> Vec<String> {
        self.requests().into_iter().map(|request| request.target).collect()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        let routes = self.routes.lock().unwrap();
        match routes.iter().find(|route| route.matches(&request)) {
            Some(route) => route.response.clone(),
            None => Err(TransportError::NotFound {
                url: request.target.clone(),
            }),
        }
    }
}
