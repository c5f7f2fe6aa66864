//! In-memory Canvas for dispatcher and server tests

use crate::canvas::CanvasClient;
use crate::error::{Error, Result};
use crate::http::{RequestConfig, Transport};
use crate::pagination::Page;
use crate::types::JsonValue;
use async_trait::async_trait;
use reqwest::Method;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request as seen by the fake
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub method: Method,
    pub url: String,
    pub config: RequestConfig,
}

#[derive(Debug, Clone)]
enum Reply {
    Page(Page),
    Status(u16, String),
}

/// Canned replies keyed by method and URL; every request is recorded
#[derive(Debug, Clone, Default)]
pub(crate) struct FakeCanvas {
    replies: Arc<Mutex<HashMap<(Method, String), Reply>>>,
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

impl FakeCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(&self, method: Method, url: &str, page: Page) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, url.to_string()), Reply::Page(page));
        self
    }

    pub fn get(&self, url: &str, body: JsonValue) -> &Self {
        self.reply(Method::GET, url, Page::last(body))
    }

    pub fn fail(&self, method: Method, url: &str, status: u16, body: &str) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .insert((method, url.to_string()), Reply::Status(status, body.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn client(&self) -> CanvasClient {
        CanvasClient::with_transport(Arc::new(self.clone()))
    }
}

#[async_trait]
impl Transport for FakeCanvas {
    async fn send(&self, method: Method, url: &str, config: RequestConfig) -> Result<Page> {
        self.calls.lock().unwrap().push(RecordedCall {
            method: method.clone(),
            url: url.to_string(),
            config,
        });

        let reply = self
            .replies
            .lock()
            .unwrap()
            .get(&(method.clone(), url.to_string()))
            .cloned();

        match reply {
            Some(Reply::Page(page)) => Ok(page),
            Some(Reply::Status(status, body)) => Err(Error::api(status, &body)),
            None => Err(Error::api(
                404,
                &format!(r#"{{"message":"no fake reply for {method} {url}"}}"#),
            )),
        }
    }
}
