//! Executes fixtures against a live base URL and checks expectations.

use anyhow::{Context, Result, bail};
use reqwest::Method;
use serde_json::Value;

use crate::fixture::Fixture;

pub struct Runner {
    client: reqwest::Client,
    base_url: String,
}

impl Runner {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Run one fixture. `Ok(())` means every expectation held.
    pub async fn run(&self, fixture: &Fixture) -> Result<()> {
        let method: Method = fixture
            .request
            .method
            .parse()
            .with_context(|| format!("invalid method {}", fixture.request.method))?;
        let url = format!("{}{}", self.base_url, fixture.request.path);

        let mut request = self.client.request(method, &url);
        for (name, value) in &fixture.request.headers {
            request = request.header(name, value);
        }
        if let Some(ref body) = fixture.request.body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .with_context(|| format!("{} {url}", fixture.request.method))?;
        let status = response.status().as_u16();
        if status != fixture.expect.status {
            bail!("expected status {}, got {status}", fixture.expect.status);
        }

        if fixture.expect.body_includes.is_empty() {
            return Ok(());
        }

        let body: Value = response.json().await.context("response body is not JSON")?;
        for (key, expected) in &fixture.expect.body_includes {
            match body.get(key) {
                Some(actual) if actual == expected => {}
                Some(actual) => {
                    bail!("body[{key:?}]: expected {expected}, got {actual}")
                }
                None => bail!("body[{key:?}] missing in {body}"),
            }
        }

        Ok(())
    }
}
