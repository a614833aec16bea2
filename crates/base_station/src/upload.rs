//! Upload das leituras para o back-end via HTTP.

use anyhow::{Context, anyhow};
use radio_core::reading::Reading;
use std::time::Duration;

/// Rota do back-end que recebe as leituras.
pub const READINGS_PATH: &str = "/api/v1/readings";

#[derive(Debug)]
pub struct Uploader {
    url: String,
    agent: ureq::Agent,
}

impl Uploader {
    pub fn new(endpoint: &str) -> Self {
        Self::with_timeout(endpoint, Duration::from_secs(5))
    }

    pub fn with_timeout(endpoint: &str, timeout: Duration) -> Self {
        Self {
            url: format!("{}{READINGS_PATH}", endpoint.trim_end_matches('/')),
            agent: ureq::AgentBuilder::new().timeout(timeout).build(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Envia uma leitura como JSON. Qualquer status diferente de 200 é erro.
    pub fn upload(&self, reading: &Reading) -> anyhow::Result<()> {
        let body = reading.to_json().context("Falha ao serializar leitura")?;
        let result = self
            .agent
            .post(&self.url)
            .set("Content-Type", "application/json")
            .send_string(&body);

        match result {
            Ok(resp) if resp.status() == 200 => Ok(()),
            Ok(resp) => Err(anyhow!(
                "{} respondeu {} {}",
                self.url,
                resp.status(),
                resp.status_text()
            )),
            Err(ureq::Error::Status(code, resp)) => Err(anyhow!(
                "{} respondeu {} {}",
                self.url,
                code,
                resp.status_text()
            )),
            Err(ureq::Error::Transport(transport)) => {
                Err(anyhow!("Falha ao enviar para {}: {transport}", self.url))
            }
        }
    }
}
