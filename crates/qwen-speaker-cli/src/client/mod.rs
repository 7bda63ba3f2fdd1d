//! Client side of `POST /speak`
//!
//! Requests go through ureq when the `ureq-transport` feature is on. Builds without it fall
//! back to a small blocking HTTP/1.1 client over a plain TCP socket.

#[cfg_attr(feature = "ureq-transport", allow(dead_code))]
mod raw;

use anyhow::Result;
use serde::Serialize;
use std::time::Duration;

/// JSON body of a speak request
#[derive(Debug, Clone, Serialize)]
pub struct SpeakPayload {
    pub text: String,
    pub language: String,
    pub voice: String,
    pub instruct: String,
}

/// Status and body of the server's answer
#[derive(Debug, Clone)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn is_failure(&self) -> bool {
        self.status >= 400
    }
}

/// Send one speak request and wait for the reply.
///
/// Non-2xx statuses are returned as a reply, only transport problems are errors.
pub fn post_speak(url: &str, payload: &SpeakPayload, timeout: Duration) -> Result<HttpReply> {
    let body = serde_json::to_string(payload)?;
    log::debug!("POST {} ({} bytes, timeout {:?})", url, body.len(), timeout);

    #[cfg(feature = "ureq-transport")]
    {
        post_with_ureq(url, &body, timeout)
    }

    #[cfg(not(feature = "ureq-transport"))]
    {
        raw::post_json(url, &body, timeout)
    }
}

#[cfg(feature = "ureq-transport")]
fn post_with_ureq(url: &str, body: &str, timeout: Duration) -> Result<HttpReply> {
    let agent: ureq::Agent = ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .http_status_as_error(false)
        .build()
        .into();

    let mut response = agent
        .post(url)
        .header("Content-Type", "application/json")
        .send(body)?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string()?;

    Ok(HttpReply { status, body })
}
