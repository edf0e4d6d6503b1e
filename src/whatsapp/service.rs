use std::time::Duration;

use tracing::{info, warn};
use url::form_urlencoded;

use super::model::{SendOutcome, SendRequest, SendResponse};

const GATEWAY_TIMEOUT_SECONDS: u64 = 10;

/// Strip every non-digit character from a raw phone number.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Build the wa.me deep link for a digits-only phone number and message text.
pub fn build_deep_link(digits: &str, message: &str) -> String {
    let encoded: String = form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("https://wa.me/{}?text={}", digits, encoded)
}

/// Client side of the Messaging Gateway. The pipeline self-addresses the
/// gateway endpoint over HTTP; every failure mode (connect, timeout, non-2xx,
/// decode) folds into a `SendOutcome` so callers never have to catch.
#[derive(Debug, Clone)]
pub struct WhatsAppClient {
    http: reqwest::Client,
    endpoint: String,
}

impl WhatsAppClient {
    pub fn new(base_url: &str) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(GATEWAY_TIMEOUT_SECONDS))
            .build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/api/whatsapp/send", base_url.trim_end_matches('/')),
        })
    }

    /// Attempt delivery. `phone` may still contain formatting characters;
    /// it is sanitized to digits before the request goes out.
    pub async fn send(&self, phone: &str, message: &str) -> SendOutcome {
        let digits = sanitize_phone(phone);
        if digits.is_empty() {
            return SendOutcome::failure("Phone number contains no digits");
        }

        let request = SendRequest {
            phone_number: digits,
            message: message.to_string(),
        };

        let response = match self.http.post(&self.endpoint).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("WhatsApp gateway request failed: {}", e);
                return SendOutcome::failure(e.to_string());
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("WhatsApp gateway returned status {}", status);
            return SendOutcome::failure(format!("Gateway returned status {}", status.as_u16()));
        }

        match response.json::<SendResponse>().await {
            Ok(body) => {
                if body.success {
                    info!("WhatsApp gateway accepted message");
                }
                SendOutcome {
                    success: body.success,
                    error: body.error,
                }
            }
            Err(e) => {
                warn!("WhatsApp gateway response could not be decoded: {}", e);
                SendOutcome::failure(format!("Invalid gateway response: {}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_every_non_digit() {
        assert_eq!(sanitize_phone("+234 (801) 234-5678"), "2348012345678");
        assert_eq!(sanitize_phone("0801.234.5678"), "08012345678");
        assert_eq!(sanitize_phone("no digits here"), "");
        assert_eq!(sanitize_phone(""), "");
    }

    #[test]
    fn deep_link_encodes_message_text() {
        let link = build_deep_link("2348012345678", "Hello & welcome!");
        assert_eq!(
            link,
            "https://wa.me/2348012345678?text=Hello+%26+welcome%21"
        );
    }

    #[test]
    fn deep_link_keeps_plain_words_readable() {
        let link = build_deep_link("15551234", "hello");
        assert_eq!(link, "https://wa.me/15551234?text=hello");
    }

    #[tokio::test]
    async fn send_with_digitless_phone_fails_without_network() {
        let client = WhatsAppClient::new("http://localhost:9").expect("client builds");
        let outcome = client.send("---", "msg").await;
        assert!(!outcome.success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Phone number contains no digits")
        );
    }
}
