use anyhow::{anyhow, Result};
use reqwest::Client as HttpClient;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{error, info};

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Delivery to the Telegram Bot API
// API Documentation: https://core.telegram.org/bots/api#sendmessage
//
////////////////////////////////////////////////////////////////////////////////////////////////////

const TIMEOUT: Duration = Duration::from_secs(15);

pub struct Telegram {
    token: String,
    chat_id: String,
}

impl Telegram {
    pub fn new(token: &str, chat_id: &str) -> Self {
        Self {
            token: token.to_string(),
            chat_id: chat_id.to_string(),
        }
    }

    // The bot token is part of the URL; it must never appear in the logs.
    fn url(&self) -> String {
        format!("https://api.telegram.org/bot{}/sendMessage", self.token)
    }

    /// One send, no retries. Anything short of an explicit `ok: true` in the
    /// acknowledgment is a failure, unparseable bodies included.
    pub async fn send(&self, client: &HttpClient, text: &str) -> Result<()> {
        let payload = SendMessage {
            chat_id: &self.chat_id,
            text,
            disable_web_page_preview: true,
        };

        let response = client
            .post(self.url())
            .timeout(TIMEOUT)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!("failed reaching the Telegram API");
                e
            })?;

        let status = response.status();
        let body = response.text().await?;

        let ack = match serde_json::from_str::<SendAck>(&body) {
            Ok(ack) => ack,
            Err(e) => {
                error!("Telegram acknowledgment was not parseable ({status}): {body}");
                return Err(e.into());
            }
        };

        info!("Telegram response: {ack:?}");
        if !ack.ok {
            error!("Send failed: {body}");
            return Err(anyhow!(
                "Telegram rejected the message: {}",
                ack.description.unwrap_or(body)
            ));
        }

        Ok(())
    }
}

#[derive(Serialize, Debug)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    disable_web_page_preview: bool,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
//
// Deserialization
//
////////////////////////////////////////////////////////////////////////////////////////////////////

/// `ok` defaults to false so an acknowledgment without the flag counts as a
/// failure rather than a silent success.
#[derive(Deserialize, Debug)]
pub struct SendAck {
    #[serde(default)]
    pub ok: bool,
    pub description: Option<String>,
    pub error_code: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_ack_parses() {
        let ack: SendAck =
            serde_json::from_str(r#"{"ok":true,"result":{"message_id":42}}"#).unwrap();
        assert!(ack.ok);
        assert_eq!(ack.error_code, None);
    }

    #[test]
    fn failure_ack_carries_the_detail() {
        let ack: SendAck = serde_json::from_str(
            r#"{"ok":false,"error_code":400,"description":"Bad Request: chat not found"}"#,
        )
        .unwrap();
        assert!(!ack.ok);
        assert_eq!(ack.error_code, Some(400));
        assert_eq!(
            ack.description.as_deref(),
            Some("Bad Request: chat not found")
        );
    }

    #[test]
    fn ack_without_a_success_flag_is_a_failure() {
        let ack: SendAck = serde_json::from_str(r#"{"result":{"message_id":42}}"#).unwrap();
        assert!(!ack.ok);
    }

    #[test]
    fn an_unparseable_body_is_an_error() {
        assert!(serde_json::from_str::<SendAck>("<html>502</html>").is_err());
    }
}
