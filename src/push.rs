use serde::Serialize;

use crate::error::AppResult;

/// Fire-and-forget client for the Expo-style push gateway.
#[derive(Clone)]
pub struct PushClient {
    http: reqwest::Client,
    endpoint: String,
}

#[derive(Serialize)]
struct PushMessage<'a> {
    to: &'a str,
    sound: &'a str,
    title: &'a str,
    body: &'a str,
}

impl PushClient {
    pub fn new(endpoint: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Forward one notification to the gateway. Delivery past the hand-off is
    /// the gateway's problem; only transport failures are reported.
    pub async fn send(&self, to: &str, title: &str, body: &str) -> AppResult<()> {
        let message = PushMessage {
            to,
            sound: "default",
            title,
            body,
        };
        let response = self.http.post(&self.endpoint).json(&message).send().await?;
        response.error_for_status()?;
        Ok(())
    }
}
