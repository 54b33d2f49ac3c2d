//! Webhook resource wrappers: execution, including `wait` and thread
//! targeting.

use reqwest::Method;

use crate::error::Result;
use crate::model::{ExecuteWebhook, Message, Webhook};
use crate::transport::HttpTransport;

use super::super::engine::{Request, RestEngine};

impl<T: HttpTransport> RestEngine<T> {
    pub async fn get_webhook(&self, webhook_id: u64, token: &str) -> Result<Webhook> {
        self.execute_json(Request::new(Method::GET, format!("/webhooks/{webhook_id}/{token}"))).await
    }

    /// Executes a webhook. When `body.wait` is set the platform returns the
    /// created message and this returns `Some`; otherwise `None`.
    pub async fn execute_webhook(&self, webhook_id: u64, token: &str, body: &ExecuteWebhook) -> Result<Option<Message>> {
        let query = body.query_string();
        let path = if query.is_empty() {
            format!("/webhooks/{webhook_id}/{token}")
        } else {
            format!("/webhooks/{webhook_id}/{token}?{query}")
        };
        let request = Request::new(Method::POST, path).json_body(body)?;
        if body.wait {
            Ok(Some(self.execute_json(request).await?))
        } else {
            self.execute_raw(request).await?;
            Ok(None)
        }
    }

    pub async fn delete_webhook(&self, webhook_id: u64, token: &str) -> Result<()> {
        self.execute_raw(Request::new(Method::DELETE, format!("/webhooks/{webhook_id}/{token}"))).await?;
        Ok(())
    }
}
