//! Interaction response wrappers: initial callback, original response
//! edit/delete, followups. The callback and webhook-style followup
//! endpoints are exempt from the global rate-limit window, so every method
//! here marks its request `interaction()`.

use reqwest::Method;

use crate::error::Result;
use crate::model::{InteractionResponse, Message};
use crate::transport::HttpTransport;

use super::super::engine::{Request, RestEngine};

impl<T: HttpTransport> RestEngine<T> {
    pub async fn create_interaction_response(&self, interaction_id: u64, token: &str, response: &InteractionResponse) -> Result<()> {
        let path = format!("/interactions/{interaction_id}/{token}/callback");
        let request = Request::new(Method::POST, path).json_body(response)?.interaction();
        self.execute_raw(request).await?;
        Ok(())
    }

    pub async fn get_original_interaction_response(&self, application_id: u64, token: &str) -> Result<Message> {
        let path = format!("/webhooks/{application_id}/{token}/messages/@original");
        let request = Request::new(Method::GET, path).interaction();
        self.execute_json(request).await
    }

    pub async fn edit_original_interaction_response(&self, application_id: u64, token: &str, body: &crate::model::ExecuteWebhook) -> Result<Message> {
        let path = format!("/webhooks/{application_id}/{token}/messages/@original");
        let request = Request::new(Method::PATCH, path).json_body(body)?.interaction();
        self.execute_json(request).await
    }

    pub async fn delete_original_interaction_response(&self, application_id: u64, token: &str) -> Result<()> {
        let path = format!("/webhooks/{application_id}/{token}/messages/@original");
        let request = Request::new(Method::DELETE, path).interaction();
        self.execute_raw(request).await?;
        Ok(())
    }

    pub async fn create_followup_message(&self, application_id: u64, token: &str, body: &crate::model::ExecuteWebhook) -> Result<Message> {
        let path = format!("/webhooks/{application_id}/{token}");
        let request = Request::new(Method::POST, path).json_body(body)?.interaction();
        self.execute_json(request).await
    }
}
