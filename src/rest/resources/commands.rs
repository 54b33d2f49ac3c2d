//! Application command resource wrappers: global and per-guild CRUD, bulk
//! overwrite.

use reqwest::Method;

use crate::error::Result;
use crate::model::{ApplicationMarker, Command, CommandMarker, GuildMarker, Id};
use crate::transport::HttpTransport;

use super::super::engine::{Request, RestEngine};

impl<T: HttpTransport> RestEngine<T> {
    pub async fn get_global_commands(&self, application_id: Id<ApplicationMarker>) -> Result<Vec<Command>> {
        self.execute_json(Request::new(Method::GET, format!("/applications/{application_id}/commands"))).await
    }

    pub async fn create_global_command(&self, application_id: Id<ApplicationMarker>, command: &Command) -> Result<Command> {
        let request = Request::new(Method::POST, format!("/applications/{application_id}/commands")).json_body(command)?;
        self.execute_json(request).await
    }

    pub async fn delete_global_command(&self, application_id: Id<ApplicationMarker>, command_id: Id<CommandMarker>) -> Result<()> {
        let path = format!("/applications/{application_id}/commands/{command_id}");
        self.execute_raw(Request::new(Method::DELETE, path)).await?;
        Ok(())
    }

    pub async fn bulk_overwrite_global_commands(&self, application_id: Id<ApplicationMarker>, commands: &[Command]) -> Result<Vec<Command>> {
        let request = Request::new(Method::PUT, format!("/applications/{application_id}/commands")).json_body(&commands)?;
        self.execute_json(request).await
    }

    pub async fn get_guild_commands(&self, application_id: Id<ApplicationMarker>, guild_id: Id<GuildMarker>) -> Result<Vec<Command>> {
        let path = format!("/applications/{application_id}/guilds/{guild_id}/commands");
        self.execute_json(Request::new(Method::GET, path)).await
    }

    pub async fn create_guild_command(&self, application_id: Id<ApplicationMarker>, guild_id: Id<GuildMarker>, command: &Command) -> Result<Command> {
        let path = format!("/applications/{application_id}/guilds/{guild_id}/commands");
        let request = Request::new(Method::POST, path).json_body(command)?;
        self.execute_json(request).await
    }

    pub async fn bulk_overwrite_guild_commands(&self, application_id: Id<ApplicationMarker>, guild_id: Id<GuildMarker>, commands: &[Command]) -> Result<Vec<Command>> {
        let path = format!("/applications/{application_id}/guilds/{guild_id}/commands");
        let request = Request::new(Method::PUT, path).json_body(&commands)?;
        self.execute_json(request).await
    }
}
