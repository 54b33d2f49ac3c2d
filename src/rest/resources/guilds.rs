//! Guild resource wrappers: CRUD, members, roles, bans, prune.

use reqwest::Method;
use serde_json::json;

use crate::error::Result;
use crate::model::{Guild, GuildMarker, Id, Member, Role, RoleMarker, UserMarker};
use crate::transport::HttpTransport;

use super::super::engine::{Request, RestEngine};

impl<T: HttpTransport> RestEngine<T> {
    pub async fn get_guild(&self, guild_id: Id<GuildMarker>) -> Result<Guild> {
        self.execute_json(Request::new(Method::GET, format!("/guilds/{guild_id}"))).await
    }

    pub async fn get_guild_member(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>) -> Result<Member> {
        self.execute_json(Request::new(Method::GET, format!("/guilds/{guild_id}/members/{user_id}"))).await
    }

    pub async fn add_guild_member_role(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) -> Result<()> {
        let path = format!("/guilds/{guild_id}/members/{user_id}/roles/{role_id}");
        self.execute_raw(Request::new(Method::PUT, path)).await?;
        Ok(())
    }

    pub async fn remove_guild_member_role(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>, role_id: Id<RoleMarker>) -> Result<()> {
        let path = format!("/guilds/{guild_id}/members/{user_id}/roles/{role_id}");
        self.execute_raw(Request::new(Method::DELETE, path)).await?;
        Ok(())
    }

    pub async fn create_ban(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>, delete_message_seconds: u32) -> Result<()> {
        let request = Request::new(Method::PUT, format!("/guilds/{guild_id}/bans/{user_id}"))
            .json_body(&json!({ "delete_message_seconds": delete_message_seconds }))?;
        self.execute_raw(request).await?;
        Ok(())
    }

    pub async fn remove_ban(&self, guild_id: Id<GuildMarker>, user_id: Id<UserMarker>) -> Result<()> {
        self.execute_raw(Request::new(Method::DELETE, format!("/guilds/{guild_id}/bans/{user_id}"))).await?;
        Ok(())
    }

    pub async fn get_guild_roles(&self, guild_id: Id<GuildMarker>) -> Result<Vec<Role>> {
        self.execute_json(Request::new(Method::GET, format!("/guilds/{guild_id}/roles"))).await
    }

    pub async fn begin_guild_prune(&self, guild_id: Id<GuildMarker>, days: u32) -> Result<u32> {
        #[derive(serde::Deserialize)]
        struct PruneResult {
            pruned: u32,
        }
        let request = Request::new(Method::POST, format!("/guilds/{guild_id}/prune")).json_body(&json!({ "days": days }))?;
        let result: PruneResult = self.execute_json(request).await?;
        Ok(result.pruned)
    }
}
