//! User resource wrappers.

use reqwest::Method;

use crate::error::Result;
use crate::model::{Id, User, UserMarker};
use crate::transport::HttpTransport;

use super::super::engine::{Request, RestEngine};

impl<T: HttpTransport> RestEngine<T> {
    pub async fn get_current_user(&self) -> Result<User> {
        self.execute_json(Request::new(Method::GET, "/users/@me")).await
    }

    pub async fn get_user(&self, user_id: Id<UserMarker>) -> Result<User> {
        self.execute_json(Request::new(Method::GET, format!("/users/{user_id}"))).await
    }

    pub async fn leave_guild(&self, guild_id: Id<crate::model::GuildMarker>) -> Result<()> {
        self.execute_raw(Request::new(Method::DELETE, format!("/users/@me/guilds/{guild_id}"))).await?;
        Ok(())
    }
}
