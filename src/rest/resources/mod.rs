//! The typed resource surface: thin wrappers that build a path,
//! optionally attach a JSON body, and execute through [`super::engine::RestEngine`].
//!
//! Each submodule adds inherent methods directly onto `RestEngine<T>` rather
//! than introducing a second "resource" type — there is exactly one thing
//! that executes requests, and these are mechanical one-liners over it.

pub mod channels;
pub mod commands;
pub mod guilds;
pub mod interactions;
pub mod users;
pub mod webhooks;
