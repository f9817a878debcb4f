//! Bot command handlers.
//!
//! Each module exposes a `command(...)` constructor producing the
//! [`interactions::CommandDefinition`] registered at startup; collaborators
//! (provider clients, the store, the session) are injected there.

pub mod afk;
pub mod calc;
pub mod cat;
pub mod fact;
pub mod help;
pub mod joke;
pub mod meme;
pub mod ping;
pub mod remind;
pub mod schedule;
pub mod snipe;
pub mod trivia;
pub mod userinfo;

pub const CATEGORY_GENERAL: &str = "general";
pub const CATEGORY_FUN: &str = "fun";
pub const CATEGORY_UTILITY: &str = "utility";
