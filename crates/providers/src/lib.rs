//! Third-party data provider clients.
//!
//! Small REST clients for the public APIs the bot's fun commands draw from.
//! Each carries its own bounded timeout so a slow provider only delays its
//! own command, never the dispatcher.

mod cat;
mod error;
mod fact;
mod joke;
mod meme;
mod trivia;

pub use cat::{CatClient, CatImage};
pub use error::ProviderError;
pub use fact::{Fact, FactClient};
pub use joke::{Joke, JokeClient};
pub use meme::{Meme, MemeClient};
pub use trivia::{TriviaClient, TriviaQuestion};
