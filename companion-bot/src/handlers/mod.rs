//! Chain handlers.

mod chat_handler;

pub use chat_handler::{ChatHandler, ChatHandlerSettings};
