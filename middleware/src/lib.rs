//! Middleware wrapped around the handler chain.
//!
//! - [`LoggingMiddleware`] – logs each inbound message and the final response
//! - [`AutoModMiddleware`] – spam/link moderation for guild messages; stops the chain when a
//!   message is flagged

mod automod_middleware;
mod logging;

#[cfg(test)]
mod test;

pub use automod_middleware::AutoModMiddleware;
pub use logging::LoggingMiddleware;
