//! Session domain module.
//!
//! A session is a durable, append-only conversation thread scoped to one
//! document, used to answer free-form follow-up questions with bounded
//! recent context.
//!
//! # Module Structure
//!
//! - `message`: turn types (`TurnRole`, `Turn`)
//! - `model`: the `Session` entity
//! - `repository`: repository trait for session persistence
//! - `manager`: session lifecycle and per-session serialization

mod manager;
mod message;
mod model;
mod repository;

pub use manager::{SessionManager, SessionRef};
pub use message::{Turn, TurnRole};
pub use model::{CONTEXT_WINDOW_TURNS, Session};
pub use repository::SessionRepository;
