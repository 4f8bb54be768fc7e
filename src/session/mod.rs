//! Session management: authentication and the events that keep client
//! state consistent with the server session.

pub(crate) mod account;
mod auth;
pub(crate) mod core;
pub mod events;

pub use account::User;
pub use self::core::CloudSession;
pub use events::{SessionEvent, SessionEvents, SessionListener, SessionReset};
