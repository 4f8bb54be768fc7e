//! # cloudlib
//!
//! Rust client library for a self-hosted cloud file manager.
//!
//! ## Features
//!
//! - **Session**: signup, login, logout and account deletion over a
//!   cookie-backed HTTP session.
//!   - A rejected session (HTTP 401) resets all client state before the
//!     error reaches the caller.
//! - **Filesystem Operations**:
//!   - List folders (`view`) and compute folder sizes.
//!   - Create folders, rename, move, duplicate and delete files/folders.
//!   - Upload from memory or disk; download to memory or disk.
//! - **Navigation State**:
//!   - Breadcrumb paths with prefix containment.
//!   - Back/forward history that drops the abandoned forward branch.
//!   - Observable selection, pending move, account and modal containers.
//!
//! ## Example: Basic Usage
//!
//! ```no_run
//! use cloudlib::{ClientConfig, CloudSession};
//!
//! # async fn example() -> cloudlib::Result<()> {
//! let session = CloudSession::connect(&ClientConfig::new("http://127.0.0.1:8080"))?;
//!
//! // Login opens the home folder in the navigation history
//! let user = session.login("alice@example.com", "password").await?;
//!
//! let listing = session.view(user.personal_folder_id, false).await?;
//! for node in listing.sorted_nodes() {
//!     println!("{} ({:?})", node.name(), node.kind());
//! }
//!
//! // Upload a file into the home folder
//! session.upload_file("notes.txt", user.personal_folder_id).await?;
//!
//! session.logout().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Observing Session Loss
//!
//! ```no_run
//! use std::sync::Arc;
//! use cloudlib::{ClientConfig, CloudSession, SessionEvent};
//!
//! # fn example() -> cloudlib::Result<()> {
//! let session = CloudSession::connect(&ClientConfig::load(None)?)?;
//! session.events().subscribe(Arc::new(|event: &SessionEvent| {
//!     if *event == SessionEvent::AuthorizationLost {
//!         eprintln!("please log in again");
//!     }
//! }));
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod fs;
pub mod http;
pub mod path;
pub mod session;
pub mod state;

// Re-export commonly used types
pub use config::ClientConfig;
pub use error::{CloudError, Result};
pub use fs::{File, FileContent, FileType, Folder, Listing, Node, NodeKey, NodeKind};
pub use path::{Path, PathEntry};
pub use session::{CloudSession, SessionEvent, SessionListener, User};
pub use state::{AppState, ModalState, SelectionMode};
