//! egui Native Desktop App Module
//!
//! Desktop front end for EventBoard. Views read from the shared
//! [`Store`](crate::client::Store) and dispatch its actions onto a tokio
//! runtime; the store talks to whichever backend adapter the configuration
//! selects.
//!
//! # Module Structure
//!
//! ```text
//! egui_app/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Binary entry point
//! ├── config.rs       - TOML file and environment configuration
//! ├── state/          - View state, form buffers, action dispatch, toasts
//! ├── theme/          - Colours and frame builders
//! └── views/          - Top bar, login, events, event form, account
//! ```
//!
//! # Example
//!
//! ```text
//! EVENTBOARD_BACKEND=memory cargo run --bin eventboard
//! ```

pub mod config;
pub mod state;
pub mod theme;
pub mod views;

pub use config::Config;
pub use state::AppState;
