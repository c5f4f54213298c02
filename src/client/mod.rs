//! Client Core
//!
//! Everything between the views and the backend: the adapter traits and
//! their HTTP/in-memory implementations, the shared state store, routing,
//! the auth-driven session bootstrap and user notices.

pub mod adapter;
pub mod http;
pub mod memory;
pub mod notice;
pub mod routes;
pub mod session;
pub mod store;

pub use adapter::{AdapterError, AdapterResult, AuthProvider, Backend, Collection};
pub use http::HttpBackend;
pub use memory::MemoryBackend;
pub use notice::{Notice, NoticeLevel, NoticeLog, Notifier};
pub use routes::{Route, Router};
pub use session::{drive_session, AuthPhase, AuthStateMachine, SessionHandle, Transition};
pub use store::{DeleteEvent, Mutation, SaveAccountDetails, SaveProfile, State, Store, StoreError, StoreResult};
