//! Client library for the todo API.
//!
//! The rest of an application programs against the [`TodoStore`] contract and
//! never needs to know whether todos live in a local JSON file
//! ([`LocalStore`]) or behind the HTTP API ([`RemoteStore`]).
//!
//! [`TodoCoordinator`] sits on top of a store and keeps a cached snapshot of
//! the collection, applying mutations optimistically before the store call
//! resolves and reconciling with store truth once a burst of mutations has
//! settled.

mod coordinator;
mod error;
mod local;
mod remote;
mod store;

pub use coordinator::TodoCoordinator;
pub use error::ClientError;
pub use local::LocalStore;
pub use remote::RemoteStore;
pub use store::TodoStore;
