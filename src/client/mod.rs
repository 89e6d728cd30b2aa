//! List controller for the users table.
//!
//! [`UserListController`] owns the view state, debounces search input and
//! keeps a single list request in flight; the UI talks to it through a
//! [`UserListHandle`].

mod api;
mod controller;
mod debounce;
mod error;
mod state;

pub use api::{HttpUsersApi, UsersApi};
pub use controller::{ControllerConfig, ListCommand, UserListController, UserListHandle};
pub use debounce::Debouncer;
pub use error::{ClientError, ClientResult};
pub use state::{LIMIT_OPTIONS, LoadStatus, LoadTicket, PendingLoad, UserListState};
