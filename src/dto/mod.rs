//! Wire payloads shared by the HTTP routes and the list controller.

pub mod users;
