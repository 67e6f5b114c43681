//! Redis query modules.

pub mod users;
