//! Table definitions for `users`, `genres`, `problems` and `results`.
//!
//! `created_at` on every table defaults to the database clock when an insert
//! leaves it `NotSet`.

pub mod genre;
pub mod problem;
pub mod result;
pub mod user;
