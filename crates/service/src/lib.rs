//! Service layer for the user registry.
//! - `storage`: whole-document JSON file persistence.
//! - `users`: user model, patch rules and the lock-guarded repository.
//! - `errors`: error type shared by both.

pub mod errors;
pub mod storage;
pub mod users;
