//! User records: wire/storage model and the lock-guarded repository over them.

pub mod domain;
pub mod repository;
