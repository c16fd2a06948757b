//! Infrastructure layer - database bootstrap, seeding, state construction, error mapping.

pub mod db;
pub mod db_errors;
pub mod seed;
pub mod state;
