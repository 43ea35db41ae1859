//! Persistence models for the student portal.
//! - `student`: the SeaORM entity backing the `students` table
//! - `db`: pooled connection setup

pub mod errors;
pub mod db;
pub mod student;
