//! Service layer providing business-oriented operations on top of models.
//! - Separates business rules (uniqueness, immutable keys) from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Repositories are traits so the HTTP layer can be exercised without a database.

pub mod errors;
pub mod student;
#[cfg(test)]
pub mod test_support;
