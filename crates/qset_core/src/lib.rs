//! Question-set domain primitives.
//!
//! This crate owns the QSet data model, the object-store key layout, and the
//! repository that traverses it. It excludes AWS SDK and Lambda runtime
//! concerns; those live in `qset_lambda`, which injects a concrete
//! [`store::ObjectStore`] into [`repository::QSetRepository`].

pub mod error;
pub mod listing;
pub mod model;
pub mod repository;
pub mod storage_keys;
pub mod store;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;
