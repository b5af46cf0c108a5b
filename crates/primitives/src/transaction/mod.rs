//! Change sets describing one edit of a document.
//!
//! A [`ChangeSet`] is a sequence of retain, delete and insert operations
//! covering the whole source document. Besides applying the edit to a rope,
//! it maps positions from the old document into the new one, which is how
//! spans survive edits.

mod changeset;
mod types;

pub use changeset::ChangeSet;
pub use types::{Bias, Change, Operation};

#[cfg(test)]
mod tests;
