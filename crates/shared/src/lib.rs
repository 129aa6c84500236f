//! Wire types exchanged with the contract analysis service.

pub mod domain;
pub mod error;
pub mod protocol;
