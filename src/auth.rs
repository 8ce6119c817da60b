//! Auth-domain identifiers and opaque token material.

pub mod id;
pub mod token;

pub use id::*;
pub use token::*;
