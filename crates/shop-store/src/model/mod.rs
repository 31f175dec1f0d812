//! Pure data structures persisted in the collection files, plus the DTOs used to
//! create, update and list them.

pub mod cart;
pub mod product;
pub mod query;

pub use cart::*;
pub use product::*;
pub use query::*;
