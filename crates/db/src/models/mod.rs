//! Row structs and DTOs, one module per table.

pub mod category;
pub mod list;
pub mod product;
pub mod tag;
pub mod user;
