//! HTTP request handlers, one module per resource.

pub mod ingredients;
pub mod recipes;
pub mod tags;
pub mod users;
