// src/core/mod.rs

pub mod link;
pub mod price;
pub mod sanitize;

pub use link::CanonicalUrl;
