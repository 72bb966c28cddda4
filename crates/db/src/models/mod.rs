//! Row types and input DTOs.

pub mod book;
