//! Format-agnostic tree algorithms.

pub mod assemble;
pub mod child_pages;
