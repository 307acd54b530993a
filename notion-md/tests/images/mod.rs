//! Image handling through the converter.

mod files;
