#![forbid(unsafe_code)]

pub mod greet;
pub mod version;
