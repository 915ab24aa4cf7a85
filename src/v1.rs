#![forbid(unsafe_code)]

pub mod hello;
