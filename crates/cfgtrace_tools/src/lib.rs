//! Command-line front end for `cfgtrace`.

pub mod cli;
pub mod render;
pub mod request;
