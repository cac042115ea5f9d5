// ChatScribe - util/mod.rs
//
// Cross-cutting utilities: constants, errors, logging.

pub mod constants;
pub mod error;
pub mod logging;
