//! Main module for smc library functionality

pub mod error;
pub mod lexing;
pub mod loader;
pub mod model;
pub mod parsing;
pub mod testing;
pub mod token;
