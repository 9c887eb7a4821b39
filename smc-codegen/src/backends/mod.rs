//! Backend implementations
//!
//! Each submodule exports one unit struct implementing [Backend](crate::Backend).

pub mod cpp;
pub mod dot;
pub mod json;
