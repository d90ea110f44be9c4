//! Tokens module orchestrator following the RSB module specification.
//!
//! Downstream code imports the token table from here while the
//! implementation details live in the private `core` module.

mod core;

pub use self::core::{FONT_STACKS, TokenTable, font_stack, is_hex_color};

pub(crate) use self::core::numeric;
