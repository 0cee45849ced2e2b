//! Public API for the grid-quant crate.
//!
//! This module provides the high-level API: the [`Quantizer`] builder, its
//! [`Quantization`] result and the [`QuantizeError`] error type.

mod builder;
mod error;

pub use builder::{Quantization, Quantizer};
pub use error::QuantizeError;
