//! Utility functions shared by the analyzer and rule implementations.

pub mod allowance;

#[doc(inline)]
pub use allowance::{check_allow, AllowCheck};
