//! NutriCalc Tools module
//!
//! MCP tool implementations for the nutrition calculator.

pub mod history;
pub mod lookup;
pub mod status;
