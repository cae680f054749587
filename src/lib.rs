//! Nutrition Calculator (NutriCalc) Library
//!
//! Food-name resolution, nutrition scaling and a persisted search history.

pub mod build_info;
pub mod config;
pub mod db;
pub mod history;
pub mod mcp;
pub mod models;
pub mod nutrition;
pub mod tools;
