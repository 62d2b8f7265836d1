//! Formatting helpers shared by view models and templates

pub mod date;
pub mod html;
