//! Weather dashboard - terminal client for a weather/suggestion backend
//!
//! This library exposes the dashboard's modules for the binary and tests.

pub mod action;
pub mod api;
pub mod components;
pub mod display;
pub mod effect;
pub mod flows;
pub mod icons;
pub mod logging;
pub mod reducer;
pub mod state;
