//! Z-score standardisation of market strength and breadth readings and
//! quadrant classification of the latest observation.

pub mod api;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod sentiment;
