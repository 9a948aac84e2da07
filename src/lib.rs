//! Read benchmark results (sample size vs. elapsed time) and plot them.
//!
//! [`data`] turns a legacy text, CSV or JSON file into a [`data::Series`],
//! [`render`] writes it as a PNG and [`app`] optionally shows it in a window.

pub mod app;
pub mod data;
pub mod render;
pub mod state;
pub mod ui;
