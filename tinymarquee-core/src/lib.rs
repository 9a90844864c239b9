//! This crate contains the marquee label engine:
//! it decides when a label overflows its bounds,
//! lays out the two copies of the text used for the seamless wraparound,
//! drives the scroll loop and computes the edge fade mask.
//!
//! Rendering, text measurement and task spawning are left to the host,
//! see [`text::TextMeasurer`] and [`runtime::Spawner`].

pub mod config;
pub mod graphics;
pub mod runtime;
pub mod scheduler;
pub mod text;
pub mod widgets;
