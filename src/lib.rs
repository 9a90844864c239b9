//! Demo host of the marquee label: command line, configuration file
//! and, with the `gtk` feature, a GTK4 window showing a [`widgets::marquee_view::MarqueeView`].

#[cfg(feature = "gtk")]
pub mod app;
pub mod cli;
pub mod config;
#[cfg(feature = "gtk")]
pub mod widgets;
