//! Presentation: the static PNG figure and the interactive window.

pub mod figure;
pub mod panels;
pub mod plot;
