//! Slide composition and rasterization.
//!
//! [`compose`] lays a slide out into a [`scene::SlideScene`] without touching pixels; [`cpu`]
//! paints scenes with `vello_cpu`; [`slide`] ties both to PNG output.

pub mod compose;
pub mod cpu;
pub mod format;
pub mod scene;
pub mod slide;
