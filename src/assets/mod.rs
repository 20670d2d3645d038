//! Fonts, images and QR codes.
//!
//! Every asset has a fallback chain ending in something that cannot fail, so a missing file
//! degrades a slide instead of aborting the run.

pub mod decode;
pub mod fonts;
pub mod provider;
pub mod qr;
