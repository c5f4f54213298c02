//! Theme Module
//!
//! Colours and frame builders for the EventBoard desktop UI. The palette
//! keeps the warm brown/tan scheme: dark chrome around a light content area
//! where event cards sit.
//!
//! ```rust,ignore
//! use crate::egui_app::theme::{colors, styles};
//!
//! styles::apply_global_theme(ctx);
//! styles::card_frame(accent).show(ui, |ui| { /* card content */ });
//! ```

pub mod colors;
pub mod styles;

pub use colors::*;
pub use styles::*;
