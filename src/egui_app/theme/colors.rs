//! Colour Constants
//!
//! Warm brown/tan palette shared by every view.

use eframe::egui::Color32;

/// Top bar background - Dark brown
pub const TOP_BAR_BG: Color32 = Color32::from_rgb(0x3E, 0x2A, 0x24);

/// Background behind the login form and loading screen - Deep brown
pub const BG_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Content area background - Off-white
pub const CONTENT_BG: Color32 = Color32::from_rgb(0xF7, 0xF2, 0xEC);

/// Event card background - Light tan
pub const CARD_BG: Color32 = Color32::from_rgb(0xEA, 0xDB, 0xC8);

/// Event card border - Muted brown
pub const CARD_BORDER: Color32 = Color32::from_rgb(0xC7, 0xB2, 0x9A);

/// Input field background
pub const INPUT_BG: Color32 = Color32::from_rgb(0xE6, 0xD7, 0xC7);

/// Hovered widgets
pub const HOVER: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Selection highlight
pub const SELECTION: Color32 = Color32::from_rgb(0x4A, 0x2E, 0x22);

/// Text on dark backgrounds
pub const TEXT_LIGHT: Color32 = Color32::from_rgb(0xF0, 0xE0, 0xD6);

/// Text on light backgrounds
pub const TEXT_DARK: Color32 = Color32::from_rgb(0x2F, 0x1E, 0x1A);

/// Secondary text color (muted)
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);

/// Tag chip background
pub const TAG_BG: Color32 = Color32::from_rgb(0xD8, 0xC0, 0xA8);

/// Accent color for primary buttons
pub const ACCENT: Color32 = Color32::from_rgb(0x5C, 0x3A, 0x2C);

/// Success color - Green
pub const SUCCESS: Color32 = Color32::from_rgb(0x4C, 0xAF, 0x50);

/// Error color - Red
pub const ERROR: Color32 = Color32::from_rgb(0xE5, 0x73, 0x73);

/// Destructive buttons
pub const DANGER: Color32 = Color32::from_rgb(0xB0, 0x3A, 0x2E);

/// Card stripe for events without a colour tag
pub const DEFAULT_EVENT_COLOR: Color32 = Color32::from_rgb(0x8B, 0x7B, 0x6B);
