//! Stateless building blocks of the uploader window.

pub mod drop_zone;
pub mod file_info;
pub mod progress_bar;
pub mod status_message;

pub use drop_zone::DropZone;

use egui::Color32;

pub const ACCENT: Color32 = Color32::from_rgb(245, 158, 11);
pub const ACCENT_TINT: Color32 = Color32::from_rgb(255, 251, 235);
pub const SUCCESS: Color32 = Color32::from_rgb(22, 163, 74);
pub const ERROR: Color32 = Color32::from_rgb(220, 50, 50);
pub const IDLE_BORDER: Color32 = Color32::from_rgb(229, 231, 235);
