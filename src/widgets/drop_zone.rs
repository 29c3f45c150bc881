use super::{ACCENT, ACCENT_TINT, IDLE_BORDER};
use crate::upload::{FileSelection, FileValidator};
use egui::{CursorIcon, RichText, Sense, Stroke};
use log::{info, warn};
use rfd::FileDialog;
use std::path::PathBuf;

/// Drag-and-drop target that doubles as a file picker button.
///
/// Holds no path of its own: `dropped_files` lives for a single frame and
/// every click opens a fresh picker, so a rejected path is gone as soon as
/// it has been validated.
#[derive(Debug, Default)]
pub struct DropZone {
    is_drag_over: bool,
}

impl DropZone {
    pub fn is_drag_over(&self) -> bool {
        self.is_drag_over
    }

    /// Runs a dropped or picked path through validation.
    pub fn handle_candidate(&self, path: PathBuf) -> FileSelection {
        match FileValidator::validate(&path) {
            Ok(file) => {
                info!("Selected {} ({} bytes)", file.name, file.size);
                FileSelection::Accepted(file)
            }
            Err(e) => {
                warn!("Rejected {}: {}", path.display(), e);
                FileSelection::Rejected(e.to_string())
            }
        }
    }

    pub fn show(&mut self, ui: &mut egui::Ui) -> Option<FileSelection> {
        let (hovering, dropped) = ui.ctx().input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.first().and_then(|f| f.path.clone()),
            )
        });
        self.is_drag_over = hovering;

        let (border, fill) = if self.is_drag_over {
            (ACCENT, ACCENT_TINT)
        } else {
            (IDLE_BORDER, egui::Color32::TRANSPARENT)
        };

        let response = egui::Frame::none()
            .stroke(Stroke::new(2.0, border))
            .fill(fill)
            .rounding(8.0)
            .inner_margin(24.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("📁").size(32.0).color(ACCENT));
                    ui.add_space(8.0);
                    ui.label(RichText::new("Select your ONNX model").strong());
                    ui.label("Drag & drop your file here or click to browse");
                    ui.label(RichText::new("Only .onnx files accepted").small().weak());
                });
            })
            .response
            .interact(Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);

        let mut candidate = dropped;
        if response.clicked() {
            if let Some(path) = FileDialog::new()
                .add_filter("ONNX model", &["onnx"])
                .pick_file()
            {
                candidate = Some(path);
            }
        }

        candidate.map(|path| self.handle_candidate(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn accepted_candidate_carries_name_and_size() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("yolo.onnx");
        fs::write(&path, b"onnx").unwrap();

        let zone = DropZone::default();
        match zone.handle_candidate(path.clone()) {
            FileSelection::Accepted(file) => {
                assert_eq!(file.path, path);
                assert_eq!(file.name, "yolo.onnx");
                assert_eq!(file.size, 4);
            }
            other => panic!("expected acceptance, got {:?}", other),
        }
    }

    #[test]
    fn rejection_does_not_leak_into_the_next_candidate() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("yolo.onnx");
        fs::write(&good, b"onnx").unwrap();

        let zone = DropZone::default();
        let selection = zone.handle_candidate(dir.path().join("weights.pth"));
        assert_eq!(
            selection,
            FileSelection::Rejected("Only .onnx files are accepted".to_string())
        );

        assert!(matches!(
            zone.handle_candidate(good),
            FileSelection::Accepted(_)
        ));
        assert!(!zone.is_drag_over());
    }
}
