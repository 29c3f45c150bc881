use super::CodegenUploader;
use crate::widgets::{file_info, progress_bar, status_message, ACCENT, SUCCESS};
use eframe::egui::{self, Color32, RichText};

const BUTTON_SIZE: [f32; 2] = [320.0, 40.0];

impl CodegenUploader {
    pub fn render(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(20.0);
                ui.vertical_centered(|ui| {
                    ui.heading(RichText::new("Zant Codegen").color(ACCENT).strong());
                    ui.add_space(5.0);
                    ui.label(
                        RichText::new("Generate code from your ONNX model")
                            .color(ui.visuals().text_color().gamma_multiply(0.7)),
                    );
                });

                ui.add_space(20.0);

                if let Some(selection) = self.drop_zone.show(ui) {
                    self.select_file(selection);
                }
                file_info::show(ui, self.state.selected_file.as_ref());

                ui.add_space(20.0);

                ui.vertical_centered(|ui| {
                    let generate_label = if self.state.is_uploading {
                        "Processing..."
                    } else {
                        "Generate Code"
                    };
                    let generate = ui.add_enabled(
                        self.state.can_generate(),
                        action_button(generate_label, ACCENT),
                    );
                    if generate.clicked() {
                        self.generate();
                    }

                    ui.add_space(8.0);

                    let download = ui.add_enabled(
                        self.state.download_ready,
                        action_button("Download Code", SUCCESS),
                    );
                    if download.clicked() {
                        self.download_generated();
                    }
                });

                if self.state.show_progress() {
                    progress_bar::show(ui, self.state.progress_percent);
                }
                status_message::show(ui, &self.state.error_text, &self.state.success_text);

                ui.add_space(20.0);
            });
        });
    }
}

fn action_button(label: &str, fill: Color32) -> egui::Button<'static> {
    egui::Button::new(RichText::new(label.to_string()).color(Color32::WHITE).strong())
        .fill(fill)
        .min_size(BUTTON_SIZE.into())
}
