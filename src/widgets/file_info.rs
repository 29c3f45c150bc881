use crate::upload::SelectedFile;
use crate::utils::file_size::FileSizeUtils;
use egui::RichText;

pub fn show(ui: &mut egui::Ui, file: Option<&SelectedFile>) {
    let Some(file) = file else {
        return;
    };

    ui.add_space(10.0);
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label("Selected file:");
            ui.label(RichText::new(&file.name).strong());
        });
        ui.label(
            RichText::new(format!("Size: {}", FileSizeUtils::format_size(file.size)))
                .small()
                .color(ui.visuals().text_color().gamma_multiply(0.7)),
        );
    });
}
