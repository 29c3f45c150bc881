use super::ACCENT;

/// Maps a 0..=100 percentage onto the bar's 0..=1 fill.
pub fn fill_fraction(progress_percent: f32) -> f32 {
    (progress_percent / 100.0).clamp(0.0, 1.0)
}

pub fn show(ui: &mut egui::Ui, progress_percent: f32) {
    ui.add_space(10.0);
    ui.add(
        egui::ProgressBar::new(fill_fraction(progress_percent))
            .desired_width(ui.available_width())
            .fill(ACCENT)
            .animate(false),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_proportional_and_bounded() {
        assert_eq!(fill_fraction(0.0), 0.0);
        assert_eq!(fill_fraction(25.0), 0.25);
        assert_eq!(fill_fraction(100.0), 1.0);
        assert_eq!(fill_fraction(140.0), 1.0);
        assert_eq!(fill_fraction(-5.0), 0.0);
    }
}
