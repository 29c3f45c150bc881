use super::{ERROR, SUCCESS};
use egui::RichText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner<'a> {
    Error(&'a str),
    Success(&'a str),
}

/// Error wins over success; empty strings mean "nothing to say".
pub fn banner<'a>(error: &'a str, success: &'a str) -> Option<Banner<'a>> {
    if !error.is_empty() {
        Some(Banner::Error(error))
    } else if !success.is_empty() {
        Some(Banner::Success(success))
    } else {
        None
    }
}

pub fn show(ui: &mut egui::Ui, error: &str, success: &str) {
    let Some(banner) = banner(error, success) else {
        return;
    };

    let (text, color) = match banner {
        Banner::Error(text) => (text, ERROR),
        Banner::Success(text) => (text, SUCCESS),
    };

    ui.add_space(10.0);
    egui::Frame::none()
        .fill(color.gamma_multiply(0.08))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.vertical_centered(|ui| {
                ui.label(RichText::new(text).color(color));
            });
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_to_show_when_both_empty() {
        assert_eq!(banner("", ""), None);
    }

    #[test]
    fn success_shown_alone() {
        assert_eq!(banner("", "done"), Some(Banner::Success("done")));
    }

    #[test]
    fn error_takes_priority() {
        assert_eq!(banner("boom", "done"), Some(Banner::Error("boom")));
        assert_eq!(banner("boom", ""), Some(Banner::Error("boom")));
    }
}
