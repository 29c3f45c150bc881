use eframe::CreationContext;
use log::{error, info, warn};
use zant_codegen::{CodegenConfig, CodegenUploader};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, warnings) = CodegenConfig::from_env();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    for warning in &warnings {
        warn!("{}", warning);
    }

    let uploader = CodegenUploader::from_config(&config).map_err(|e| {
        error!("Cannot start uploader: {}", e);
        e
    })?;

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([480.0, 620.0])
            .with_min_inner_size([360.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    info!("Starting Zant Codegen");
    eframe::run_native(
        "Zant Codegen",
        options,
        Box::new(move |_cc: &CreationContext| Box::new(uploader)),
    )?;
    Ok(())
}
