//! coffee-catalog GUI
//!
//! Desktop frontend for browsing and editing the coffee catalog. All
//! catalog logic lives in `coffee-lib`; this crate only renders it.

mod app;

mod views {
    pub mod edit;
    pub mod search;
}

mod widgets {
    pub mod cup_table;
    pub mod message_box;
}

use app::CoffeeApp;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = coffee_lib::settings::load_settings();
    let settings_path = coffee_lib::settings::settings_path();
    if !settings_path.exists()
        && let Err(e) = coffee_lib::settings::save_settings(&settings)
    {
        log::warn!("Failed to write {}: {}", settings_path.display(), e);
    }
    let conn = match coffee_lib::open_store(&settings) {
        Ok(conn) => conn,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    log::info!("Opened catalog at {}", settings.database_path.display());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Coffee catalog")
            .with_inner_size([960.0, 640.0])
            .with_min_inner_size([640.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "coffee-catalog",
        options,
        Box::new(|_cc| Ok(Box::new(CoffeeApp::new(conn, settings)))),
    )
}
