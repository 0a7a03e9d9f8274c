use gemcascade::assets::AssetCache;
use gemcascade::game::Settings;
use gemcascade::ui::window;
use gtk4::prelude::*;
use gtk4::Application;
use std::sync::Arc;

const APP_ID: &str = "org.gemcascade.GemCascade";

fn init_logging() {
    env_logger::init();
}

fn main() -> glib::ExitCode {
    init_logging();

    let settings = Settings::load_from(&window::settings_path());
    if Settings::is_debug_mode() {
        log::debug!(target: "main", "Using settings {:?}", settings);
    }

    // Assets must be complete before any window exists.
    let assets = match AssetCache::initialize(&settings.asset_dir) {
        Ok(assets) => Arc::new(assets),
        Err(err) => {
            log::error!(target: "main", "Startup aborted: {}", err);
            eprintln!("gemcascade: {}", err);
            return glib::ExitCode::FAILURE;
        }
    };

    let app = Application::builder().application_id(APP_ID).build();
    app.connect_activate(move |app| window::build_ui(app, assets.clone(), &settings));
    app.run()
}
