//! Desktop monitor for the gesture feed.
//! It starts the `eframe` application and the `MonitorApp`.

use std::{env, sync::Arc};
use wandlink::{app::monitor_app::MonitorApp, config::Config};

fn main() -> eframe::Result<()> {
    let args: Vec<String> = env::args().collect();

    let config_result = if args.len() > 1 {
        let path = &args[1];
        println!("Loading configuration from {path}");
        Config::load(path)
    } else {
        Config::load("wandlink.conf").or_else(|_| Config::load("wandlink_default.conf"))
    };

    let config = config_result.unwrap_or_else(|e| {
        eprintln!("Error loading config: {e}. Using empty config.");
        Config::empty()
    });

    let config = Arc::new(config);
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Wand Monitor",
        native_options,
        Box::new(|cc| {
            let app = MonitorApp::new(cc, config);
            Ok(Box::new(app))
        }),
    )
}
