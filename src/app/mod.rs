//! The `app` module holds the `wand_monitor` window: `MonitorApp` polls the
//! gesture receiver once per frame and drives a practice recipe with it.

pub mod monitor_app;
pub mod monitor_error;
pub mod recipe_config;
