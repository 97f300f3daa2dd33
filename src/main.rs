mod actions;
mod app;
mod capture;
mod gallery;
mod ui;

use libadwaita as adw;

use adw::prelude::*;
use log::info;

const APP_ID: &str = "org.example.Snapshelf";

fn main() -> gtk4::glib::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting {} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    let app = adw::Application::builder().application_id(APP_ID).build();

    app.connect_activate(ui::build_ui);
    app.run()
}
