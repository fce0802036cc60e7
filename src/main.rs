#[cfg(target_arch = "wasm32")]
use leptos::prelude::mount_to_body;
#[cfg(target_arch = "wasm32")]
use taskdesk_web::{
    app::App,
    app_lib::{config::AppConfig, logging, theme},
};

#[cfg(target_arch = "wasm32")]
pub fn main() {
    let config = AppConfig::load();
    if let Err(err) = logging::init(config.log_level()) {
        web_sys::console::error_1(&format!("failed to initialize logging: {err}").into());
    }
    theme::initialize_appearance();
    mount_to_body(App);
}

#[cfg(not(target_arch = "wasm32"))]
pub fn main() {}
