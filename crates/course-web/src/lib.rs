//! course-studio Web Frontend
//!
//! Leptos-based WASM frontend: inline course/chapter editors for teachers and
//! the enroll button for students.

mod api;
mod app;
mod components;
mod pages;

pub use app::App;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wasm_bindgen::prelude::*;

/// Default directives; the browser has no `RUST_LOG`
const LOG_FILTER: &str = "info,course_core=debug,course_client=debug";

/// WASM entry point
#[wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    init_tracing();
    leptos::mount::mount_to_body(App);
}

/// Route `tracing` events to the dev-tools console
fn init_tracing() {
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_writer(tracing_web::MakeWebConsoleWriter::new());

    // a second call (hot reload) keeps the first subscriber
    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(LOG_FILTER))
        .with(fmt_layer)
        .try_init();
}
