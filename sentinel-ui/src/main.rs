mod app;
mod bridge;
mod chart;
mod logging;
mod view;

use app::App;
use leptos::*;

fn main() {
    logging::init_logging();
    mount_to_body(|| view! { <App/> });
}
