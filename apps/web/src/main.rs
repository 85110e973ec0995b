use tracing::error;

fn main() {
    dioxus::logger::initialize_default();

    #[cfg(target_arch = "wasm32")]
    if let Err(err) = noah_web::WebApp::new().launch(noah_web::app::App) {
        error!(error = %err, "Startup aborted");
        wasm_bindgen::throw_str(&err.to_string());
    }

    #[cfg(not(target_arch = "wasm32"))]
    error!("noah-web runs in the browser. Start it with `cargo xtask serve`.");
}
