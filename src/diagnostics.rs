/// Log a tagged diagnostic line to the environment's console.
pub fn log_event(scope: &str, details: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&format!("[{scope}] {details}").into());
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("[{scope}] {details}");
}
