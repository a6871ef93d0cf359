pub fn set_panic_hook() {
    // When the `console_error_panic_hook` feature is enabled, we can call the
    // `set_panic_hook` function at least once during initialization, and then
    // we will get better error messages if our code ever panics.
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

static LOGGER: std::sync::Once = std::sync::Once::new();

pub fn init_logger() {
    LOGGER.call_once(|| wasm_logger::init(wasm_logger::Config::default()));
}
