/// Install the platform logger: `env_logger` natively (filtered by
/// `RUST_LOG`), the browser console at `Info` on the web.
///
/// Safe to call more than once.
pub fn init() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            log::warn!("Could not initialize logger: {}", e);
        }
    }
}
