#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(config) = loadwrk::fuzzing::run_config_from_toml(input) {
            debug_assert!(config.workers >= 1);
            debug_assert!(config.duration.as_secs() >= 1);
            debug_assert!(!config.request.url.is_empty());
        }
    }
});
