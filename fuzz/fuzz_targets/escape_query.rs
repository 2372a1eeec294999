#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        let escaped = loadwrk::fuzzing::escape_url_query_input(input);
        match input.split_once('?') {
            Some((base, _)) => {
                debug_assert!(escaped.starts_with(base));
                debug_assert_eq!(
                    escaped.matches('&').count(),
                    input.split_once('?').map_or(0, |(_, query)| query.matches('&').count())
                );
            }
            None => debug_assert_eq!(escaped, input),
        }
    }
});
