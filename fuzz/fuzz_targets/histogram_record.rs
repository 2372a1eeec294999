#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&seconds, values)) = data.split_first() else {
        return;
    };
    let duration_secs = u64::from(seconds).max(1);

    let Ok(mut left) = loadwrk::metrics::LatencyHistogram::for_run(duration_secs) else {
        return;
    };
    let Ok(mut right) = loadwrk::metrics::LatencyHistogram::for_run(duration_secs) else {
        return;
    };

    for (index, chunk) in values.chunks_exact(8).take(256).enumerate() {
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(chunk);
        let value = u64::from_le_bytes(bytes);
        if index % 2 == 0 {
            left.record(value);
        } else {
            right.record(value);
        }
    }

    let expected = left.count().saturating_add(right.count());
    if left.merge(&right).is_ok() {
        debug_assert_eq!(left.count(), expected);
    }
    if !left.is_empty() {
        debug_assert!(left.min() >= 1);
        debug_assert!(left.percentile(0.5) <= left.max());
    }
});
