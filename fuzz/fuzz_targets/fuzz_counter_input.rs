#![no_main]

use knitrow_core::counter::{CounterInput, create, validate};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = serde_json::from_slice::<CounterInput>(data) else {
        return;
    };

    let result = validate(&input);
    match create(&input) {
        Ok(counter) => {
            assert!(result.is_valid());
            assert_eq!(counter.current_row, 1);
            assert!(!counter.completed);

            // Walk a few rows; derived values must stay in range.
            let mut current = counter;
            for _ in 0..64 {
                let status = current.status();
                assert!(status.pattern_row >= 1 && status.pattern_row <= status.freq);
                if let Some(total) = status.total_rows {
                    assert!(current.current_row <= total);
                }
                current = current.advance();
            }
        }
        Err(_) => assert!(!result.is_valid()),
    }
});
