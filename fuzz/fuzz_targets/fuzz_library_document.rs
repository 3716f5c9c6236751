#![no_main]

use knitrow::store::Library;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Any document that parses must serialize back and parse the same.
    if let Ok(library) = serde_json::from_slice::<Library>(data) {
        let json = serde_json::to_string(&library).expect("library serializes");
        let again: Library = serde_json::from_str(&json).expect("serialized library parses");
        assert_eq!(again, library);
    }
});
