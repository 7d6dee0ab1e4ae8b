#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(doc) = ibdoc::from_bytes(data) {
        let xml = ibdoc::to_string(&doc);
        let reparsed = ibdoc::from_str(&xml);
        assert_eq!(reparsed.ok(), Some(doc), "render did not round trip:\n{xml}");
    }
});
