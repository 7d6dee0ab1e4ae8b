#![no_main]
use ibdoc::{ContentMode, Editor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Some((&selector, rest)) = data.split_first() else {
        return;
    };
    let Ok(name) = std::str::from_utf8(rest) else {
        return;
    };
    let modes = ContentMode::ALL;
    let mode = modes[usize::from(selector) % modes.len()];

    let mut doc = ibdoc::template::launch_screen();
    let before = doc.clone();
    let mut editor = Editor::new(&mut doc);
    if editor.attach_image(name, mode).is_ok() {
        let _ = editor.detach_image(name);
        if name != ibdoc::template::BACKGROUND_IMAGE_NAME {
            assert_eq!(doc, before);
        }
    }
});
