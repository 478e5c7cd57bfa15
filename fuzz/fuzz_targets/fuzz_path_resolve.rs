#![no_main]

use libfuzzer_sys::fuzz_target;
use pth_rs::Path;

fuzz_target!(|data: &[u8]| {
    let input = match std::str::from_utf8(data) {
        Ok(s) => s,
        Err(_) => return,
    };

    let path = Path::new(input);

    // String form must round-trip
    assert_eq!(Path::new(path.to_string()), path);

    // Lexical operations - should never panic
    let _ = path.basename();
    let _ = path.dirname();
    let _ = path.splitext();
    let _ = path.normpath();
    let _ = path.join(input);
    let _ = path.expand_vars();
});
