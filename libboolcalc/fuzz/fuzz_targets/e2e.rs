#![no_main]

use libboolcalc::Engine;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // One engine per input, fed a whole session of lines.
    let mut engine = Engine::new();
    for line in data.lines().take(64) {
        let _ = engine.process(line);
    }
});
