#![no_main]

use libboolcalc::Engine;
use libfuzzer_sys::{fuzz_target, Corpus};

fuzz_target!(|data: &str| -> Corpus {
    match Engine::new().process(data) {
        Ok(_) => Corpus::Keep,
        Err(_) => Corpus::Reject,
    }
});
