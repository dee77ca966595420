#![no_main]

use libfuzzer_sys::fuzz_target;
use std::io::Cursor;

use powertrace::analysis::{characterize, estimate_distribution, DistributionConfig};
use powertrace::loader::TraceLoader;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must either load or fail with an error, never panic
    let Ok(trace) = TraceLoader::default().load_reader(Cursor::new(data)) else {
        return;
    };

    // Whatever loads must be analyzable without panicking
    let _ = characterize(&trace);
    let _ = estimate_distribution(&trace, &DistributionConfig::default());
});
