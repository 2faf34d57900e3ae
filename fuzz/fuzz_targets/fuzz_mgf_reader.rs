#![no_main]

use libfuzzer_sys::fuzz_target;
use specnet::config::NetworkConfig;
use specnet::matching::generate_all_matches;
use specnet::mgf::MgfReader;

fuzz_target!(|data: &[u8]| {
    // Malformed input must surface as an error, never a panic
    let mut spectra = Vec::new();
    for result in MgfReader::new(data).take(100) {
        match result {
            Ok(spectrum) => spectra.push(spectrum),
            Err(_) => break,
        }
    }

    // Whatever parsed must also survive scoring, including NaN or infinite values
    if spectra.len() <= 20 {
        let config = NetworkConfig::new(0.02, 0.0, 5, 5);
        let _ = generate_all_matches(&spectra, &config);
    }
});
