#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Word, trigram and query extraction must not panic on arbitrary text
    let lowered = data.to_lowercase();
    let _ = srcdex::utils::extract_words(&lowered);
    let _ = srcdex::utils::extract_trigrams(lowered.as_bytes(), 5_000);
    let _ = srcdex::query::QueryTerms::parse(data, 5_000);
    let _ = srcdex::query::filename::is_subsequence(data, &lowered);
});
