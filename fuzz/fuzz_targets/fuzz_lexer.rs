#![no_main]

use libfuzzer_sys::fuzz_target;
use streamjson::{Locator, ParserOptions};

/// Splits `text` into at most `cuts.len() + 1` pieces at the byte offsets
/// in `cuts`, snapped to char boundaries so no chunk ever splits inside a
/// UTF-8 sequence (chunk boundaries may still land anywhere inside a JSON
/// token, which is the behaviour under test).
fn split_at(text: &str, cuts: &[u8]) -> Vec<String> {
    let mut offsets: Vec<usize> = cuts
        .iter()
        .map(|&c| {
            let mut o = (c as usize) % (text.len() + 1);
            while o > 0 && !text.is_char_boundary(o) {
                o -= 1;
            }
            o
        })
        .collect();
    offsets.sort_unstable();
    offsets.dedup();

    let mut pieces = Vec::with_capacity(offsets.len() + 1);
    let mut start = 0;
    for end in offsets {
        pieces.push(text[start..end].to_owned());
        start = end;
    }
    pieces.push(text[start..].to_owned());
    pieces
}

fuzz_target!(|data: (String, Vec<u8>)| {
    let (text, cuts) = data;

    let whole = {
        let mut locator = Locator::with_options(&ParserOptions::default());
        let (mut records, err) = locator.feed(&text);
        let (tail, finish_err) = locator.finish();
        records.extend(tail);
        (records, err.or(finish_err))
    };

    let chunked = {
        let mut locator = Locator::with_options(&ParserOptions::default());
        let mut records = Vec::new();
        let mut err = None;
        for piece in split_at(&text, &cuts) {
            let (batch, e) = locator.feed(&piece);
            records.extend(batch);
            if e.is_some() {
                err = e;
                break;
            }
        }
        if err.is_none() {
            let (tail, e) = locator.finish();
            records.extend(tail);
            err = e;
        }
        (records, err)
    };

    // Splitting the same source text at different chunk boundaries must
    // not change whether it lexes, nor the sequence of tokens produced.
    assert_eq!(whole.1.is_some(), chunked.1.is_some());
    if whole.1.is_none() {
        assert_eq!(whole.0.len(), chunked.0.len());
        for (a, b) in whole.0.iter().zip(chunked.0.iter()) {
            assert_eq!(a.kind(), b.kind());
            assert_eq!(a.value(), b.value());
            assert_eq!(a.path(), b.path());
            assert_eq!(a.pointer(), b.pointer());
        }
    }
});
