//! Fuzz target for packed line tokens.
//!
//! Arbitrary buffers go through the validating constructor; whatever it
//! accepts must survive every lookup, walk and slice without panicking.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use line_tokens::LineTokens;

#[derive(Arbitrary, Debug)]
struct Input {
    text: String,
    tokens: Vec<u32>,
    offsets: Vec<u16>,
    windows: Vec<(u16, u16, i16)>,
}

fuzz_target!(|input: Input| {
    let Ok(line) = LineTokens::try_new(input.tokens, input.text) else {
        return;
    };

    for offset in input.offsets {
        if let Some(token) = line.find_token_at_offset(usize::from(offset)) {
            assert!(token.start_offset() <= token.end_offset());
            assert!(token.end_offset() <= line.line_len());
            let _ = token.text();
        }
    }

    if let Some(mut cursor) = line.first_token() {
        let mut visited = 1;
        while cursor.next().is_some() {
            visited += 1;
        }
        assert_eq!(visited, line.token_count());
    }

    assert_eq!(line.inflate().len(), line.token_count());

    for (start, end, delta) in input.windows {
        let sliced = line.slice_and_inflate(start.into(), end.into(), delta.into());
        for pair in sliced.windows(2) {
            assert!(pair[0].end <= pair[1].start);
        }
    }
});
