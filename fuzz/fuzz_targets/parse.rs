#![no_main]
use libfuzzer_sys::fuzz_target;

use jsontree::{parse_tokens, to_value, tokenize, Limits, TokenKind};

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 reaches the tokenizer.
    if let Ok(s) = std::str::from_utf8(data) {
        // Looking for panics; errors are expected.
        let Ok(tokens) = tokenize(s) else { return };

        let eofs = tokens.iter().filter(|t| t.kind() == TokenKind::EndOfInput).count();
        assert_eq!(eofs, 1);
        assert!(tokens.windows(2).all(|w| w[0].span().end <= w[1].span().start));

        for limits in [Limits::default(), Limits::lenient()] {
            if let Ok(root) = parse_tokens(&tokens, &limits) {
                let _ = to_value(&root);
            }
        }
    }
});
