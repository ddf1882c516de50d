//! End-to-end scenarios for packed line tokens: lexer hand-off, lookup,
//! cursor walks and renderer expansion.

use std::sync::{Arc, Mutex, Once};

use line_tokens::{
    ColorId, Error, FontStyle, LanguageId, LineTokens, LogLevel, MalformedReason,
    StandardTokenType, TokenMetadata, ViewToken, set_log_callback,
};
use tracing::{debug, info};

fn setup_test_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

fn meta(token_type: StandardTokenType, foreground: u16) -> TokenMetadata {
    TokenMetadata::pack(
        LanguageId::new(1),
        token_type,
        FontStyle::empty(),
        ColorId::new(foreground),
        ColorId::DEFAULT_BACKGROUND,
    )
}

/// Tokens starting at 0, 5 and 9 over a 12 byte line.
fn three_tokens() -> LineTokens {
    LineTokens::from_tokens(
        [
            (0, meta(StandardTokenType::Other, 10)),
            (5, meta(StandardTokenType::String, 11)),
            (9, meta(StandardTokenType::Comment, 12)),
        ],
        "AAAAABBBBCCC",
    )
}

fn ranges(tokens: &[ViewToken]) -> Vec<(usize, usize)> {
    tokens.iter().map(|t| (t.start, t.end)).collect()
}

#[test]
fn boundary_offsets_belong_to_starting_token() {
    setup_test_logging();
    let line = three_tokens();
    let found: Vec<usize> = (0..=12)
        .map(|offset| line.find_token_index_at_offset(offset).unwrap())
        .collect();
    debug!(?found, "lookup table");
    assert_eq!(found, vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 2, 2, 2, 2]);
}

#[test]
fn inflate_whole_line() {
    setup_test_logging();
    let line = three_tokens();
    let inflated = line.inflate();
    assert_eq!(ranges(&inflated), vec![(0, 5), (5, 9), (9, 12)]);
    assert_eq!(inflated[1].token_type(), StandardTokenType::String);
    assert_eq!(inflated[2].foreground_id(), ColorId::new(12));
}

#[test]
fn slice_clips_and_shifts_wrapped_fragment() {
    setup_test_logging();
    let line = three_tokens();
    let sliced = line.slice_and_inflate(3, 10, -3);
    info!(?sliced, "fragment tokens");
    assert_eq!(ranges(&sliced), vec![(0, 2), (2, 6), (6, 7)]);
    let colors: Vec<ColorId> = sliced.iter().map(ViewToken::foreground_id).collect();
    assert_eq!(colors, vec![ColorId::new(10), ColorId::new(11), ColorId::new(12)]);
}

#[test]
fn empty_line_has_no_tokens() {
    setup_test_logging();
    let line = LineTokens::new(Vec::new(), "");
    assert_eq!(line.token_count(), 0);
    assert!(line.first_token().is_none());
    assert!(line.last_token().is_none());
    assert!(line.inflate().is_empty());
    assert_eq!(line.find_token_index_at_offset(0), Err(Error::EmptyLine));
}

#[test]
fn comment_detection_for_bracket_matching() {
    setup_test_logging();
    // `if (a) // (b)` with the trailing comment classified as Comment.
    let text = "if (a) // (b)";
    let line = LineTokens::from_tokens(
        [
            (0, meta(StandardTokenType::Other, 3)),
            (7, meta(StandardTokenType::Comment, 4)),
        ],
        text,
    );
    let brackets: Vec<usize> = text
        .char_indices()
        .filter(|(_, c)| *c == '(')
        .map(|(offset, _)| offset)
        .filter(|&offset| {
            line.find_token_at_offset(offset)
                .is_some_and(|t| t.token_type() != StandardTokenType::Comment)
        })
        .collect();
    assert_eq!(brackets, vec![3]);
}

#[test]
fn mixed_languages_on_one_line() {
    setup_test_logging();
    let html = LanguageId::new(1);
    let js = LanguageId::new(2);
    let base = TokenMetadata::default().with_foreground(ColorId::DEFAULT_FOREGROUND);
    let line = LineTokens::from_tokens(
        [
            (0, base.with_language_id(html)),
            (8, base.with_language_id(js).with_font_style(FontStyle::BOLD)),
            (13, base.with_language_id(html)),
        ],
        "<script>go();</script>",
    );
    let languages: Vec<LanguageId> = line.iter().map(|t| t.language_id()).collect();
    assert_eq!(languages, vec![html, js, html]);
    assert_eq!(line.language_id_at(1).unwrap(), js);
    let script = line.find_token_at_offset(10).unwrap();
    assert_eq!(script.text(), "go();");
    assert!(script.font_style().contains(FontStyle::BOLD));
}

#[test]
fn log_callback_reports_normalization_and_rejection() {
    setup_test_logging();
    let messages: Arc<Mutex<Vec<(LogLevel, String)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&messages);
    set_log_callback(move |level, msg| {
        if let Ok(mut guard) = sink.lock() {
            guard.push((level, msg.to_string()));
        }
    });

    let dropped = LineTokens::new(vec![0, 1, 0, 2], "");
    assert!(dropped.is_empty());

    let rejected = LineTokens::try_new(vec![0, 1, 30, 2], "short");
    assert_eq!(
        rejected,
        Err(Error::MalformedTokens(MalformedReason::StartBeyondLine {
            index: 1,
            start: 30,
            line_len: 5,
        }))
    );

    let logged = messages.lock().unwrap().clone();
    info!(?logged, "captured log messages");
    assert!(logged.iter().any(|(level, msg)| {
        *level == LogLevel::Debug && msg.contains("dropping 2 tokens")
    }));
    assert!(logged.iter().any(|(level, msg)| {
        *level == LogLevel::Warn && msg.contains("past line length 5")
    }));
}
