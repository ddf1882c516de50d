//! Renderer-facing tokens expanded from the packed form.
//!
//! The functions here work directly on a packed buffer (`[start, metadata]`
//! pairs) so a renderer holding only the raw slice can use them without a
//! [`LineTokens`](super::LineTokens).

use std::ops::Range;

use crate::metadata::{ColorId, FontStyle, LanguageId, StandardTokenType, TokenMetadata};

/// A self-contained token ready for glyph run construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ViewToken {
    pub start: usize,
    pub end: usize,
    pub metadata: TokenMetadata,
}

impl ViewToken {
    #[must_use]
    pub fn new(start: usize, end: usize, metadata: TokenMetadata) -> Self {
        debug_assert!(start <= end, "view token range must be start <= end");
        Self {
            start,
            end,
            metadata,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub const fn language_id(&self) -> LanguageId {
        self.metadata.language_id()
    }

    #[must_use]
    pub const fn token_type(&self) -> StandardTokenType {
        self.metadata.token_type()
    }

    #[must_use]
    pub const fn font_style(&self) -> FontStyle {
        self.metadata.font_style()
    }

    #[must_use]
    pub const fn foreground_id(&self) -> ColorId {
        self.metadata.foreground()
    }

    #[must_use]
    pub const fn background_id(&self) -> ColorId {
        self.metadata.background()
    }
}

/// Index of the token containing `offset`.
///
/// Binary search over the start offsets (even slots) of a packed buffer. A
/// token owns `[start, next_start)`; offsets at or past the last start map to
/// the last token. With repeated starts the last of them wins.
///
/// The buffer must hold at least one token.
#[must_use]
pub fn find_index_in_segments(tokens: &[u32], offset: usize) -> usize {
    let count = tokens.len() >> 1;
    debug_assert!(count > 0, "search requires at least one token");

    let mut low = 0usize;
    let mut high = count.saturating_sub(1);
    while low < high {
        let mid = low + (high - low).div_ceil(2);
        if tokens[mid << 1] as usize > offset {
            high = mid - 1;
        } else {
            low = mid;
        }
    }
    low
}

/// Expand every token of a packed buffer.
#[must_use]
pub fn inflate(tokens: &[u32], line_len: usize) -> Vec<ViewToken> {
    let mut out = Vec::with_capacity(tokens.len() >> 1);
    inflate_into(tokens, line_len, &mut out);
    out
}

/// Expand every token into `out`, replacing its contents.
pub fn inflate_into(tokens: &[u32], line_len: usize, out: &mut Vec<ViewToken>) {
    out.clear();
    let count = tokens.len() >> 1;
    out.reserve(count);

    for i in 0..count {
        let start = tokens[i << 1] as usize;
        let end = if i + 1 < count {
            tokens[(i + 1) << 1] as usize
        } else {
            line_len
        };
        let metadata = TokenMetadata::from_bits(tokens[(i << 1) + 1]);
        out.push(ViewToken::new(start, end, metadata));
    }
}

/// Expand the tokens overlapping `[start, end)`, clipped to that window and
/// shifted by `delta`.
///
/// The window is first clamped to the line, and for a negative `delta` its
/// start is raised to `-delta` so every produced offset is an exact
/// translation. Boundary tokens are truncated and tokens outside the window
/// are skipped.
#[must_use]
pub fn slice_and_inflate(
    tokens: &[u32],
    start: usize,
    end: usize,
    delta: isize,
    line_len: usize,
) -> Vec<ViewToken> {
    let mut out = Vec::new();
    slice_and_inflate_into(tokens, start, end, delta, line_len, &mut out);
    out
}

/// Like [`slice_and_inflate`], writing into `out` and replacing its contents.
pub fn slice_and_inflate_into(
    tokens: &[u32],
    start: usize,
    end: usize,
    delta: isize,
    line_len: usize,
    out: &mut Vec<ViewToken>,
) {
    out.clear();
    let count = tokens.len() >> 1;
    let end = end.min(line_len);
    // Offsets that would shift below 0 fall outside the visible fragment.
    let start = if delta < 0 {
        start.max(delta.unsigned_abs())
    } else {
        start
    };
    if count == 0 || start >= end {
        return;
    }

    let first = find_index_in_segments(tokens, start);
    for i in first..count {
        let token_start = tokens[i << 1] as usize;
        if token_start >= end {
            break;
        }
        let token_end = if i + 1 < count {
            tokens[(i + 1) << 1] as usize
        } else {
            line_len
        };

        let clipped_start = token_start.max(start);
        let clipped_end = token_end.min(end);
        if clipped_start >= clipped_end {
            continue;
        }

        let metadata = TokenMetadata::from_bits(tokens[(i << 1) + 1]);
        out.push(ViewToken::new(
            clipped_start.saturating_add_signed(delta),
            clipped_end.saturating_add_signed(delta),
            metadata,
        ));
    }
}
