//! Packed token storage for one line.

use std::iter::FusedIterator;

use super::cursor::LineToken;
use super::view_token::{self, ViewToken};
use crate::error::{Error, MalformedReason, Result};
use crate::event::{LogLevel, emit_log};
use crate::metadata::{LanguageId, StandardTokenType, TokenMetadata};

/// The highlighting tokens of one line, packed two `u32`s per token.
///
/// Token `i` occupies slots `2i` (start offset) and `2i + 1` (metadata word).
/// End offsets are not stored: a token ends where the next one starts, and the
/// last token ends at the line length. Offsets are byte offsets into the line.
///
/// A `LineTokens` is immutable. When a line is edited or re-lexed the whole
/// value is replaced.
///
/// # Examples
///
/// ```
/// use line_tokens::LineTokens;
///
/// let line = LineTokens::new(vec![0, 0, 5, 0, 9, 0], "let x = 42;");
/// assert_eq!(line.token_count(), 3);
/// assert_eq!(line.find_token_index_at_offset(6).unwrap(), 1);
/// assert_eq!(line.token_end_offset(2).unwrap(), 11);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineTokens {
    tokens: Box<[u32]>,
    count: usize,
    text: String,
}

impl LineTokens {
    /// Wrap a lexer's packed buffer and the line it was produced from.
    ///
    /// The buffer is trusted: ordering and bounds are only checked by debug
    /// assertions. Tokens supplied for an empty line are dropped.
    #[must_use]
    pub fn new(tokens: impl Into<Box<[u32]>>, text: impl Into<String>) -> Self {
        let (tokens, text) = Self::normalize(tokens.into(), text.into());
        debug_assert!(
            validate(&tokens, text.len()).is_ok(),
            "malformed token buffer: {:?}",
            validate(&tokens, text.len())
        );
        let count = tokens.len() >> 1;
        Self {
            tokens,
            count,
            text,
        }
    }

    /// Like [`new`](Self::new), but checks the buffer against the line.
    ///
    /// The tokens must cover the whole line, so a non-empty line needs at
    /// least one token.
    pub fn try_new(tokens: impl Into<Box<[u32]>>, text: impl Into<String>) -> Result<Self> {
        let (tokens, text) = Self::normalize(tokens.into(), text.into());
        if let Err(reason) = validate(&tokens, text.len()) {
            emit_log(
                LogLevel::Warn,
                &format!("rejected token buffer for line of {} bytes: {reason}", text.len()),
            );
            return Err(reason.into());
        }
        let count = tokens.len() >> 1;
        Ok(Self {
            tokens,
            count,
            text,
        })
    }

    /// Pack `(start, metadata)` records into a new array.
    #[must_use]
    pub fn from_tokens<I>(records: I, text: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = (usize, TokenMetadata)>,
    {
        let records = records.into_iter();
        let mut tokens = Vec::with_capacity(records.size_hint().0 * 2);
        for (start, metadata) in records {
            debug_assert!(u32::try_from(start).is_ok(), "token start {start} exceeds u32");
            tokens.push(start as u32);
            tokens.push(metadata.bits());
        }
        Self::new(tokens, text)
    }

    fn normalize(tokens: Box<[u32]>, text: String) -> (Box<[u32]>, String) {
        if text.is_empty() && !tokens.is_empty() {
            emit_log(
                LogLevel::Debug,
                &format!("dropping {} tokens supplied for an empty line", tokens.len() >> 1),
            );
            return (Box::default(), text);
        }
        (tokens, text)
    }

    /// Number of tokens; 0 for an empty line.
    #[must_use]
    pub const fn token_count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The line these tokens describe.
    #[must_use]
    pub fn line_text(&self) -> &str {
        &self.text
    }

    /// Line length in bytes.
    #[must_use]
    pub fn line_len(&self) -> usize {
        self.text.len()
    }

    /// The raw packed buffer.
    #[must_use]
    pub fn tokens(&self) -> &[u32] {
        &self.tokens
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.count {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index,
                count: self.count,
            })
        }
    }

    /// `(start, end, metadata)` of a token known to be in range.
    pub(super) fn record(&self, index: usize) -> (usize, usize, TokenMetadata) {
        let start = self.tokens[index << 1] as usize;
        let end = self.end_unchecked(index);
        let metadata = TokenMetadata::from_bits(self.tokens[(index << 1) + 1]);
        (start, end, metadata)
    }

    fn end_unchecked(&self, index: usize) -> usize {
        if index + 1 < self.count {
            self.tokens[(index + 1) << 1] as usize
        } else {
            self.text.len()
        }
    }

    pub fn token_start_offset(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok(self.tokens[index << 1] as usize)
    }

    /// Start of the following token, or the line length for the last token.
    pub fn token_end_offset(&self, index: usize) -> Result<usize> {
        self.check_index(index)?;
        Ok(self.end_unchecked(index))
    }

    pub fn metadata_at(&self, index: usize) -> Result<TokenMetadata> {
        self.check_index(index)?;
        Ok(TokenMetadata::from_bits(self.tokens[(index << 1) + 1]))
    }

    pub fn language_id_at(&self, index: usize) -> Result<LanguageId> {
        Ok(self.metadata_at(index)?.language_id())
    }

    pub fn token_type_at(&self, index: usize) -> Result<StandardTokenType> {
        Ok(self.metadata_at(index)?.token_type())
    }

    /// Find the token containing `offset`.
    ///
    /// With tokens `[0, 5) [5, 9) [9, 12)`, offsets 0-4 give 0, 5-8 give 1,
    /// and 9 onwards (including the line length and beyond) give 2.
    pub fn find_token_index_at_offset(&self, offset: usize) -> Result<usize> {
        if self.count == 0 {
            return Err(Error::EmptyLine);
        }
        Ok(view_token::find_index_in_segments(&self.tokens, offset))
    }

    /// Cursor on the token containing `offset`, or `None` for an empty line.
    #[must_use]
    pub fn find_token_at_offset(&self, offset: usize) -> Option<LineToken<'_>> {
        let index = self.find_token_index_at_offset(offset).ok()?;
        Some(self.cursor(index))
    }

    fn cursor(&self, index: usize) -> LineToken<'_> {
        let (start, end, metadata) = self.record(index);
        LineToken::new(self, index, start, end, metadata)
    }

    /// A new cursor on token `index`.
    pub fn token_at(&self, index: usize) -> Result<LineToken<'_>> {
        self.check_index(index)?;
        Ok(self.cursor(index))
    }

    /// Move an existing cursor onto token `index` of this line.
    ///
    /// The cursor is overwritten in place (and retargeted to this array if it
    /// pointed elsewhere). On error it is left unchanged.
    pub fn token_at_into<'a, 'c>(
        &'a self,
        index: usize,
        dest: &'c mut LineToken<'a>,
    ) -> Result<&'c mut LineToken<'a>> {
        self.check_index(index)?;
        let (start, end, metadata) = self.record(index);
        dest.source = self;
        dest.reposition(index, start, end, metadata);
        Ok(dest)
    }

    #[must_use]
    pub fn first_token(&self) -> Option<LineToken<'_>> {
        if self.count == 0 {
            return None;
        }
        Some(self.cursor(0))
    }

    #[must_use]
    pub fn last_token(&self) -> Option<LineToken<'_>> {
        if self.count == 0 {
            return None;
        }
        Some(self.cursor(self.count - 1))
    }

    /// Iterate over all tokens as cursors.
    #[must_use]
    pub fn iter(&self) -> Tokens<'_> {
        Tokens {
            source: self,
            front: 0,
            back: self.count,
        }
    }

    /// Expand every token for rendering.
    #[must_use]
    pub fn inflate(&self) -> Vec<ViewToken> {
        view_token::inflate(&self.tokens, self.text.len())
    }

    /// Expand every token into a reused vector.
    pub fn inflate_into(&self, out: &mut Vec<ViewToken>) {
        view_token::inflate_into(&self.tokens, self.text.len(), out);
    }

    /// Expand the tokens overlapping `[start, end)`, clipped to the window and
    /// shifted by `delta`.
    ///
    /// Used for wrapped lines, where each visual fragment reports offsets
    /// relative to its own origin.
    #[must_use]
    pub fn slice_and_inflate(&self, start: usize, end: usize, delta: isize) -> Vec<ViewToken> {
        view_token::slice_and_inflate(&self.tokens, start, end, delta, self.text.len())
    }

    /// [`slice_and_inflate`](Self::slice_and_inflate) into a reused vector.
    pub fn slice_and_inflate_into(
        &self,
        start: usize,
        end: usize,
        delta: isize,
        out: &mut Vec<ViewToken>,
    ) {
        view_token::slice_and_inflate_into(&self.tokens, start, end, delta, self.text.len(), out);
    }
}

fn validate(tokens: &[u32], line_len: usize) -> std::result::Result<(), MalformedReason> {
    if tokens.len() % 2 != 0 {
        return Err(MalformedReason::OddLength { len: tokens.len() });
    }
    if u32::try_from(line_len).is_err() {
        return Err(MalformedReason::LineTooLong { line_len });
    }
    if tokens.is_empty() && line_len > 0 {
        return Err(MalformedReason::MissingTokens { line_len });
    }
    let mut prev = 0u32;
    for (index, pair) in tokens.chunks_exact(2).enumerate() {
        let start = pair[0];
        if index == 0 && start != 0 {
            return Err(MalformedReason::FirstStartNotZero { start });
        }
        if start < prev {
            return Err(MalformedReason::Unsorted { index });
        }
        if start as usize > line_len {
            return Err(MalformedReason::StartBeyondLine {
                index,
                start,
                line_len,
            });
        }
        prev = start;
    }
    Ok(())
}

impl<'a> IntoIterator for &'a LineTokens {
    type Item = LineToken<'a>;
    type IntoIter = Tokens<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the tokens of a [`LineTokens`].
#[derive(Clone, Debug)]
pub struct Tokens<'a> {
    source: &'a LineTokens,
    front: usize,
    back: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = LineToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let token = self.source.cursor(self.front);
        self.front += 1;
        Some(token)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for Tokens<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.source.cursor(self.back))
    }
}

impl ExactSizeIterator for Tokens<'_> {}

impl FusedIterator for Tokens<'_> {}
