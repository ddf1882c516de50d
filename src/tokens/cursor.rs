//! Repositionable cursor over one token of a [`LineTokens`].

use std::ops::Range;

use super::LineTokens;
use crate::metadata::{ColorId, FontStyle, LanguageId, StandardTokenType, TokenMetadata};

/// A cursor identifying one token within a [`LineTokens`].
///
/// The cursor borrows its array, so it can never outlive the tokens it points
/// into. It is `Copy`: [`duplicate`](Self::duplicate) or a plain copy gives an
/// independent cursor, and moving one never affects another.
///
/// Two navigation styles are provided:
///
/// - [`next`](Self::next) / [`prev`](Self::prev) move *this* cursor in place
///   and hand it back, for tight render loops that walk many tokens.
/// - [`next_token`](Self::next_token) / [`prev_token`](Self::prev_token) leave
///   `self` untouched and return the neighbor as a new value.
///
/// # Examples
///
/// ```
/// use line_tokens::LineTokens;
///
/// let line = LineTokens::new(vec![0, 0, 4, 0, 5, 0], "let x;");
/// let mut cursor = line.first_token().unwrap();
/// assert_eq!(cursor.text(), "let ");
///
/// while let Some(token) = cursor.next() {
///     assert!(token.start_offset() > 0);
/// }
/// assert_eq!(cursor.text(), ";");
/// assert!(cursor.next().is_none());
/// ```
#[derive(Clone, Copy, Debug)]
pub struct LineToken<'a> {
    pub(super) source: &'a LineTokens,
    index: usize,
    start: usize,
    end: usize,
    metadata: TokenMetadata,
}

impl<'a> LineToken<'a> {
    pub(super) fn new(
        source: &'a LineTokens,
        index: usize,
        start: usize,
        end: usize,
        metadata: TokenMetadata,
    ) -> Self {
        Self {
            source,
            index,
            start,
            end,
            metadata,
        }
    }

    /// Overwrite the position fields in place.
    pub(super) fn reposition(
        &mut self,
        index: usize,
        start: usize,
        end: usize,
        metadata: TokenMetadata,
    ) {
        self.index = index;
        self.start = start;
        self.end = end;
        self.metadata = metadata;
    }

    fn load(&mut self, index: usize) {
        let (start, end, metadata) = self.source.record(index);
        self.reposition(index, start, end, metadata);
    }

    /// Index of the token within its line.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    #[must_use]
    pub const fn start_offset(&self) -> usize {
        self.start
    }

    #[must_use]
    pub const fn end_offset(&self) -> usize {
        self.end
    }

    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The token's slice of the line text.
    ///
    /// Returns an empty string if the lexer produced offsets that do not fall
    /// on UTF-8 character boundaries.
    #[must_use]
    pub fn text(&self) -> &'a str {
        self.source.line_text().get(self.start..self.end).unwrap_or("")
    }

    /// The array this cursor points into.
    #[must_use]
    pub const fn source(&self) -> &'a LineTokens {
        self.source
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.index > 0
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.source.token_count()
    }

    #[must_use]
    pub const fn metadata(&self) -> TokenMetadata {
        self.metadata
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

    /// Move to the previous token in place.
    ///
    /// Returns `None` and leaves the cursor untouched on the first token.
    pub fn prev(&mut self) -> Option<&mut Self> {
        if !self.has_prev() {
            return None;
        }
        self.load(self.index - 1);
        Some(self)
    }

    /// Move to the next token in place.
    ///
    /// Returns `None` and leaves the cursor untouched on the last token.
    pub fn next(&mut self) -> Option<&mut Self> {
        if !self.has_next() {
            return None;
        }
        self.load(self.index + 1);
        Some(self)
    }

    /// The previous token as a new cursor, leaving `self` where it is.
    #[must_use]
    pub fn prev_token(&self) -> Option<Self> {
        let mut token = *self;
        token.prev()?;
        Some(token)
    }

    /// The next token as a new cursor, leaving `self` where it is.
    #[must_use]
    pub fn next_token(&self) -> Option<Self> {
        let mut token = *self;
        token.next()?;
        Some(token)
    }

    /// An independent cursor at the same position.
    #[must_use]
    pub const fn duplicate(&self) -> Self {
        *self
    }
}
