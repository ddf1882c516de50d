//! Packed token metadata.
//!
//! Every token on a line carries one `u32` word describing its language,
//! coarse token type, font style and theme color indices:
//!
//! ```text
//!  31            23 22            14 13   10 9  8 7         0
//! +----------------+----------------+-------+----+-----------+
//! |   background   |   foreground   | style |type| language  |
//! +----------------+----------------+-------+----+-----------+
//! ```
//!
//! The layout is local to this crate. Colors are ids into a theme palette that
//! is resolved elsewhere; this module never sees RGB values.
//!
//! # Examples
//!
//! ```
//! use line_tokens::{ColorId, FontStyle, LanguageId, StandardTokenType, TokenMetadata};
//!
//! let meta = TokenMetadata::pack(
//!     LanguageId::new(3),
//!     StandardTokenType::String,
//!     FontStyle::BOLD | FontStyle::ITALIC,
//!     ColorId::new(17),
//!     ColorId::DEFAULT_BACKGROUND,
//! );
//!
//! assert_eq!(meta.language_id(), LanguageId::new(3));
//! assert_eq!(meta.token_type(), StandardTokenType::String);
//! assert!(meta.font_style().contains(FontStyle::BOLD));
//! assert_eq!(meta.foreground(), ColorId::new(17));
//! ```

use bitflags::bitflags;

bitflags! {
    /// Font style flags of a token.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct FontStyle: u8 {
        const ITALIC        = 0x01;
        const BOLD          = 0x02;
        const UNDERLINE     = 0x04;
        const STRIKETHROUGH = 0x08;
    }
}

/// Coarse token classification used for editor behavior.
///
/// Bracket matching and auto-closing pairs, for example, are suppressed inside
/// `Comment` and `String` tokens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StandardTokenType {
    #[default]
    Other,
    Comment,
    String,
    RegEx,
}

impl StandardTokenType {
    /// Decode from the two-bit field value. Only the low two bits are read.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        match bits & 0b11 {
            1 => Self::Comment,
            2 => Self::String,
            3 => Self::RegEx,
            _ => Self::Other,
        }
    }

    /// Two-bit field value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Other => 0,
            Self::Comment => 1,
            Self::String => 2,
            Self::RegEx => 3,
        }
    }
}

/// Identifier of the language a token belongs to.
///
/// Lines may mix languages (script blocks inside markup, fenced code in
/// markdown), so the id is stored per token.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LanguageId(u8);

impl LanguageId {
    /// No language / plain text.
    pub const NULL: Self = Self(0);

    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Index into the theme's color table.
///
/// Only the low nine bits survive packing (512 palette entries).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorId(u16);

impl ColorId {
    /// Unset color.
    pub const NONE: Self = Self(0);
    /// The theme's default foreground.
    pub const DEFAULT_FOREGROUND: Self = Self(1);
    /// The theme's default background.
    pub const DEFAULT_BACKGROUND: Self = Self(2);
    /// Largest id representable in the packed word.
    pub const MAX: Self = Self(0x1FF);

    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }
}

/// A packed token metadata word.
///
/// `TokenMetadata` is `Copy` and decodes every field with a mask and a shift,
/// so reading attributes on the render path never allocates or branches on
/// storage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct TokenMetadata(u32);

impl TokenMetadata {
    pub const LANGUAGE_ID_MASK: u32 = 0x0000_00FF;
    pub const TOKEN_TYPE_MASK: u32 = 0x0000_0300;
    pub const FONT_STYLE_MASK: u32 = 0x0000_3C00;
    pub const FOREGROUND_MASK: u32 = 0x007F_C000;
    pub const BACKGROUND_MASK: u32 = 0xFF80_0000;

    pub const LANGUAGE_ID_OFFSET: u32 = 0;
    pub const TOKEN_TYPE_OFFSET: u32 = 8;
    pub const FONT_STYLE_OFFSET: u32 = 10;
    pub const FOREGROUND_OFFSET: u32 = 14;
    pub const BACKGROUND_OFFSET: u32 = 23;

    /// Pack all fields into one word. Out-of-range values are masked to
    /// their field width.
    #[must_use]
    pub const fn pack(
        language: LanguageId,
        token_type: StandardTokenType,
        font_style: FontStyle,
        foreground: ColorId,
        background: ColorId,
    ) -> Self {
        let bits = ((language.0 as u32) << Self::LANGUAGE_ID_OFFSET)
            | ((token_type.bits() << Self::TOKEN_TYPE_OFFSET) & Self::TOKEN_TYPE_MASK)
            | (((font_style.bits() as u32) << Self::FONT_STYLE_OFFSET) & Self::FONT_STYLE_MASK)
            | (((foreground.0 as u32) << Self::FOREGROUND_OFFSET) & Self::FOREGROUND_MASK)
            | (((background.0 as u32) << Self::BACKGROUND_OFFSET) & Self::BACKGROUND_MASK);
        Self(bits)
    }

    /// Wrap a raw word produced by a lexer.
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// The raw encoded word.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn language_id(self) -> LanguageId {
        LanguageId(((self.0 & Self::LANGUAGE_ID_MASK) >> Self::LANGUAGE_ID_OFFSET) as u8)
    }

    #[must_use]
    pub const fn token_type(self) -> StandardTokenType {
        StandardTokenType::from_bits((self.0 & Self::TOKEN_TYPE_MASK) >> Self::TOKEN_TYPE_OFFSET)
    }

    #[must_use]
    pub const fn font_style(self) -> FontStyle {
        FontStyle::from_bits_retain(
            ((self.0 & Self::FONT_STYLE_MASK) >> Self::FONT_STYLE_OFFSET) as u8,
        )
    }

    #[must_use]
    pub const fn foreground(self) -> ColorId {
        ColorId(((self.0 & Self::FOREGROUND_MASK) >> Self::FOREGROUND_OFFSET) as u16)
    }

    #[must_use]
    pub const fn background(self) -> ColorId {
        ColorId(((self.0 & Self::BACKGROUND_MASK) >> Self::BACKGROUND_OFFSET) as u16)
    }

    /// Return a copy with the language replaced.
    #[must_use]
    pub const fn with_language_id(self, language: LanguageId) -> Self {
        Self((self.0 & !Self::LANGUAGE_ID_MASK) | (language.0 as u32))
    }

    /// Return a copy with the token type replaced.
    #[must_use]
    pub const fn with_token_type(self, token_type: StandardTokenType) -> Self {
        Self((self.0 & !Self::TOKEN_TYPE_MASK) | (token_type.bits() << Self::TOKEN_TYPE_OFFSET))
    }

    /// Return a copy with the font style replaced.
    #[must_use]
    pub const fn with_font_style(self, font_style: FontStyle) -> Self {
        let field = ((font_style.bits() as u32) << Self::FONT_STYLE_OFFSET) & Self::FONT_STYLE_MASK;
        Self((self.0 & !Self::FONT_STYLE_MASK) | field)
    }

    /// Return a copy with the foreground color replaced.
    #[must_use]
    pub const fn with_foreground(self, color: ColorId) -> Self {
        let field = ((color.0 as u32) << Self::FOREGROUND_OFFSET) & Self::FOREGROUND_MASK;
        Self((self.0 & !Self::FOREGROUND_MASK) | field)
    }

    /// Return a copy with the background color replaced.
    #[must_use]
    pub const fn with_background(self, color: ColorId) -> Self {
        let field = ((color.0 as u32) << Self::BACKGROUND_OFFSET) & Self::BACKGROUND_MASK;
        Self((self.0 & !Self::BACKGROUND_MASK) | field)
    }
}

impl From<u32> for TokenMetadata {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl From<TokenMetadata> for u32 {
    fn from(meta: TokenMetadata) -> Self {
        meta.0
    }
}
