//! `line_tokens` - Packed syntax highlighting tokens for editor lines
//!
//! Each line of a document, once lexed, is described by a contiguous run of
//! tokens. This crate stores that run as two `u32`s per token (start offset and
//! a packed metadata word) and provides offset lookup, cursor navigation and
//! expansion into renderer-facing tokens, including clipped and shifted slices
//! for wrapped lines.
//!
//! ```
//! use line_tokens::{LineTokens, StandardTokenType, TokenMetadata};
//!
//! let string = TokenMetadata::default().with_token_type(StandardTokenType::String);
//! let line = LineTokens::from_tokens(
//!     [(0, TokenMetadata::default()), (4, string), (9, TokenMetadata::default())],
//!     "say \"hi!\";",
//! );
//!
//! let token = line.find_token_at_offset(5).unwrap();
//! assert_eq!(token.text(), "\"hi!\"");
//! assert_eq!(token.token_type(), StandardTokenType::String);
//!
//! // Second visual row of a line wrapped at 6 bytes.
//! let row = line.slice_and_inflate(6, 12, -6);
//! assert_eq!(row[0].range(), 0..3);
//! ```

// Crate-level lint configuration
#![allow(dead_code)] // Public API functions not yet used internally
#![allow(clippy::cast_possible_truncation)] // Offsets are packed into u32 slots
#![allow(clippy::cast_sign_loss)] // Intentional offset conversions
#![allow(clippy::cast_possible_wrap)] // Intentional offset conversions
#![allow(clippy::module_name_repetitions)] // Allow tokens::LineTokens etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::use_self)] // Allow explicit type names in impl blocks
#![allow(clippy::should_implement_trait)] // LineToken::next moves in place, not an Iterator
#![allow(clippy::collapsible_if)] // Sometimes nested ifs are clearer
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::redundant_clone)] // Clones in tests for clarity are fine
#![allow(clippy::needless_collect)] // Collect for assertions is clear

pub mod error;
pub mod event;
pub mod metadata;
pub mod tokens;

// Re-export core types at crate root
pub use error::{Error, MalformedReason, Result};
pub use event::{LogLevel, clear_log_callback, emit_log, set_log_callback};
pub use metadata::{ColorId, FontStyle, LanguageId, StandardTokenType, TokenMetadata};
pub use tokens::{LineToken, LineTokens, Tokens, ViewToken};
