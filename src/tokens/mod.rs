//! Per-line token arrays, cursors and renderer-facing expansion.

mod cursor;
mod line_tokens;
pub mod view_token;


pub use cursor::LineToken;
pub use line_tokens::{LineTokens, Tokens};
pub use view_token::ViewToken;
