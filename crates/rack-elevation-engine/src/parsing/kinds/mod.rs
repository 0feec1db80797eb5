//! # Field Kinds
//!
//! Types that own the delimiters of the rack line grammar. The line scanner
//! calls these constants; it never hardcodes `"`, `#` or `link:`.
//!
//! - **`Quoted`**: `QUOTE = b'"'` - fields that may contain spaces
//! - **`ColorTag`**: `HASH = b'#'` followed by word characters
//! - **`LinkField`**: `PREFIX = b"link:"`, bracket form `[[target|title]]`
//! - **`CommentLine`**: whole-line comments starting with `#`

pub mod color_tag;
pub mod comment_line;
pub mod link_field;
pub mod quoted;

pub use color_tag::ColorTag;
pub use comment_line::CommentLine;
pub use link_field::LinkField;
pub use quoted::Quoted;
