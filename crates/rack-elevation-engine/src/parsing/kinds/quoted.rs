/// Double-quoted field values. No escape sequences are recognised.
pub struct Quoted;

impl Quoted {
    pub const QUOTE: u8 = b'"';

    /// Removes at most one leading and one trailing quote.
    pub fn strip(raw: &str) -> &str {
        let q = char::from(Self::QUOTE);
        let raw = raw.strip_prefix(q).unwrap_or(raw);
        raw.strip_suffix(q).unwrap_or(raw)
    }
}
