/// An explicit color such as `#a1b2c3`: `#` followed by word characters.
pub struct ColorTag;

impl ColorTag {
    pub const HASH: u8 = b'#';

    pub fn is_word(b: u8) -> bool {
        b.is_ascii_alphanumeric() || b == b'_'
    }

    /// Length of a color tag at the start of `s`, if there is one.
    pub fn match_len(s: &str) -> Option<usize> {
        let rest = s.as_bytes().strip_prefix(&[Self::HASH])?;
        let word = rest.iter().take_while(|b| Self::is_word(**b)).count();
        (word > 0).then_some(word + 1)
    }
}
