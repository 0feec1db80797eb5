/// The `link:` field and its internal reference form `[[target|title]]`.
pub struct LinkField;

impl LinkField {
    pub const PREFIX: &'static [u8; 5] = b"link:";
    pub const OPEN: &'static [u8; 2] = b"[[";
    pub const CLOSE: &'static [u8; 2] = b"]]";
    pub const TITLE: u8 = b'|';
    pub const BRACKET: u8 = b']';
}
