use super::{
    cursor::Cursor,
    kinds::{ColorTag, LinkField, Quoted},
};

/// Why a line does not match the equipment grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("expected a starting unit number")]
    StartUnit,
    #[error("expected a unit count after the starting unit")]
    Size,
    #[error("expected a model after the unit count")]
    MissingModel,
    #[error("an item must occupy at least one unit")]
    ZeroSize,
}

/// Raw field text of one equipment line, borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFields<'a> {
    pub u_bottom: u32,
    pub u_size: u32,
    /// Model with any surrounding quotes still attached.
    pub model: &'a str,
    /// Name with any surrounding quotes still attached, empty when absent.
    pub name: &'a str,
    pub color: Option<&'a str>,
    /// Contents of the link field after the `link:` prefix.
    pub link: Option<&'a str>,
    /// Remainder of the line, trimmed. Empty when absent.
    pub comment: &'a str,
}

/// Splits one line into its fields:
/// `<u_bottom> <u_size> <model> [name] [#color] [link:target] [comment]`.
///
/// Fields are taken strictly left to right. Optional fields never steal from
/// each other: the name is skipped when the next token is a color or a link,
/// and whatever follows the link is comment text.
pub fn scan_line(line: &str) -> Result<LineFields<'_>, LineError> {
    let mut cur = Cursor::new(line);
    cur.skip_whitespace();

    let u_bottom = take_number(&mut cur).ok_or(LineError::StartUnit)?;
    if cur.skip_whitespace() == 0 && !cur.eof() {
        return Err(LineError::StartUnit);
    }

    let u_size = take_number(&mut cur).ok_or(LineError::Size)?;
    if cur.skip_whitespace() == 0 && !cur.eof() {
        return Err(LineError::Size);
    }

    let model = take_field(&mut cur);
    if model.is_empty() {
        return Err(LineError::MissingModel);
    }
    cur.skip_whitespace();

    let name = if cur.peek() == Some(ColorTag::HASH) || cur.starts_with(LinkField::PREFIX) {
        ""
    } else {
        take_field(&mut cur)
    };
    cur.skip_whitespace();

    let color = take_color(&mut cur);
    cur.skip_whitespace();

    let link = take_link(&mut cur);
    let comment = cur.rest().trim_matches(|c: char| c.is_ascii_whitespace());

    if u_size == 0 {
        return Err(LineError::ZeroSize);
    }

    Ok(LineFields {
        u_bottom,
        u_size,
        model,
        name,
        color,
        link,
        comment,
    })
}

/// A run of ASCII digits that fits a `u32`.
fn take_number(cur: &mut Cursor<'_>) -> Option<u32> {
    let digits = cur.take_while(|b| b.is_ascii_digit());
    if digits.is_empty() {
        return None;
    }
    digits.parse().ok()
}

/// A closed double-quoted string, or else a run of non-whitespace.
fn take_field<'a>(cur: &mut Cursor<'a>) -> &'a str {
    if cur.peek() == Some(Quoted::QUOTE)
        && let Some(close) = cur.rest()[1..].find(char::from(Quoted::QUOTE))
    {
        let field = &cur.rest()[..close + 2];
        cur.bump_n(field.len());
        return field;
    }
    cur.take_while(|b| !b.is_ascii_whitespace())
}

fn take_color<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    let len = ColorTag::match_len(cur.rest())?;
    let tag = &cur.rest()[..len];
    cur.bump_n(len);
    Some(tag)
}

/// The link field, returned without its `link:` prefix.
///
/// The bracket form may contain spaces; anything else ends at whitespace.
fn take_link<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    if !cur.starts_with(LinkField::PREFIX) {
        return None;
    }
    cur.bump_n(LinkField::PREFIX.len());

    if let Some(reference) = try_bracket_ref(cur) {
        return Some(reference);
    }
    Some(cur.take_while(|b| !b.is_ascii_whitespace()))
}

/// Attempts a closed `[[target]]` or `[[target|title]]` at the cursor.
///
/// On failure, cursor position is restored.
fn try_bracket_ref<'a>(cur: &mut Cursor<'a>) -> Option<&'a str> {
    if !cur.starts_with(LinkField::OPEN) {
        return None;
    }

    let saved = cur.clone();
    let start = cur.i;
    cur.bump_n(LinkField::OPEN.len());

    let target = cur.take_while(|b| b != LinkField::BRACKET && b != LinkField::TITLE);
    if target.is_empty() {
        *cur = saved;
        return None;
    }
    if cur.peek() == Some(LinkField::TITLE) {
        cur.bump();
        cur.take_while(|b| b != LinkField::BRACKET);
    }

    if !cur.starts_with(LinkField::CLOSE) {
        *cur = saved;
        return None;
    }
    cur.bump_n(LinkField::CLOSE.len());

    Some(&cur.s[start..cur.i])
}
