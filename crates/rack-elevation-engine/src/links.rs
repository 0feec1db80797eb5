use crate::parsing::{cursor::Cursor, kinds::LinkField};

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("page reference {0:?} has no usable page id")]
    EmptyPageId(String),
    /// For host-provided resolvers that cannot reach or find the target.
    #[error("cannot resolve link {target:?}: {reason}")]
    Unresolvable { target: String, reason: String },
}

/// The contents of a `link:` field, classified but not yet resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkRef<'a> {
    /// A URL used exactly as written.
    External(&'a str),
    /// A `[[target]]` or `[[target|title]]` reference to a page of the host.
    Internal {
        target: &'a str,
        title: Option<&'a str>,
    },
}

impl<'a> LinkRef<'a> {
    /// Classifies the text after `link:`. Returns `None` for an empty field or
    /// a page reference without a target.
    ///
    /// An unclosed `[[target` still names a page; the title is only taken from
    /// a closed `[[target|title]]`.
    pub fn classify(raw: &'a str) -> Option<Self> {
        if raw.is_empty() {
            return None;
        }
        if !raw.as_bytes().starts_with(LinkField::OPEN) {
            return Some(LinkRef::External(raw));
        }

        let mut cur = Cursor::new(raw);
        cur.bump_n(LinkField::OPEN.len());
        let target = cur.take_while(|b| b != LinkField::BRACKET && b != LinkField::TITLE);
        if target.is_empty() {
            return None;
        }

        let mut title = None;
        if cur.peek() == Some(LinkField::TITLE) {
            cur.bump();
            let text = cur.take_while(|b| b != LinkField::BRACKET);
            if !text.is_empty() && cur.rest().as_bytes() == LinkField::CLOSE {
                title = Some(text);
            }
        }

        Some(LinkRef::Internal { target, title })
    }
}

/// A link ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLink {
    pub url: String,
    /// Display title, already HTML-escaped.
    pub title: Option<String>,
}

/// Turns the contents of a `link:` field into a link target.
pub trait LinkResolver {
    fn resolve(&self, raw: &str) -> Result<Option<ResolvedLink>, LinkError>;
}

/// Page naming capabilities of the host wiki.
pub trait HostLinks {
    /// Normalizes a free-form page name into a page id.
    fn clean_id(&self, raw: &str) -> String;
    /// Builds the URL of the page with the given (clean) id.
    fn page_url(&self, id: &str) -> String;
}

/// Page links built from a URL template such as `/doku.php?id={id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLinks {
    template: String,
}

impl Default for PageLinks {
    fn default() -> Self {
        Self::new(Self::DEFAULT_TEMPLATE)
    }
}

impl PageLinks {
    pub const DEFAULT_TEMPLATE: &'static str = "/doku.php?id={id}";
    pub const ID_PLACEHOLDER: &'static str = "{id}";

    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }
}

impl HostLinks for PageLinks {
    /// Lowercases, maps `/` and `;` to the `:` namespace separator, replaces
    /// anything outside `[a-z0-9_.:-]` with `_`, collapses repeated `_`/`:`
    /// and trims separators from both ends.
    fn clean_id(&self, raw: &str) -> String {
        let mut id = String::with_capacity(raw.len());
        for c in raw.trim().chars().flat_map(char::to_lowercase) {
            let mapped = match c {
                '/' | ';' | ':' => ':',
                'a'..='z' | '0'..='9' | '.' | '-' | '_' => c,
                _ => '_',
            };
            if matches!(mapped, '_' | ':') && id.ends_with(mapped) {
                continue;
            }
            id.push(mapped);
        }
        id.trim_matches(['_', ':', '.', '-']).to_string()
    }

    fn page_url(&self, id: &str) -> String {
        self.template.replace(Self::ID_PLACEHOLDER, id)
    }
}

/// Resolves external URLs as-is and `[[page]]` references through the host.
#[derive(Debug, Clone, Default)]
pub struct WikiLinkResolver<H = PageLinks> {
    host: H,
}

impl<H: HostLinks> WikiLinkResolver<H> {
    pub fn new(host: H) -> Self {
        Self { host }
    }
}

impl<H: HostLinks> LinkResolver for WikiLinkResolver<H> {
    fn resolve(&self, raw: &str) -> Result<Option<ResolvedLink>, LinkError> {
        match LinkRef::classify(raw) {
            None => Ok(None),
            Some(LinkRef::External(url)) => Ok(Some(ResolvedLink {
                url: url.to_string(),
                title: None,
            })),
            Some(LinkRef::Internal { target, title }) => {
                let id = self.host.clean_id(target);
                if id.is_empty() {
                    return Err(LinkError::EmptyPageId(target.to_string()));
                }
                Ok(Some(ResolvedLink {
                    url: self.host.page_url(&id),
                    title: title.map(|t| html_escape::encode_quoted_attribute(t).into_owned()),
                }))
            }
        }
    }
}
