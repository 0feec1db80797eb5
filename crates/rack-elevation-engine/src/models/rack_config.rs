/// Numbering convention of a rack's units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Unit 1 is at the bottom and numbers increase upward.
    #[default]
    Ascending,
    /// Unit 1 is at the top and numbers increase downward.
    Descending,
}

impl Direction {
    /// Signed step from an item's bottom unit towards its top unit.
    pub fn step(self) -> i64 {
        match self {
            Direction::Ascending => 1,
            Direction::Descending => -1,
        }
    }
}

/// Options of one rack block, built once from the `<rack ...>` option string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RackConfig {
    pub name: String,
    pub height: u32,
    pub descending: bool,
}

impl Default for RackConfig {
    fn default() -> Self {
        Self {
            name: Self::DEFAULT_NAME.to_string(),
            height: Self::DEFAULT_HEIGHT,
            descending: false,
        }
    }
}

impl RackConfig {
    pub const DEFAULT_NAME: &'static str = "Rack";
    pub const DEFAULT_HEIGHT: u32 = 42;
    /// Tallest accepted rack, in units.
    pub const MAX_HEIGHT: u32 = 1000;

    const NAME: &'static str = "name=";
    const HEIGHT: &'static str = "height=";
    const DESCENDING: &'static str = "descending";

    /// Parses a space separated option string such as `name=R12 height=24 descending`.
    ///
    /// Tokens are matched by prefix and unknown tokens are ignored. A height of
    /// zero, above [`RackConfig::MAX_HEIGHT`] or not fitting a `u32` leaves the
    /// default in place.
    pub fn from_options(options: &str) -> Self {
        let mut config = Self::default();

        for token in options.split(' ').map(str::trim) {
            if let Some(name) = token.strip_prefix(Self::NAME)
                && !name.is_empty()
            {
                config.name = name.to_string();
            } else if let Some(height) = token.strip_prefix(Self::HEIGHT)
                && let Some(height) = leading_number(height)
            {
                match height {
                    Some(h) if (1..=Self::MAX_HEIGHT).contains(&h) => config.height = h,
                    _ => log::debug!("ignoring rack height in option {token:?}"),
                }
            } else if token.starts_with(Self::DESCENDING) {
                config.descending = true;
            } else if !token.is_empty() {
                log::debug!("ignoring unknown rack option {token:?}");
            }
        }

        config
    }

    pub fn direction(&self) -> Direction {
        if self.descending {
            Direction::Descending
        } else {
            Direction::Ascending
        }
    }

    /// Whether `unit` lies on the rack's scale `1..=height`.
    pub fn contains(&self, unit: i64) -> bool {
        (1..=i64::from(self.height)).contains(&unit)
    }

    /// First unit and step of a walk from the visual top of the rack to its bottom.
    pub fn walk(&self) -> (i64, i64) {
        match self.direction() {
            Direction::Descending => (1, 1),
            Direction::Ascending => (i64::from(self.height), -1),
        }
    }
}

/// Leading ASCII digits of `s`: `None` when there are none, `Some(None)` on overflow.
fn leading_number(s: &str) -> Option<Option<u32>> {
    let digits = s.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    Some(s[..digits].parse().ok())
}
