/// What happens when two items anchor on the same unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// The later item replaces the earlier one.
    #[default]
    LastWriteWins,
    /// The earlier item stays and the later one is not drawn.
    KeepFirst,
}

impl CollisionPolicy {
    /// Whether an incoming item should take an already occupied anchor.
    pub fn replaces_occupant(self) -> bool {
        match self {
            CollisionPolicy::LastWriteWins => true,
            CollisionPolicy::KeepFirst => false,
        }
    }
}
