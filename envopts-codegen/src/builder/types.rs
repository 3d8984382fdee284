/// Visibility of a generated item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// `pub`
    #[default]
    Public,
    /// `pub(super)`: reachable from the module that declares the target type.
    Super,
}

impl Visibility {
    /// Keyword prefix including the trailing space.
    pub fn as_prefix(&self) -> &'static str {
        match self {
            Self::Public => "pub ",
            Self::Super => "pub(super) ",
        }
    }
}
