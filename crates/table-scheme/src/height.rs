//! Row height requests.

/// The height a scheme requests for one of its rows.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RowHeight {
    /// Let the host widget use its own default row height.
    #[default]
    UseContainerDefault,
    /// An explicit height in the host's layout units.
    Custom(f32),
}

impl RowHeight {
    /// Resolves the request against the container's default height.
    pub fn resolve(self, container_default: f32) -> f32 {
        match self {
            Self::UseContainerDefault => container_default,
            Self::Custom(height) => height,
        }
    }

    /// Returns `true` if this is an explicit height.
    pub fn is_custom(self) -> bool {
        matches!(self, Self::Custom(_))
    }
}

impl From<f32> for RowHeight {
    fn from(height: f32) -> Self {
        Self::Custom(height)
    }
}
