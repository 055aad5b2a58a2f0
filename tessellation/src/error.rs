/// The scanline traversal's result type.
pub type TraversalResult = Result<(), TraversalError>;

/// An error raised while scanline-filling a polygon.
///
/// This signals a broken topology invariant rather than bad user input:
/// closed loops always contribute edges in pairs, so an odd active-edge
/// count means the edge list handed to the rasterizer was not built from
/// closed loops. Callers should treat it as fatal.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TraversalError {
    UnclosedPath { y: i32 },
}

impl core::fmt::Display for TraversalError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TraversalError::UnclosedPath { y } => {
                write!(f, "Odd number of active edges on scanline {}: the path is not closed", y)
            }
        }
    }
}

impl std::error::Error for TraversalError {}
