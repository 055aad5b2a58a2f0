//! The absolute-coordinate command stream produced by the parser.

use crate::geom::Arc;
use crate::math::Point;

/// One path command, in absolute coordinates.
///
/// The parser resolves relative commands, horizontal/vertical shorthands and
/// smooth reflected control points, so consumers only ever deal with these
/// six variants. Matches are exhaustive on purpose: a new command kind must
/// be handled by every consumer before the crate compiles again.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PathCommand {
    MoveTo { to: Point },
    LineTo { to: Point },
    QuadraticTo { ctrl: Point, to: Point },
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    /// An elliptic arc, already converted to center parameterization.
    Arc(Arc),
    Close,
}
