#![deny(bare_trait_objects)]
#![deny(unconditional_recursion)]

//! Data structures and tools to build closed vertex loops from path data.
//!
//! The pipeline implemented here goes from a path-description string to the
//! loops the tessellation crate consumes:
//!
//! - [`PathParser`] turns path data into a stream of absolute-coordinate
//!   [`PathCommand`]s,
//! - [`build_outline`]/[`build_loops`] walk a command stream, flatten curves
//!   and arcs, and collect [`CyclicList`] vertex loops.
//!
//! This crate is reexported in [arris](https://docs.rs/arris/).
//!
//! # Examples
//!
//! ```
//! use arris_path::{build_outline, PathParser};
//!
//! let commands = PathParser::new().parse("M 0 0 L 10 0 L 10 10 Z").unwrap();
//! let outline = build_outline(&commands, None);
//!
//! assert_eq!(outline.len(), 3);
//! ```

pub use arris_geom as geom;
pub use geom::math;

#[cfg(feature = "serialization")]
#[macro_use]
pub extern crate serde;

pub mod commands;
pub mod cyclic;
pub mod outline;
pub mod parser;

#[doc(inline)]
pub use crate::commands::PathCommand;
#[doc(inline)]
pub use crate::cyclic::CyclicList;
#[doc(inline)]
pub use crate::outline::{build_loops, build_outline, loop_winding, signed_area, Winding};
#[doc(inline)]
pub use crate::parser::{ParseError, ParseErrorKind, PathParser};

/// The fill rule defines how to determine what is inside and outside of the
/// shape.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FillRule {
    EvenOdd,
    NonZero,
}

impl FillRule {
    #[inline]
    pub fn is_in(&self, winding: i32) -> bool {
        match *self {
            FillRule::EvenOdd => winding % 2 != 0,
            FillRule::NonZero => winding != 0,
        }
    }
}

#[test]
fn fill_rules() {
    assert!(FillRule::EvenOdd.is_in(1));
    assert!(!FillRule::EvenOdd.is_in(2));
    assert!(FillRule::EvenOdd.is_in(-3));
    assert!(FillRule::NonZero.is_in(1));
    assert!(FillRule::NonZero.is_in(2));
    assert!(FillRule::NonZero.is_in(-2));
    assert!(!FillRule::EvenOdd.is_in(0));
    assert!(!FillRule::NonZero.is_in(0));
}
