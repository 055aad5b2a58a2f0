//! A recursive-descent parser for SVG-style path data.
//!
//! The grammar is permissive the way SVG is: commas and whitespace are
//! interchangeable separators and can usually be omitted, numbers can run
//! together (`0.6.5` is two numbers), command letters can be elided to
//! repeat the previous command, and arc flags are single `0`/`1` characters.

use crate::commands::PathCommand;
use crate::geom::{ArcFlags, GeometryError, SvgArc};
use crate::math::{point, try_point, vector, Angle, Point};

use thiserror::Error;

/// What went wrong, and where in the input.
#[non_exhaustive]
#[derive(Error, Clone, Debug, PartialEq)]
pub enum ParseErrorKind {
    #[error("Line {line} Column {column}: Expected number, got {src:?}.")]
    Number { src: String, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Expected flag (0/1), got {src:?}.")]
    Flag { src: char, line: i32, column: i32 },
    #[error("Line {line} Column {column}: Invalid command {command:?}.")]
    Command {
        command: char,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: Expected move-to command, got {command:?}.")]
    MissingMoveTo {
        command: char,
        line: i32,
        column: i32,
    },
    #[error("Line {line} Column {column}: {source}")]
    Geometry {
        source: GeometryError,
        line: i32,
        column: i32,
    },
}

/// A parse failure, carrying everything the caller needs to decide whether
/// to drop the one malformed shape or abort the whole document: the error
/// position and kind, the commands parsed before the failure, and the
/// unconsumed rest of the input.
#[derive(Error, Clone, Debug, PartialEq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Commands successfully parsed before the failure.
    pub partial: Vec<PathCommand>,
    /// The input that was not consumed.
    pub remainder: String,
}

// A buffered iterator of characters keeping track of line and column.
pub struct Source<Iter> {
    src: Iter,
    current: char,
    line: i32,
    col: i32,
    finished: bool,
}

impl<Iter: Iterator<Item = char>> Source<Iter> {
    pub fn new<IntoIter>(src: IntoIter) -> Self
    where
        IntoIter: IntoIterator<IntoIter = Iter>,
    {
        let mut src = src.into_iter();

        let (current, finished) = match src.next() {
            Some(c) => (c, false),
            None => (' ', true),
        };

        let line = if current == '\n' { 1 } else { 0 };

        Source {
            current,
            finished,
            src,
            line,
            col: 0,
        }
    }

    /// Consumes the source, returning whatever input was not parsed yet.
    pub fn remainder(self) -> String {
        if self.finished {
            return String::new();
        }
        std::iter::once(self.current).chain(self.src).collect()
    }

    fn skip_whitespace(&mut self) {
        while !self.finished && (self.current.is_whitespace() || self.current == ',') {
            self.advance_one();
        }
    }

    fn advance_one(&mut self) {
        if self.finished {
            return;
        }
        match self.src.next() {
            Some('\n') => {
                self.current = '\n';
                self.line += 1;
                self.col = -1;
            }
            Some(c) => {
                self.current = c;
                self.col += 1;
            }
            None => {
                self.current = '~';
                self.finished = true;
            }
        }
    }
}

/// A context object for parsing path data into a [`PathCommand`] stream.
#[derive(Debug, Default)]
pub struct PathParser {
    float_buffer: String,
    current_position: Point,
}

impl PathParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a whole path-data string into absolute-coordinate commands.
    pub fn parse(&mut self, src: &str) -> Result<Vec<PathCommand>, ParseError> {
        let mut source = Source::new(src.chars());
        let mut commands = Vec::new();

        match self.parse_path(&mut source, &mut commands) {
            Ok(()) => Ok(commands),
            Err(kind) => Err(ParseError {
                kind,
                partial: commands,
                remainder: source.remainder(),
            }),
        }
    }

    fn parse_path(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
        output: &mut Vec<PathCommand>,
    ) -> Result<(), ParseErrorKind> {
        // Per the SVG spec: "If a relative moveto (m) appears as the first
        // element of the path, then it is treated as a pair of absolute
        // coordinates."
        self.current_position = point(0.0, 0.0);
        let mut first_position = point(0.0, 0.0);

        let mut need_start = true;
        let mut prev_cubic_ctrl: Option<Point> = None;
        let mut prev_quadratic_ctrl: Option<Point> = None;
        let mut implicit_cmd = 'M';

        src.skip_whitespace();

        while !src.finished {
            let mut cmd = src.current;
            let cmd_line = src.line;
            let cmd_col = src.col;

            if cmd.is_ascii_alphabetic() {
                src.advance_one();
            } else {
                cmd = implicit_cmd;
            }

            if need_start && cmd != 'm' && cmd != 'M' {
                return Err(ParseErrorKind::MissingMoveTo {
                    command: cmd,
                    line: cmd_line,
                    column: cmd_col,
                });
            }

            let is_relative = cmd.is_lowercase();

            match cmd {
                'l' | 'L' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    output.push(PathCommand::LineTo { to });
                }
                'h' | 'H' => {
                    let line = src.line;
                    let column = src.col;
                    let mut x = self.parse_number(src)?;
                    if is_relative {
                        x += self.current_position.x;
                    }
                    let to = checked_point(x, self.current_position.y, line, column)?;
                    self.current_position = to;
                    output.push(PathCommand::LineTo { to });
                }
                'v' | 'V' => {
                    let line = src.line;
                    let column = src.col;
                    let mut y = self.parse_number(src)?;
                    if is_relative {
                        y += self.current_position.y;
                    }
                    let to = checked_point(self.current_position.x, y, line, column)?;
                    self.current_position = to;
                    output.push(PathCommand::LineTo { to });
                }
                'q' | 'Q' => {
                    let ctrl = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.push(PathCommand::QuadraticTo { ctrl, to });
                }
                't' | 'T' => {
                    let ctrl = self.get_smooth_ctrl(prev_quadratic_ctrl);
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_quadratic_ctrl = Some(ctrl);
                    output.push(PathCommand::QuadraticTo { ctrl, to });
                }
                'c' | 'C' => {
                    let ctrl1 = self.parse_point(is_relative, src)?;
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
                }
                's' | 'S' => {
                    let ctrl1 = self.get_smooth_ctrl(prev_cubic_ctrl);
                    let ctrl2 = self.parse_point(is_relative, src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    prev_cubic_ctrl = Some(ctrl2);
                    output.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
                }
                'a' | 'A' => {
                    let from = self.current_position;
                    let rx = self.parse_number(src)?;
                    let ry = self.parse_number(src)?;
                    let x_rotation = self.parse_number(src)?;
                    let large_arc = self.parse_flag(src)?;
                    let sweep = self.parse_flag(src)?;
                    let to = self.parse_endpoint(is_relative, src)?;
                    let svg_arc = SvgArc {
                        from,
                        to,
                        radii: vector(rx, ry),
                        x_rotation: Angle::degrees(x_rotation),
                        flags: ArcFlags { large_arc, sweep },
                    };

                    if svg_arc.is_straight_line() {
                        output.push(PathCommand::LineTo { to });
                    } else {
                        output.push(PathCommand::Arc(svg_arc.to_arc()));
                    }
                }
                'm' | 'M' => {
                    let to = self.parse_endpoint(is_relative, src)?;
                    first_position = to;
                    output.push(PathCommand::MoveTo { to });
                    need_start = false;
                }
                'z' | 'Z' => {
                    output.push(PathCommand::Close);
                    self.current_position = first_position;
                    need_start = true;
                }
                _ => {
                    return Err(ParseErrorKind::Command {
                        command: cmd,
                        line: cmd_line,
                        column: cmd_col,
                    });
                }
            }

            match cmd {
                'c' | 'C' | 's' | 'S' => {
                    prev_quadratic_ctrl = None;
                }
                'q' | 'Q' | 't' | 'T' => {
                    prev_cubic_ctrl = None;
                }
                _ => {
                    prev_cubic_ctrl = None;
                    prev_quadratic_ctrl = None;
                }
            }

            implicit_cmd = match cmd {
                'm' => 'l',
                'M' => 'L',
                'z' => 'm',
                'Z' => 'M',
                c => c,
            };

            src.skip_whitespace();
        }

        Ok(())
    }

    /// The reflection of the previous control point through the current
    /// position, degenerating to the current position when the previous
    /// command was not a curve of the matching kind.
    fn get_smooth_ctrl(&self, prev_ctrl: Option<Point>) -> Point {
        if let Some(prev_ctrl) = prev_ctrl {
            self.current_position + (self.current_position - prev_ctrl)
        } else {
            self.current_position
        }
    }

    fn parse_endpoint(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseErrorKind> {
        let position = self.parse_point(is_relative, src)?;
        self.current_position = position;

        Ok(position)
    }

    fn parse_point(
        &mut self,
        is_relative: bool,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<Point, ParseErrorKind> {
        let line = src.line;
        let column = src.col;

        let mut x = self.parse_number(src)?;
        let mut y = self.parse_number(src)?;

        if is_relative {
            x += self.current_position.x;
            y += self.current_position.y;
        }

        checked_point(x, y, line, column)
    }

    fn parse_number(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<f64, ParseErrorKind> {
        self.float_buffer.clear();

        src.skip_whitespace();

        let line = src.line;
        let column = src.col;

        if src.current == '-' {
            self.float_buffer.push('-');
            src.advance_one();
        }

        while src.current.is_ascii_digit() {
            self.float_buffer.push(src.current);
            src.advance_one();
        }

        if src.current == '.' {
            self.float_buffer.push('.');
            src.advance_one();

            while src.current.is_ascii_digit() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        if src.current == 'e' || src.current == 'E' {
            self.float_buffer.push(src.current);
            src.advance_one();

            if src.current == '-' {
                self.float_buffer.push('-');
                src.advance_one();
            }

            while src.current.is_ascii_digit() {
                self.float_buffer.push(src.current);
                src.advance_one();
            }
        }

        match self.float_buffer.parse::<f64>() {
            // Overflowing literals parse to an infinity; report them the
            // same way as any other token we cannot use.
            Ok(val) if val.is_finite() => Ok(val),
            _ => Err(ParseErrorKind::Number {
                src: std::mem::take(&mut self.float_buffer),
                line,
                column,
            }),
        }
    }

    fn parse_flag(
        &mut self,
        src: &mut Source<impl Iterator<Item = char>>,
    ) -> Result<bool, ParseErrorKind> {
        src.skip_whitespace();
        match src.current {
            '1' => {
                src.advance_one();
                Ok(true)
            }
            '0' => {
                src.advance_one();
                Ok(false)
            }
            _ => Err(ParseErrorKind::Flag {
                src: src.current,
                line: src.line,
                column: src.col,
            }),
        }
    }
}

fn checked_point(x: f64, y: f64, line: i32, column: i32) -> Result<Point, ParseErrorKind> {
    try_point(x, y).map_err(|source| ParseErrorKind::Geometry {
        source,
        line,
        column,
    })
}

#[cfg(test)]
fn parse(src: &str) -> Result<Vec<PathCommand>, ParseError> {
    PathParser::new().parse(src)
}

#[test]
fn empty() {
    assert_eq!(parse("").unwrap(), vec![]);
    assert_eq!(parse(" ").unwrap(), vec![]);
}

#[test]
fn simple_square() {
    let commands = parse("M 0 0 L 10 0 L 10 10 Z").unwrap();
    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(10.0, 0.0) },
            PathCommand::LineTo { to: point(10.0, 10.0) },
            PathCommand::Close,
        ]
    );
}

#[test]
fn separators_are_interchangeable() {
    let a = parse("M 0 0 L 10 0 L 10 10 L 0 10 Z").unwrap();
    let b = parse("M0,0L10,0L10,10L0,10Z").unwrap();
    let c = parse("M0 0,L10 0 ,, L10,10 L0 10z").unwrap();
    assert_eq!(a, b);
    assert_eq!(a, c);
}

#[test]
fn relative_commands() {
    let commands = parse("m 1 1 l 2 0 v 3 h -2 z").unwrap();
    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(1.0, 1.0) },
            PathCommand::LineTo { to: point(3.0, 1.0) },
            PathCommand::LineTo { to: point(3.0, 4.0) },
            PathCommand::LineTo { to: point(1.0, 4.0) },
            PathCommand::Close,
        ]
    );
}

#[test]
fn implicit_line_after_move() {
    // Extra coordinate pairs after a move-to are implicit line-tos.
    let commands = parse("M 0 0 1 1 2 2").unwrap();
    assert_eq!(
        commands,
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(1.0, 1.0) },
            PathCommand::LineTo { to: point(2.0, 2.0) },
        ]
    );
}

#[test]
fn smooth_cubic_reflection() {
    let commands = parse("M 0 0 C 0 1 2 1 2 0 S 4 -1 4 0").unwrap();
    match commands[2] {
        PathCommand::CubicTo { ctrl1, .. } => {
            // Reflection of (2, 1) through (2, 0).
            assert_eq!(ctrl1, point(2.0, -1.0));
        }
        ref other => panic!("expected a cubic, got {:?}", other),
    }
}

#[test]
fn smooth_quadratic_degenerates_without_previous_curve() {
    let commands = parse("M 1 2 T 5 2").unwrap();
    match commands[1] {
        PathCommand::QuadraticTo { ctrl, .. } => {
            assert_eq!(ctrl, point(1.0, 2.0));
        }
        ref other => panic!("expected a quadratic, got {:?}", other),
    }
}

#[test]
fn arc_command() {
    use crate::math::points_approx_eq;

    let commands = parse("M 0 0 A 5 5 0 0 1 10 0").unwrap();
    assert_eq!(commands.len(), 2);
    match commands[1] {
        PathCommand::Arc(arc) => {
            assert_eq!(arc.radii, vector(5.0, 5.0));
            assert!(points_approx_eq(arc.center, point(5.0, 0.0)));
            assert!(((arc.center - point(0.0, 0.0)).length() - 5.0).abs() < 1e-9);
            assert!(((arc.center - point(10.0, 0.0)).length() - 5.0).abs() < 1e-9);
        }
        ref other => panic!("expected an arc, got {:?}", other),
    }
}

#[test]
fn zero_radius_arc_is_a_line() {
    let commands = parse("M 0 0 A 0 5 0 0 1 10 0").unwrap();
    assert_eq!(commands[1], PathCommand::LineTo { to: point(10.0, 0.0) });
}

#[test]
fn number_01() {
    // Per SVG spec, this is equivalent to "M 0.6 0.5".
    let commands = parse("M 0.6.5").unwrap();
    assert_eq!(commands, vec![PathCommand::MoveTo { to: point(0.6, 0.5) }]);
}

#[test]
fn number_scientific_notation() {
    parse("M 1e-2 -1E3").unwrap();
    parse("M 1.e-9 1.4e-4z").unwrap();
    parse("M0 1.6e-9L0 1.4e-4").unwrap();
}

#[test]
fn bad_numbers() {
    let bad_number = |src: &str| match parse(src) {
        Err(ParseError {
            kind: ParseErrorKind::Number { .. },
            ..
        }) => true,
        other => {
            println!("{:?}", other);
            false
        }
    };

    assert!(bad_number("M 0 --1"));
    assert!(bad_number("M 0 1ee2"));
    assert!(bad_number("M 0 1e--1"));
    assert!(bad_number("M 0 *2"));
    assert!(bad_number("M 0 e"));
    assert!(bad_number("M 0 1e"));
    assert!(bad_number("M 0 +1"));
    // Overflows to infinity.
    assert!(bad_number("M 0 1e999"));
}

#[test]
fn invalid_cmd() {
    let err = parse("x 0 0 0").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::MissingMoveTo {
            command: 'x',
            line: 0,
            column: 0
        }
    );

    let err = parse("\n M 0 \n0 1 1 x 1 1").unwrap_err();
    assert_eq!(
        err.kind,
        ParseErrorKind::Command {
            command: 'x',
            line: 2,
            column: 6
        }
    );
}

#[test]
fn error_carries_partial_output_and_remainder() {
    let err = parse("M 0 0 L 10 0 L 10 10 L bogus").unwrap_err();

    assert_eq!(
        err.partial,
        vec![
            PathCommand::MoveTo { to: point(0.0, 0.0) },
            PathCommand::LineTo { to: point(10.0, 0.0) },
            PathCommand::LineTo { to: point(10.0, 10.0) },
        ]
    );
    assert!(err.remainder.contains("bogus"));
    assert!(matches!(err.kind, ParseErrorKind::Number { .. }));
}

#[test]
fn need_start_after_close() {
    let err = parse("M 0 0 Z L 1 1").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::MissingMoveTo { .. }));
    // The close made it into the partial output.
    assert_eq!(
        err.partial,
        vec![PathCommand::MoveTo { to: point(0.0, 0.0) }, PathCommand::Close]
    );
}

#[test]
fn bad_flag() {
    let err = parse("M 0 0 A 5 5 0 2 1 10 0").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Flag { src: '2', .. }));
}
