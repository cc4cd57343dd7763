//! Widget positioning schemes.
//!
//! A widget's `pos` attribute is either a space-delimited string
//! (`"grid 0 1"`) or a sequence (`["grid", 0, 1]`). The first token picks
//! the scheme:
//!
//! | scheme | alias | arguments |
//! |--------|-------|-----------|
//! | `sequential` | `pack` | optional side: `left`, `right`, `top` (default), `bottom` |
//! | `absolute` | `place` | exactly two coordinates `x y` |
//! | `grid` | none | exactly two cells `row column` |

use std::fmt;

use serde_json::Value;

// ── Side ──────────────────────────────────────────────────────────────────

/// Edge a sequentially placed widget is stacked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Side {
    Left,
    Right,
    #[default]
    Top,
    Bottom,
}

impl Side {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "left"   => Some(Side::Left),
            "right"  => Some(Side::Right),
            "top"    => Some(Side::Top),
            "bottom" => Some(Side::Bottom),
            _        => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left   => "left",
            Side::Right  => "right",
            Side::Top    => "top",
            Side::Bottom => "bottom",
        }
    }
}

// ── Position ──────────────────────────────────────────────────────────────

/// A validated positioning directive, applied right after a widget is created.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Position {
    /// Stack against one side of the remaining space.
    Sequential { side: Side },
    /// Fixed coordinates relative to the window.
    Absolute { x: f64, y: f64 },
    /// Cell in a row/column grid.
    Grid { row: u32, column: u32 },
}

impl Default for Position {
    fn default() -> Self {
        Position::Sequential { side: Side::Top }
    }
}

impl Position {
    /// Parse a `pos` attribute value.
    ///
    /// The error is a human-readable reason; the caller attaches the
    /// widget's ordinal.
    pub fn from_value(value: &Value) -> Result<Self, String> {
        match value {
            Value::String(s) => Self::parse(s),
            Value::Array(items) => {
                let tokens = items
                    .iter()
                    .map(|item| match item {
                        Value::String(s) => Ok(s.clone()),
                        Value::Number(n) => Ok(n.to_string()),
                        other => Err(format!("unexpected position element {other}")),
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Self::from_tokens(&tokens)
            }
            other => Err(format!("position must be a string or a sequence, got {other}")),
        }
    }

    /// Parse a space-delimited position string.
    pub fn parse(s: &str) -> Result<Self, String> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        Self::from_tokens(&tokens)
    }

    fn from_tokens<S: AsRef<str>>(tokens: &[S]) -> Result<Self, String> {
        let Some((scheme, args)) = tokens.split_first() else {
            return Err("empty position".to_string());
        };
        match scheme.as_ref().to_ascii_lowercase().as_str() {
            "sequential" | "pack" => match args {
                [] => Ok(Position::Sequential { side: Side::Top }),
                [side] => Side::parse(side.as_ref())
                    .map(|side| Position::Sequential { side })
                    .ok_or_else(|| {
                        format!("unknown side `{}` (expected left, right, top or bottom)", side.as_ref())
                    }),
                _ => Err(format!("sequential takes at most one side, got {} arguments", args.len())),
            },
            "absolute" | "place" => match args {
                [x, y] => Ok(Position::Absolute {
                    x: coordinate(x.as_ref())?,
                    y: coordinate(y.as_ref())?,
                }),
                _ => Err(format!("absolute takes exactly two coordinates, got {}", args.len())),
            },
            "grid" => match args {
                [row, column] => Ok(Position::Grid {
                    row:    cell(row.as_ref())?,
                    column: cell(column.as_ref())?,
                }),
                _ => Err(format!("grid takes exactly a row and a column, got {} arguments", args.len())),
            },
            other => Err(format!("unknown position scheme `{other}`")),
        }
    }
}

fn coordinate(token: &str) -> Result<f64, String> {
    token
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| format!("`{token}` is not a coordinate"))
}

fn cell(token: &str) -> Result<u32, String> {
    token.parse::<u32>().map_err(|_| format!("`{token}` is not a grid index"))
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Sequential { side }  => write!(f, "sequential {}", side.as_str()),
            Position::Absolute { x, y }    => write!(f, "absolute {x} {y}"),
            Position::Grid { row, column } => write!(f, "grid {row} {column}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ok(s: &str) -> Position { Position::parse(s).unwrap() }
    fn err(s: &str) { Position::parse(s).unwrap_err(); }

    #[test] fn sequential_defaults_to_top() { assert_eq!(ok("sequential"), Position::Sequential { side: Side::Top }); }
    #[test] fn sequential_left() { assert_eq!(ok("sequential left"), Position::Sequential { side: Side::Left }); }
    #[test] fn sequential_bottom() { assert_eq!(ok("sequential bottom"), Position::Sequential { side: Side::Bottom }); }
    #[test] fn sequential_right_any_case() { assert_eq!(ok("Sequential RIGHT"), Position::Sequential { side: Side::Right }); }
    #[test] fn pack_alias() { assert_eq!(ok("pack left"), Position::Sequential { side: Side::Left }); }
    #[test] fn place_alias() { assert_eq!(ok("place 1 2"), Position::Absolute { x: 1.0, y: 2.0 }); }

    #[test]
    fn sequential_rejects_unknown_sides() {
        for side in ["center", "middle", "up", "0", "lefty"] {
            err(&format!("sequential {side}"));
        }
    }

    #[test] fn sequential_rejects_two_sides() { err("sequential left right"); }

    #[test]
    fn absolute_needs_exactly_two_numbers() {
        assert_eq!(ok("absolute 10 20.5"), Position::Absolute { x: 10.0, y: 20.5 });
        assert_eq!(ok("absolute -4 0"), Position::Absolute { x: -4.0, y: 0.0 });
        err("absolute");
        err("absolute 10");
        err("absolute 10 20 30");
        err("absolute ten 20");
        err("absolute inf 20");
    }

    #[test]
    fn grid_needs_row_and_column() {
        assert_eq!(ok("grid 0 1"), Position::Grid { row: 0, column: 1 });
        err("grid");
        err("grid 0");
        err("grid 0 1 2");
        err("grid -1 0");
        err("grid a b");
    }

    #[test] fn unknown_scheme() { err("float 1 2"); }
    #[test] fn empty_string() { err("   "); }

    #[test]
    fn whitespace_is_tolerated() {
        assert_eq!(ok("  grid   3\t4 "), Position::Grid { row: 3, column: 4 });
    }

    #[test]
    fn structured_sequence() {
        assert_eq!(Position::from_value(&json!(["grid", 2, 5])).unwrap(), Position::Grid { row: 2, column: 5 });
        assert_eq!(Position::from_value(&json!(["absolute", 1.5, 2])).unwrap(), Position::Absolute { x: 1.5, y: 2.0 });
        assert_eq!(Position::from_value(&json!(["sequential"])).unwrap(), Position::default());
        Position::from_value(&json!(["grid", true, 1])).unwrap_err();
        Position::from_value(&json!(42)).unwrap_err();
    }

    #[test]
    fn display_reparses_to_the_same_position() {
        for p in [ok("sequential left"), ok("absolute 3 4.5"), ok("grid 1 2")] {
            assert_eq!(ok(&p.to_string()), p);
        }
    }
}
