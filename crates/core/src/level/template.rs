//! Level templates.
//!
//! Two on-disk shapes are understood: the keyed text format (`name:`,
//! `type:`, `size:`, `position:`, `map:` followed by literal rows) and the
//! legacy fixed-size dump, a bare 22x81-byte screen capture with trailing
//! newlines. Templates stamp over whatever is already on the level, so a
//! partial template can overlay a generated cave.

use std::fmt;

use crate::level::{Level, MAX_COLS, MAX_ROWS};
use crate::types::{LevelKind, Pos, TileKind};

/// Exact byte length of a legacy dump: 22 rows of 80 glyphs plus a newline.
pub const LEGACY_TEMPLATE_BYTES: usize = MAX_ROWS * (MAX_COLS + 1);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TemplateError {
    MalformedLine { line: usize },
    UnknownKey { line: usize, key: String },
    UnknownLevelType { line: usize, value: String },
    BadCoordinate { line: usize },
    SizeBeforeMap { line: usize },
    MapOutOfBounds,
    BadRowWidth { line: usize, expected: usize, found: usize },
    TooManyRows { line: usize, expected: usize },
    MissingRows { expected: usize, found: usize },
    BadLength { expected: usize, found: usize },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateError::MalformedLine { line } => {
                write!(f, "line {line}: expected `key: value`")
            }
            TemplateError::UnknownKey { line, key } => {
                write!(f, "line {line}: unknown key `{key}`")
            }
            TemplateError::UnknownLevelType { line, value } => {
                write!(f, "line {line}: unknown level type `{value}`")
            }
            TemplateError::BadCoordinate { line } => {
                write!(f, "line {line}: expected `row col` within the grid")
            }
            TemplateError::SizeBeforeMap { line } => {
                write!(f, "line {line}: `size` must appear before `map`")
            }
            TemplateError::MapOutOfBounds => {
                write!(f, "size and position place the map outside the grid")
            }
            TemplateError::BadRowWidth { line, expected, found } => {
                write!(f, "line {line}: map row is {found} glyphs wide, expected {expected}")
            }
            TemplateError::TooManyRows { line, expected } => {
                write!(f, "line {line}: more map rows than the declared {expected}")
            }
            TemplateError::MissingRows { expected, found } => {
                write!(f, "map ended after {found} of {expected} declared rows")
            }
            TemplateError::BadLength { expected, found } => {
                write!(f, "legacy template is {found} bytes, expected exactly {expected}")
            }
        }
    }
}

impl std::error::Error for TemplateError {}

/// Parse the keyed text format and stamp its map onto `level`.
pub fn apply_template(level: &mut Level, text: &str) -> Result<(), TemplateError> {
    let mut size: Option<(usize, usize)> = None;
    let mut position = Pos { y: 0, x: 0 };
    let mut lines = text.lines().enumerate();

    while let Some((index, line)) = lines.next() {
        let number = index + 1;
        if line.is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            return Err(TemplateError::MalformedLine { line: number });
        };
        match key {
            "name" => {
                // Kept in the format for authoring, unused by the loader.
                field_value(value, number)?;
            }
            "type" => {
                let value = field_value(value, number)?;
                level.kind = match value {
                    "cave" => LevelKind::Cave,
                    "static" => LevelKind::Static,
                    other => {
                        return Err(TemplateError::UnknownLevelType {
                            line: number,
                            value: other.to_owned(),
                        });
                    }
                };
            }
            "size" => {
                size = Some(parse_extent(field_value(value, number)?, number)?);
            }
            "position" => {
                let (y, x) = parse_extent(field_value(value, number)?, number)?;
                position = Pos { y: y as i32, x: x as i32 };
            }
            "map" => {
                let Some((rows, cols)) = size else {
                    return Err(TemplateError::SizeBeforeMap { line: number });
                };
                if position.y as usize + rows > MAX_ROWS || position.x as usize + cols > MAX_COLS {
                    return Err(TemplateError::MapOutOfBounds);
                }
                return stamp_rows(level, &mut lines, position, rows, cols);
            }
            other => {
                return Err(TemplateError::UnknownKey {
                    line: number,
                    key: other.to_owned(),
                });
            }
        }
    }
    Ok(())
}

/// Everything after `map:` is literal rows; they consume the rest of the file.
fn stamp_rows<'a>(
    level: &mut Level,
    lines: &mut impl Iterator<Item = (usize, &'a str)>,
    position: Pos,
    rows: usize,
    cols: usize,
) -> Result<(), TemplateError> {
    let mut stamped = 0usize;
    for (index, row) in lines {
        let number = index + 1;
        if stamped == rows {
            return Err(TemplateError::TooManyRows { line: number, expected: rows });
        }
        let width = row.chars().count();
        if width != cols {
            return Err(TemplateError::BadRowWidth { line: number, expected: cols, found: width });
        }
        for (column, glyph) in row.chars().enumerate() {
            let pos = position.offset(stamped as i32, column as i32);
            match glyph {
                '#' => level.set_kind(pos, TileKind::Wall),
                '<' => level.set_kind(pos, TileKind::UpStair),
                '>' => level.set_kind(pos, TileKind::DownStair),
                ' ' => level.set_kind(pos, TileKind::Empty),
                // Unrecognized glyphs leave the underlying tile alone.
                _ => {}
            }
        }
        stamped += 1;
    }
    if stamped != rows {
        return Err(TemplateError::MissingRows { expected: rows, found: stamped });
    }
    Ok(())
}

/// Values are separated from their key by exactly one space.
fn field_value(value: &str, line: usize) -> Result<&str, TemplateError> {
    value
        .strip_prefix(' ')
        .filter(|rest| !rest.is_empty())
        .ok_or(TemplateError::MalformedLine { line })
}

fn parse_extent(value: &str, line: usize) -> Result<(usize, usize), TemplateError> {
    let bad = TemplateError::BadCoordinate { line };
    let mut parts = value.split_whitespace();
    let y: usize = parts
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or(bad.clone())?;
    let x: usize = parts
        .next()
        .and_then(|token| token.parse().ok())
        .ok_or(bad.clone())?;
    if parts.next().is_some() || y > MAX_ROWS || x > MAX_COLS {
        return Err(bad);
    }
    Ok((y, x))
}

/// Load a legacy fixed-size dump. Space is floor, `<` and `>` are stairs, any
/// other glyph is wall. The byte length must match exactly.
pub fn apply_fixed_template(level: &mut Level, bytes: &[u8]) -> Result<(), TemplateError> {
    if bytes.len() != LEGACY_TEMPLATE_BYTES {
        return Err(TemplateError::BadLength {
            expected: LEGACY_TEMPLATE_BYTES,
            found: bytes.len(),
        });
    }
    for y in 0..MAX_ROWS {
        let row = &bytes[y * (MAX_COLS + 1)..][..MAX_COLS];
        for (x, byte) in row.iter().enumerate() {
            let kind = match byte {
                b' ' => TileKind::Empty,
                b'<' => TileKind::UpStair,
                b'>' => TileKind::DownStair,
                _ => TileKind::Wall,
            };
            level.set_kind(Pos { y: y as i32, x: x as i32 }, kind);
        }
    }
    level.kind = LevelKind::Static;
    Ok(())
}
