//! Single-line share codes for board layouts.
//!
//! A code reads `maze:v1:<rows>x<columns>:<payload>` where the payload is the
//! base64 encoding of a JSON string holding one glyph per cell in row-major
//! order.

use base64::{engine::general_purpose::STANDARD_NO_PAD, Engine as _};
use maze_escape_core::{Board, Cell, Layout, LayoutError, Position};
use thiserror::Error;

const CODE_DOMAIN: &str = "maze";
const CODE_VERSION: &str = "v1";

/// Identifier prefix emitted before the dimensions and payload.
const CODE_HEADER: &str = "maze:v1";
/// Delimiter used to separate the prefix, grid dimensions and payload.
const FIELD_DELIMITER: char = ':';

/// Encodes `layout` into a string suitable for copying between players.
#[must_use]
pub(crate) fn encode(layout: &Layout) -> String {
    let board = layout.board();
    let glyphs: String = board.iter().map(|(_, cell)| cell.glyph()).collect();
    let json = serde_json::Value::String(glyphs).to_string();
    let encoded = STANDARD_NO_PAD.encode(json);
    format!(
        "{CODE_HEADER}:{}x{}:{encoded}",
        board.rows(),
        board.columns()
    )
}

/// Decodes a share code back into a playable layout.
pub(crate) fn decode(value: &str) -> Result<Layout, ShareCodeError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ShareCodeError::EmptyPayload);
    }

    let mut parts = trimmed.split(FIELD_DELIMITER);
    let domain = parts.next().ok_or(ShareCodeError::MissingPrefix)?;
    let version = parts.next().ok_or(ShareCodeError::MissingVersion)?;
    let dimensions = parts.next().ok_or(ShareCodeError::MissingDimensions)?;
    let payload = parts.next().ok_or(ShareCodeError::MissingPayload)?;

    if domain != CODE_DOMAIN {
        return Err(ShareCodeError::InvalidPrefix(domain.to_owned()));
    }
    if version != CODE_VERSION {
        return Err(ShareCodeError::UnsupportedVersion(version.to_owned()));
    }

    let (rows, columns) = parse_dimensions(dimensions)?;
    let bytes = STANDARD_NO_PAD
        .decode(payload.as_bytes())
        .map_err(ShareCodeError::InvalidEncoding)?;
    let glyphs: String = serde_json::from_slice(&bytes).map_err(ShareCodeError::InvalidPayload)?;

    let expected = u64::from(rows) * u64::from(columns);
    let actual = glyphs.chars().count();
    if u64::try_from(actual).ok() != Some(expected) {
        return Err(ShareCodeError::CellCountMismatch { expected, actual });
    }

    let mut board = Board::new(rows, columns);
    let cells = (0..rows)
        .flat_map(|row| (0..columns).map(move |column| Position::new(row, column)));
    for (position, glyph) in cells.zip(glyphs.chars()) {
        let cell = Cell::from_glyph(glyph).ok_or(ShareCodeError::UnknownGlyph(glyph))?;
        board.set(position, cell);
    }

    Ok(Layout::new(board)?)
}

/// Errors that can occur while decoding share codes.
#[derive(Debug, Error)]
pub(crate) enum ShareCodeError {
    /// The provided string was empty or contained only whitespace.
    #[error("share code was empty")]
    EmptyPayload,
    /// The prefix segment was missing.
    #[error("share code is missing the prefix")]
    MissingPrefix,
    /// The version segment was missing.
    #[error("share code is missing the version")]
    MissingVersion,
    /// The grid dimensions were missing.
    #[error("share code is missing the grid dimensions")]
    MissingDimensions,
    /// The payload segment was missing.
    #[error("share code is missing the payload")]
    MissingPayload,
    /// The code used an unexpected prefix segment.
    #[error("share code prefix '{0}' is not supported")]
    InvalidPrefix(String),
    /// The code used an unsupported version identifier.
    #[error("share code version '{0}' is not supported")]
    UnsupportedVersion(String),
    /// The grid dimensions could not be parsed.
    #[error("could not parse grid dimensions '{0}'")]
    InvalidDimensions(String),
    /// The base64 payload could not be decoded.
    #[error("could not decode share code payload: {0}")]
    InvalidEncoding(#[source] base64::DecodeError),
    /// The decoded payload was not a JSON string.
    #[error("could not parse share code payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),
    /// The payload did not hold one glyph per cell.
    #[error("share code holds {actual} cells but its dimensions need {expected}")]
    CellCountMismatch {
        /// Cells implied by the dimensions.
        expected: u64,
        /// Glyphs found in the payload.
        actual: usize,
    },
    /// The payload contained a character that is not a cell glyph.
    #[error("share code contains unknown cell glyph {0:?}")]
    UnknownGlyph(char),
    /// The decoded board is not a playable layout.
    #[error(transparent)]
    InvalidLayout(#[from] LayoutError),
}

fn parse_dimensions(dimensions: &str) -> Result<(u32, u32), ShareCodeError> {
    let invalid = || ShareCodeError::InvalidDimensions(dimensions.to_owned());
    let (rows, columns) = dimensions.split_once(['x', 'X']).ok_or_else(invalid)?;

    let rows = rows.trim().parse::<u32>().map_err(|_| invalid())?;
    let columns = columns.trim().parse::<u32>().map_err(|_| invalid())?;

    if rows == 0 || columns == 0 {
        return Err(invalid());
    }

    Ok((rows, columns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        let mut board = Board::new(3, 4);
        board.set(Position::new(1, 0), Cell::Hero);
        board.set(Position::new(0, 1), Cell::Wall);
        board.set(Position::new(2, 1), Cell::Abyss);
        board.set(Position::new(1, 2), Cell::SuperMonster);
        board.set(Position::new(0, 2), Cell::Bat);
        board.set(Position::new(2, 2), Cell::Monster);
        board.set(Position::new(2, 3), Cell::Exit);
        Layout::new(board).expect("valid layout")
    }

    fn code_for(rows: u32, columns: u32, glyphs: &str) -> String {
        let json = serde_json::Value::String(glyphs.to_owned()).to_string();
        format!(
            "{CODE_HEADER}:{rows}x{columns}:{}",
            STANDARD_NO_PAD.encode(json)
        )
    }

    #[test]
    fn decoding_restores_every_cell() {
        let original = layout();
        let encoded = encode(&original);
        assert!(encoded.starts_with(&format!("{CODE_HEADER}:3x4:")));

        let decoded = decode(&encoded).expect("code decodes");
        assert_eq!(decoded, original);
        assert_eq!(decoded.hero(), Position::new(1, 0));
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let encoded = format!("  {}\n", encode(&layout()));
        assert!(decode(&encoded).is_ok());
    }

    #[test]
    fn header_problems_are_reported() {
        assert!(matches!(decode("   "), Err(ShareCodeError::EmptyPayload)));
        assert!(matches!(decode("maze"), Err(ShareCodeError::MissingVersion)));
        assert!(matches!(
            decode("maze:v1:3x4"),
            Err(ShareCodeError::MissingPayload)
        ));
        assert!(matches!(
            decode("grid:v1:3x4:abc"),
            Err(ShareCodeError::InvalidPrefix(prefix)) if prefix == "grid"
        ));
        assert!(matches!(
            decode("maze:v2:3x4:abc"),
            Err(ShareCodeError::UnsupportedVersion(version)) if version == "v2"
        ));
        assert!(matches!(
            decode("maze:v1:0x4:abc"),
            Err(ShareCodeError::InvalidDimensions(_))
        ));
        assert!(matches!(
            decode("maze:v1:three:abc"),
            Err(ShareCodeError::InvalidDimensions(_))
        ));
        assert!(matches!(
            decode("maze:v1:3x4:!!!"),
            Err(ShareCodeError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn payload_problems_are_reported() {
        let not_json = format!("{CODE_HEADER}:1x2:{}", STANDARD_NO_PAD.encode("H*"));
        assert!(matches!(
            decode(&not_json),
            Err(ShareCodeError::InvalidPayload(_))
        ));
        assert!(matches!(
            decode(&code_for(1, 3, "H*")),
            Err(ShareCodeError::CellCountMismatch {
                expected: 3,
                actual: 2
            })
        ));
        assert!(matches!(
            decode(&code_for(1, 3, "H?*")),
            Err(ShareCodeError::UnknownGlyph('?'))
        ));
        assert!(matches!(
            decode(&code_for(1, 3, "H *")),
            Ok(layout) if layout.board().count(Cell::Empty) == 1
        ));
    }

    #[test]
    fn decoded_boards_must_be_playable() {
        assert!(matches!(
            decode(&code_for(1, 3, "  *")),
            Err(ShareCodeError::InvalidLayout(LayoutError::MissingHero))
        ));
        assert!(matches!(
            decode(&code_for(1, 4, "H**H")),
            Err(ShareCodeError::InvalidLayout(LayoutError::MultipleHeroes(2)))
        ));
    }
}
