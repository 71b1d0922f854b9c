use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use lidarcam_3d::calibration::{CalibrationMatrices, CalibrationRecord};

// 0-indexed lines of the matrices used by the transforms
const P2_LINE: usize = 2;
const P3_LINE: usize = 3;
const R0_LINE: usize = 4;
const TR_VELO2CAM_LINE: usize = 5;
const NUM_LINES: usize = TR_VELO2CAM_LINE + 1;

/// Error types for the calibration file module.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CalibFileError {
    /// Error reading the file
    #[error("Failed to read calibration file")]
    Io(#[from] std::io::Error),

    /// Fewer lines than the matrices need
    #[error("Calibration file has {0} lines, expected at least 6")]
    MissingLines(usize),

    /// Wrong number of values on a matrix line
    #[error("Line {line}: expected {expected} values, got {found}")]
    InvalidNumValues {
        /// 0-indexed line number
        line: usize,
        /// Number of values of the matrix
        expected: usize,
        /// Number of values on the line
        found: usize,
    },

    /// Non-numeric value
    #[error("Line {line}: parse error {reason}")]
    ParseError {
        /// 0-indexed line number
        line: usize,
        /// What failed to parse
        reason: String,
    },

    /// Error deserializing the JSON matrices
    #[error("Failed to deserialize calibration matrices")]
    Json(#[from] serde_json::Error),
}

/// Read a KITTI object calibration file.
///
/// The matrices are taken from fixed lines; each line holds a label followed
/// by the row-major values:
///
/// ```text
/// P0: ...                      (ignored)
/// P1: ...                      (ignored)
/// P2: 12 values                3x4
/// P3: 12 values                3x4
/// R0_rect: 9 values            3x3
/// Tr_velo_to_cam: 12 values    3x4
/// ```
///
/// # Arguments
///
/// * `path` - The path to the calibration file.
///
/// # Returns
///
/// The four calibration matrices.
pub fn read_calibration_file(
    path: impl AsRef<Path>,
) -> Result<CalibrationMatrices, CalibFileError> {
    // open the file and create a buffered reader
    let file = File::open(path.as_ref())?;
    let matrices = parse_calibration(BufReader::new(file))?;
    log::debug!("read calibration from {}", path.as_ref().display());
    Ok(matrices)
}

/// Parse the calibration text from any buffered reader.
///
/// See [`read_calibration_file`] for the format. Lines after the sixth are
/// ignored.
pub fn parse_calibration<R: BufRead>(reader: R) -> Result<CalibrationMatrices, CalibFileError> {
    let lines = reader
        .lines()
        .take(NUM_LINES)
        .collect::<Result<Vec<_>, _>>()?;

    if lines.len() < NUM_LINES {
        return Err(CalibFileError::MissingLines(lines.len()));
    }

    let record = CalibrationRecord {
        p2: parse_values(&lines[P2_LINE], P2_LINE)?,
        p3: parse_values(&lines[P3_LINE], P3_LINE)?,
        r0: parse_values(&lines[R0_LINE], R0_LINE)?,
        tr_velo2cam: parse_values(&lines[TR_VELO2CAM_LINE], TR_VELO2CAM_LINE)?,
    };

    Ok(record.into())
}

/// Read calibration matrices stored as JSON.
///
/// The file holds the mapping `{"P2": [..12], "P3": [..12], "R0": [..9],
/// "Tr_velo2cam": [..12]}` of row-major values.
pub fn read_calibration_json(
    path: impl AsRef<Path>,
) -> Result<CalibrationMatrices, CalibFileError> {
    let file = File::open(path.as_ref())?;
    let matrices = serde_json::from_reader(BufReader::new(file))?;
    log::debug!("read calibration from {}", path.as_ref().display());
    Ok(matrices)
}

/// Parse the values following the label of a matrix line.
fn parse_values<const N: usize>(line: &str, line_index: usize) -> Result<[f32; N], CalibFileError> {
    // the first token is the label, e.g. `P2:`
    let values = line
        .split_whitespace()
        .skip(1)
        .map(|s| {
            s.parse::<f32>().map_err(|e| CalibFileError::ParseError {
                line: line_index,
                reason: format!("{}: {}", s, e),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let found = values.len();
    values
        .try_into()
        .map_err(|_| CalibFileError::InvalidNumValues {
            line: line_index,
            expected: N,
            found,
        })
}
