use crate::core::conformers::Conformer;
use nalgebra::Point3;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum XyzError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: XyzParseErrorKind },
}

#[derive(Debug, Error)]
pub enum XyzParseErrorKind {
    #[error("Invalid atom count '{0}'")]
    InvalidAtomCount(String),
    #[error("Expected {expected} atom records, found {found}")]
    Truncated { expected: usize, found: usize },
    #[error("Atom record needs an element and three coordinates")]
    ShortRecord,
    #[error("Invalid coordinate '{0}'")]
    InvalidCoordinate(String),
}

/// Multi-frame XYZ files: one conformer per frame.
pub struct XyzFile;

impl XyzFile {
    /// Reads every frame of an XYZ stream.
    ///
    /// The comment line of each frame becomes the conformer label. If the
    /// comment is a bare number, or contains an `energy=<value>` token, that
    /// value is stored as the conformer energy.
    pub fn read_from(reader: &mut impl BufRead) -> Result<Vec<Conformer>, XyzError> {
        let mut conformers = Vec::new();
        let mut lines = reader.lines().enumerate();

        while let Some((index, line)) = lines.next() {
            let line = line?;
            let count_str = line.trim();
            if count_str.is_empty() {
                continue;
            }
            let count: usize = count_str.parse().map_err(|_| XyzError::Parse {
                line: index + 1,
                kind: XyzParseErrorKind::InvalidAtomCount(count_str.to_string()),
            })?;

            let comment = match lines.next() {
                Some((_, comment)) => comment?,
                None => {
                    return Err(XyzError::Parse {
                        line: index + 2,
                        kind: XyzParseErrorKind::Truncated {
                            expected: count,
                            found: 0,
                        },
                    });
                }
            };

            // The header count is untrusted; grow as records arrive.
            let mut symbols = Vec::new();
            let mut positions = Vec::new();
            for found in 0..count {
                let Some((atom_index, record)) = lines.next() else {
                    return Err(XyzError::Parse {
                        line: index + 3 + found,
                        kind: XyzParseErrorKind::Truncated {
                            expected: count,
                            found,
                        },
                    });
                };
                let record = record?;
                let (symbol, position) =
                    parse_atom_record(&record).map_err(|kind| XyzError::Parse {
                        line: atom_index + 1,
                        kind,
                    })?;
                symbols.push(symbol);
                positions.push(position);
            }

            let label = comment.trim();
            let mut conformer = Conformer::new(label, symbols, positions);
            conformer.energy = parse_energy(label);
            conformers.push(conformer);
        }
        Ok(conformers)
    }

    pub fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<Conformer>, XyzError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    pub fn write_to(conformers: &[Conformer], writer: &mut impl Write) -> Result<(), XyzError> {
        for conformer in conformers {
            writeln!(writer, "{}", conformer.len())?;
            match conformer.energy {
                Some(energy) if !conformer.label.contains("energy=") => {
                    writeln!(writer, "{} energy={}", conformer.label, energy)?
                }
                _ => writeln!(writer, "{}", conformer.label)?,
            }
            for (symbol, p) in conformer.symbols.iter().zip(&conformer.positions) {
                writeln!(writer, "{:<2} {:>14.8} {:>14.8} {:>14.8}", symbol, p.x, p.y, p.z)?;
            }
        }
        Ok(())
    }

    pub fn write_to_path<P: AsRef<Path>>(
        conformers: &[Conformer],
        path: P,
    ) -> Result<(), XyzError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(conformers, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

fn parse_atom_record(record: &str) -> Result<(String, Point3<f64>), XyzParseErrorKind> {
    let parts: Vec<&str> = record.split_whitespace().collect();
    if parts.len() < 4 {
        return Err(XyzParseErrorKind::ShortRecord);
    }
    let coordinate = |s: &str| {
        s.parse::<f64>()
            .map_err(|_| XyzParseErrorKind::InvalidCoordinate(s.to_string()))
    };
    let position = Point3::new(
        coordinate(parts[1])?,
        coordinate(parts[2])?,
        coordinate(parts[3])?,
    );
    Ok((parts[0].to_string(), position))
}

fn parse_energy(comment: &str) -> Option<f64> {
    if let Ok(value) = comment.parse::<f64>() {
        return Some(value);
    }
    comment
        .split(|c: char| c.is_whitespace() || c == ',')
        .find_map(|token| {
            let (key, value) = token.split_once('=')?;
            key.eq_ignore_ascii_case("energy")
                .then(|| value.parse::<f64>().ok())
                .flatten()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    const TWO_FRAMES: &str = "3
conformer 1 energy=-76.4
O   0.000000   0.000000   0.000000
H   0.957200   0.000000   0.000000
H  -0.240000   0.926600   0.000000
3
-76.1
O   0.000000   0.000000   0.000000
H   0.960000   0.000000   0.000000
H  -0.250000   0.930000   0.000000
";

    #[test]
    fn reads_multiple_frames_with_energies() {
        let conformers = XyzFile::read_from(&mut Cursor::new(TWO_FRAMES)).unwrap();
        assert_eq!(conformers.len(), 2);
        assert_eq!(conformers[0].label, "conformer 1 energy=-76.4");
        assert_eq!(conformers[0].energy, Some(-76.4));
        assert_eq!(conformers[1].energy, Some(-76.1));
        assert_eq!(conformers[0].symbols, vec!["O", "H", "H"]);
        assert_eq!(conformers[1].positions[1], Point3::new(0.96, 0.0, 0.0));
    }

    #[test]
    fn comment_without_energy_leaves_it_empty() {
        let input = "1\nmethane fragment\nC 0 0 0\n";
        let conformers = XyzFile::read_from(&mut Cursor::new(input)).unwrap();
        assert_eq!(conformers[0].energy, None);
    }

    #[test]
    fn invalid_atom_count_reports_line() {
        let result = XyzFile::read_from(&mut Cursor::new("three\n\n"));
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 1,
                kind: XyzParseErrorKind::InvalidAtomCount(_)
            })
        ));
    }

    #[test]
    fn truncated_frame_is_an_error() {
        let result = XyzFile::read_from(&mut Cursor::new("3\ncomment\nO 0 0 0\n"));
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                kind: XyzParseErrorKind::Truncated {
                    expected: 3,
                    found: 1
                },
                ..
            })
        ));
    }

    #[test]
    fn huge_atom_count_is_a_truncation_error() {
        let input = "99999999999999999
comment
O 0 0 0
";
        let result = XyzFile::read_from(&mut Cursor::new(input));
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 4,
                kind: XyzParseErrorKind::Truncated {
                    expected: 99999999999999999,
                    found: 1
                }
            })
        ));
    }

    #[test]
    fn bad_coordinate_is_an_error() {
        let result = XyzFile::read_from(&mut Cursor::new("1\n\nO 0 x 0\n"));
        assert!(matches!(
            result,
            Err(XyzError::Parse {
                line: 3,
                kind: XyzParseErrorKind::InvalidCoordinate(_)
            })
        ));
    }

    #[test]
    fn written_frames_read_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out.xyz");
        let conformers = XyzFile::read_from(&mut Cursor::new(TWO_FRAMES)).unwrap();
        XyzFile::write_to_path(&conformers, &path).unwrap();

        let reread = XyzFile::read_from_path(&path).unwrap();
        assert_eq!(reread.len(), 2);
        assert_eq!(reread[0].energy, Some(-76.4));
        assert_eq!(reread[1].energy, Some(-76.1));
        assert!((reread[0].positions[2].y - 0.9266).abs() < 1e-8);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempdir().unwrap();
        let result = XyzFile::read_from_path(dir.path().join("missing.xyz"));
        assert!(matches!(result, Err(XyzError::Io(_))));
    }
}
