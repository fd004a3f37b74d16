//! Chart Data Loader Module
//! Parses the line-oriented `name=value` chart data format.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, error, info, warn};

/// Title used when the file provides no `Title=` line.
pub const DEFAULT_TITLE: &str = "Chart Title";

/// Reserved key that sets the chart title instead of adding a slice.
const TITLE_KEY: &str = "Title";

#[derive(Error, Debug)]
enum LineError {
    #[error("needs to be name=value")]
    Malformed,
    #[error("value needs to be an integer")]
    BadValue,
}

/// A single name/value pair, one per pie slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Datum {
    pub name: String,
    pub value: i64,
}

/// Result of one load pass: the chart title plus the valid data lines
/// in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieData {
    pub title: String,
    pub data: Vec<Datum>,
}

impl Default for PieData {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            data: Vec::new(),
        }
    }
}

/// What a single input line contributes to the accumulated result.
enum Directive {
    Comment,
    Title(String),
    Slice(Datum),
}

/// Loads chart data files. Never fails: file-level errors yield whatever
/// partial state was accumulated, line-level errors skip the line.
pub struct DataLoader;

impl DataLoader {
    /// Read a chart data file. The file handle is dropped when the pass
    /// finishes, successful or not.
    pub fn load(path: &Path) -> PieData {
        info!("loading chart data from {}", path.display());

        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) => {
                error!("cannot open {}: {}", path.display(), e);
                return PieData::default();
            }
        };

        let result = Self::parse(BufReader::new(file));
        info!(
            "loaded {} slice(s), title {:?}",
            result.data.len(),
            result.title
        );
        result
    }

    /// Single forward pass over the input lines, accumulating title and
    /// data. A mid-stream read error stops the pass and keeps what was
    /// read so far.
    fn parse<R: BufRead>(reader: R) -> PieData {
        let mut result = PieData::default();

        for line in reader.lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    error!("read error, keeping partial data: {}", e);
                    break;
                }
            };

            match Self::parse_line(&line) {
                Ok(Directive::Comment) => {}
                Ok(Directive::Title(title)) => {
                    // Last Title line wins.
                    result.title = title;
                }
                Ok(Directive::Slice(datum)) => {
                    debug!("slice {}={}", datum.name, datum.value);
                    result.data.push(datum);
                }
                Err(e) => {
                    warn!("skipping line {:?}: {}", line, e);
                }
            }
        }

        result
    }

    /// Classify one line. Split on the first `=`; exactly two tokens with a
    /// non-empty key are required, and the value must be a base-10 integer
    /// unless the key is the reserved `Title`.
    fn parse_line(line: &str) -> Result<Directive, LineError> {
        if line.starts_with('#') {
            return Ok(Directive::Comment);
        }

        let (key, value) = line.split_once('=').ok_or(LineError::Malformed)?;
        if key.is_empty() || value.is_empty() || value.contains('=') {
            return Err(LineError::Malformed);
        }

        if key == TITLE_KEY {
            return Ok(Directive::Title(value.to_string()));
        }

        let value: i64 = value.parse().map_err(|_| LineError::BadValue)?;
        Ok(Directive::Slice(Datum {
            name: key.to_string(),
            value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(input: &str) -> PieData {
        DataLoader::parse(Cursor::new(input))
    }

    #[test]
    fn test_well_formed_lines_become_data() {
        let result = parse("A=10\nB=-3\nC=0\n");
        assert_eq!(
            result.data,
            vec![
                Datum {
                    name: "A".to_string(),
                    value: 10
                },
                Datum {
                    name: "B".to_string(),
                    value: -3
                },
                Datum {
                    name: "C".to_string(),
                    value: 0
                },
            ]
        );
        assert_eq!(result.title, DEFAULT_TITLE);
    }

    #[test]
    fn test_comments_are_ignored() {
        let result = parse("#Title=Nope\n#A=1\nB=2\n");
        assert_eq!(result.title, DEFAULT_TITLE);
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].name, "B");
    }

    #[test]
    fn test_title_last_write_wins() {
        let result = parse("Title=Foo\nA=1\nTitle=Bar\n");
        assert_eq!(result.title, "Bar");
        assert_eq!(result.data.len(), 1);
    }

    #[test]
    fn test_title_value_is_raw_text() {
        let result = parse("Title=Sales 2020 (Q3)\n");
        assert_eq!(result.title, "Sales 2020 (Q3)");
        assert!(result.data.is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let result = parse("no equals sign\nA=1=2\n=5\nA=\nB=2\n");
        assert_eq!(result.data.len(), 1);
        assert_eq!(result.data[0].name, "B");
    }

    #[test]
    fn test_non_integer_value_is_skipped() {
        let result = parse("X=abc\nY=1.5\nZ=7\n");
        assert_eq!(result.data.len(), 1);
        assert_eq!(
            result.data[0],
            Datum {
                name: "Z".to_string(),
                value: 7
            }
        );
    }

    #[test]
    fn test_input_order_preserved() {
        let result = parse("C=3\nA=1\nB=2\n");
        let names: Vec<&str> = result.data.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_duplicate_names_kept_in_sequence() {
        // Deduplication happens at the dataset layer, not here.
        let result = parse("A=1\nA=2\n");
        assert_eq!(result.data.len(), 2);
    }

    #[test]
    fn test_end_to_end_sample() {
        let result = parse("Title=Sales\nA=10\nB=20\n#comment\nC=notanumber\nD=5\n");
        assert_eq!(result.title, "Sales");
        let pairs: Vec<(&str, i64)> = result
            .data
            .iter()
            .map(|d| (d.name.as_str(), d.value))
            .collect();
        assert_eq!(pairs, vec![("A", 10), ("B", 20), ("D", 5)]);
    }

    #[test]
    fn test_missing_file_yields_default() {
        let result = DataLoader::load(Path::new("/nonexistent/data.txt"));
        assert_eq!(result, PieData::default());
        assert_eq!(result.title, DEFAULT_TITLE);
    }
}
