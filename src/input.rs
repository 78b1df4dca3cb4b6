// Reading and splitting the items to group
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

use crate::error::{GroupError, Result};

/// Names grouped when no input is given
pub const SAMPLE_NAMES: [&str; 8] = [
    "raymond", "rachel", "matthew", "roger", "betty", "melissa", "judith", "charlie",
];

/// How raw text is split into items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    Whitespace,
    Lines,
    Comma,
}

impl FromStr for Separator {
    type Err = GroupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "whitespace" | "ws" | "space" => Ok(Separator::Whitespace),
            "lines" | "line" | "newline" => Ok(Separator::Lines),
            "comma" | "," | "csv" => Ok(Separator::Comma),
            _ => Err(GroupError::UnknownSeparator(s.to_string())),
        }
    }
}

/// Split text into trimmed, non-empty items
pub fn split_items(text: &str, separator: Separator) -> Vec<String> {
    let pieces: Box<dyn Iterator<Item = &str>> = match separator {
        Separator::Whitespace => Box::new(text.split_whitespace()),
        Separator::Lines => Box::new(text.lines()),
        Separator::Comma => Box::new(text.split(',')),
    };

    pieces
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

/// Read items from a file, or from stdin when `source` is `-`
pub fn read_items(source: &Path, separator: Separator) -> Result<Vec<String>> {
    let text = if source == Path::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(|err| GroupError::Input {
                path: "<stdin>".into(),
                source: err,
            })?;
        buf
    } else {
        fs::read_to_string(source).map_err(|err| GroupError::Input {
            path: source.to_path_buf(),
            source: err,
        })?
    };

    let items = split_items(&text, separator);
    debug!("Read {} items from {}", items.len(), source.display());
    Ok(items)
}

pub fn sample_items() -> Vec<String> {
    SAMPLE_NAMES.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_split_whitespace() {
        let items = split_items("  roger\tbetty \n\n judith ", Separator::Whitespace);
        assert_eq!(items, vec!["roger", "betty", "judith"]);
    }

    #[test]
    fn test_split_lines_keeps_inner_spaces() {
        let items = split_items("mary ann\n\n  bob \n", Separator::Lines);
        assert_eq!(items, vec!["mary ann", "bob"]);
    }

    #[test]
    fn test_split_comma() {
        let items = split_items("a, bb,,ccc ,", Separator::Comma);
        assert_eq!(items, vec!["a", "bb", "ccc"]);
    }

    #[test]
    fn test_separator_from_str() {
        assert_eq!("lines".parse::<Separator>().unwrap(), Separator::Lines);
        assert_eq!(",".parse::<Separator>().unwrap(), Separator::Comma);
        assert!("tab".parse::<Separator>().is_err());
    }

    #[test]
    fn test_read_items_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "raymond rachel").unwrap();
        writeln!(file, "roger").unwrap();

        let items = read_items(file.path(), Separator::Whitespace).unwrap();
        assert_eq!(items, vec!["raymond", "rachel", "roger"]);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.txt");
        let err = read_items(&missing, Separator::Whitespace).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
