use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

pub const NAME_DELIMITER: char = '_';

/// One scanned subdirectory, split into its three name fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    date: String,
    kind: String,
    version: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed entry name '{name}': expected 3 '_'-separated fields, found {fields}")]
pub struct ParseEntryError {
    pub name: String,
    pub fields: usize,
}

impl Entry {
    #[must_use]
    pub fn new(date: &str, kind: &str, version: &str) -> Self {
        Entry {
            date: date.to_string(),
            kind: kind.to_string(),
            version: version.to_string(),
        }
    }

    /// Parse a directory base name such as "2023-01-01_Release_v1".
    pub fn from_dir_name(name: &str) -> Result<Self, ParseEntryError> {
        let parts: Vec<&str> = name.split(NAME_DELIMITER).collect();
        match parts.as_slice() {
            [date, kind, version] => Ok(Entry::new(date, kind, version)),
            _ => Err(ParseEntryError {
                name: name.to_string(),
                fields: parts.len(),
            }),
        }
    }

    /// Parse the last component of a scanned directory path.
    pub fn from_path(path: &Path) -> Result<Self, ParseEntryError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        Entry::from_dir_name(&name)
    }

    #[must_use]
    pub fn date(&self) -> &str {
        &self.date
    }

    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn field(&self, column: Column) -> &str {
        match column {
            Column::Date => &self.date,
            Column::Type => &self.kind,
            Column::Version => &self.version,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Date,
    Type,
    Version,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Date, Column::Type, Column::Version];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Column::Date => "Date",
            Column::Type => "Type",
            Column::Version => "Ver",
        }
    }

    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Column::Date => 0,
            Column::Type => 1,
            Column::Version => 2,
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown column '{0}' (expected date, type, ver or 1-3)")]
pub struct UnknownColumn(pub String);

impl FromStr for Column {
    type Err = UnknownColumn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "date" => Ok(Column::Date),
            "2" | "type" => Ok(Column::Type),
            "3" | "ver" | "version" => Ok(Column::Version),
            _ => Err(UnknownColumn(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    #[must_use]
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    #[must_use]
    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}
