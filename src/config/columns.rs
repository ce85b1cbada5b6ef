//! @acp:module "Column Addressing"
//! @acp:summary "Spreadsheet column letters and inclusive column spans"
//! @acp:domain cli
//! @acp:layer config

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Zero-based index for a column label like `A`, `M`, or `AB`
pub fn column_index(letters: &str) -> Option<usize> {
    let letters = letters.trim();
    if letters.is_empty() || letters.len() > 3 {
        return None;
    }
    let mut index = 0usize;
    for c in letters.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        index = index * 26 + (c.to_ascii_uppercase() as usize - 'A' as usize + 1);
    }
    Some(index - 1)
}

/// Column label for a zero-based index
pub fn column_letters(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push((b'A' + (index % 26) as u8) as char);
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}

/// Inclusive range of columns, written `B:D` or `C`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ColumnSpan {
    start: usize,
    end: usize,
}

impl ColumnSpan {
    /// `None` when `end` comes before `start`
    pub fn new(start: usize, end: usize) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn indices(&self) -> std::ops::RangeInclusive<usize> {
        self.start..=self.end
    }

    pub(crate) fn default_roles() -> Self {
        Self { start: 1, end: 3 }
    }

    pub(crate) fn default_lifecycles() -> Self {
        Self { start: 5, end: 8 }
    }

    pub(crate) fn default_journeys() -> Self {
        Self { start: 9, end: 12 }
    }
}

impl FromStr for ColumnSpan {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, last) = match s.split_once(':') {
            Some((a, b)) => (a, b),
            None => (s, s),
        };
        let start = column_index(first).ok_or_else(|| format!("Invalid column: {:?}", first))?;
        let end = column_index(last).ok_or_else(|| format!("Invalid column: {:?}", last))?;
        if end < start {
            return Err(format!("Column span {} runs backwards", s));
        }
        Ok(Self { start, end })
    }
}

impl TryFrom<String> for ColumnSpan {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColumnSpan> for String {
    fn from(span: ColumnSpan) -> Self {
        span.to_string()
    }
}

impl fmt::Display for ColumnSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", column_letters(self.start))
        } else {
            write!(
                f,
                "{}:{}",
                column_letters(self.start),
                column_letters(self.end)
            )
        }
    }
}
