use serde::{Deserialize, Serialize};

/// Style identifier into the export engine's palette
pub type StyleId = u32;

/// A cell of a generated spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetCell {
    /// A1 reference as written by the export engine (e.g. "B3")
    #[serde(default)]
    pub reference: String,
    #[serde(default)]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<StyleId>,
}

impl SheetCell {
    pub fn new(reference: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            text: text.into(),
            style: None,
        }
    }

    /// Zero-based column parsed from the reference's letters
    pub fn column(&self) -> Option<u32> {
        let letters: String = self
            .reference
            .chars()
            .take_while(|c| c.is_ascii_alphabetic())
            .collect();
        col_from_label(&letters)
    }
}

/// A row of a generated spreadsheet
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetRow {
    #[serde(default)]
    pub cells: Vec<SheetCell>,
}

/// The worksheet tree handed over by the export engine after generation.
///
/// Rows are kept in document order; "row 1" always means the first entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetDocument {
    #[serde(default)]
    pub rows: Vec<SheetRow>,
}

impl SheetDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from plain text rows, assigning A1 references
    pub fn from_text_rows<R, S>(rows: R) -> Self
    where
        R: IntoIterator,
        R::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(row, cells)| SheetRow {
                cells: cells
                    .into_iter()
                    .enumerate()
                    .map(|(col, text)| {
                        SheetCell::new(format!("{}{}", col_to_label(col as u32), row + 1), text)
                    })
                    .collect(),
            })
            .collect();
        Self { rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell by zero-based row and column position
    pub fn cell(&self, row: usize, col: usize) -> Option<&SheetCell> {
        self.rows.get(row)?.cells.get(col)
    }
}

/// Convert column index (0-indexed) to label (A, B, ..., Z, AA, AB, ...)
pub fn col_to_label(col: u32) -> String {
    let mut label = String::new();
    let mut n = col + 1;

    while n > 0 {
        n -= 1;
        label.insert(0, char::from(b'A' + (n % 26) as u8));
        n /= 26;
    }

    label
}

/// Convert column label (A, B, ..., Z, AA, AB, ...) to index (0-indexed)
pub fn col_from_label(label: &str) -> Option<u32> {
    let mut col: u32 = 0;

    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return None;
        }
        col = col
            .checked_mul(26)?
            .checked_add(c.to_ascii_uppercase() as u32 - 'A' as u32 + 1)?;
    }

    col.checked_sub(1)
}
