//! Post-generation styling of exported spreadsheets.

use crate::document::{SheetDocument, StyleId};
use serde::{Deserialize, Serialize};

/// Bold caption on a shaded background
pub const CAPTION_STYLE: StyleId = 42;
/// Caption style used by grouped station tables
pub const GROUPED_CAPTION_STYLE: StyleId = 17;
/// Plain text cell
pub const TEXT_STYLE: StyleId = 0;
/// Green fill for active stations
pub const ACTIVE_STYLE: StyleId = 37;
/// Red fill for inactive stations
pub const INACTIVE_STYLE: StyleId = 2;

const ACTIVE_KEYWORD: &str = "Active";
const INACTIVE_KEYWORD: &str = "Inactive";

/// Style for status text, matched case-sensitively anywhere in the cell
pub fn status_style(text: &str) -> Option<StyleId> {
    if text.contains(ACTIVE_KEYWORD) {
        Some(ACTIVE_STYLE)
    } else if text.contains(INACTIVE_KEYWORD) {
        Some(INACTIVE_STYLE)
    } else {
        None
    }
}

/// Column forced to a style on every row below the first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextColumnStyle {
    pub column: u32,
    pub style: StyleId,
}

/// Which styles are applied to a generated sheet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StylePlan {
    pub header_style: StyleId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_column: Option<TextColumnStyle>,
    #[serde(default)]
    pub status_keywords: bool,
}

impl Default for StylePlan {
    fn default() -> Self {
        Self::caption(CAPTION_STYLE)
    }
}

/// Counts of cells touched by one [`StylePlan::apply_styles`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleSummary {
    pub header: usize,
    pub text_column: usize,
    pub active: usize,
    pub inactive: usize,
}

impl StylePlan {
    /// Highlight the first row only
    pub fn caption(header_style: StyleId) -> Self {
        Self {
            header_style,
            text_column: None,
            status_keywords: false,
        }
    }

    pub fn with_text_column(mut self, column: u32, style: StyleId) -> Self {
        self.text_column = Some(TextColumnStyle { column, style });
        self
    }

    pub fn with_status_keywords(mut self) -> Self {
        self.status_keywords = true;
        self
    }

    /// Style a generated sheet in place.
    ///
    /// Every cell of row 1 receives `header_style`. The text column pass and
    /// the status keyword pass never touch row 1; with `header_row_excluded`
    /// the keyword pass also skips row 2, the column header row that follows
    /// the caption. An empty document is left alone.
    pub fn apply_styles(
        &self,
        document: &mut SheetDocument,
        header_row_excluded: bool,
    ) -> StyleSummary {
        let mut summary = StyleSummary::default();
        let Some((first, rest)) = document.rows.split_first_mut() else {
            return summary;
        };

        for cell in &mut first.cells {
            cell.style = Some(self.header_style);
            summary.header += 1;
        }

        if let Some(text_column) = self.text_column {
            for cell in rest.iter_mut().flat_map(|row| row.cells.iter_mut()) {
                if cell.column() == Some(text_column.column) {
                    cell.style = Some(text_column.style);
                    summary.text_column += 1;
                }
            }
        }

        if self.status_keywords {
            let skip = usize::from(header_row_excluded);
            for cell in rest.iter_mut().skip(skip).flat_map(|row| row.cells.iter_mut()) {
                match status_style(&cell.text) {
                    Some(ACTIVE_STYLE) => {
                        cell.style = Some(ACTIVE_STYLE);
                        summary.active += 1;
                    }
                    Some(style) => {
                        cell.style = Some(style);
                        summary.inactive += 1;
                    }
                    None => {}
                }
            }
        }

        tracing::debug!(
            header = summary.header,
            text_column = summary.text_column,
            active = summary.active,
            inactive = summary.inactive,
            "styled generated sheet"
        );
        summary
    }
}
