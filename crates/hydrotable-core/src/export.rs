//! Export configuration: which columns and rows leave the table, and which
//! hooks format them for each output format.

use crate::error::ConfigurationError;
use crate::profile::SanitizeProfile;
use crate::sanitize::CellSanitizer;
use crate::styler::StylePlan;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// Output formats offered as export buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Spreadsheet,
    Print,
    Document,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [
        ExportFormat::Spreadsheet,
        ExportFormat::Print,
        ExportFormat::Document,
    ];

    /// Button label shown on the page
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Spreadsheet => "Excel",
            ExportFormat::Print => "Print",
            ExportFormat::Document => "PDF",
        }
    }
}

/// Where the table title appears in an export
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitlePlacement {
    /// As the document title
    Title,
    /// As a message above the table, with the document title left empty
    #[default]
    MessageTop,
}

/// Font settings for one printed element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    pub font_pt: u8,
    #[serde(default)]
    pub centered: bool,
    #[serde(default)]
    pub bold: bool,
}

impl TextStyle {
    pub const fn new(font_pt: u8) -> Self {
        Self {
            font_pt,
            centered: false,
            bold: false,
        }
    }

    pub const fn emphasized(font_pt: u8) -> Self {
        Self {
            font_pt,
            centered: true,
            bold: true,
        }
    }

    fn write_rule(&self, css: &mut String, selector: &str) {
        let _ = write!(css, "{selector} {{ font-size: {}pt;", self.font_pt);
        if self.centered {
            css.push_str(" text-align: center;");
        }
        if self.bold {
            css.push_str(" font-weight: bold;");
        }
        css.push_str(" }\n");
    }
}

/// Font sizes applied to the print view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintStyle {
    pub title: TextStyle,
    pub message: TextStyle,
    pub head: TextStyle,
    pub body: TextStyle,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self {
            title: TextStyle::emphasized(16),
            message: TextStyle::emphasized(14),
            head: TextStyle::new(12),
            body: TextStyle::new(10),
        }
    }
}

impl PrintStyle {
    /// Stylesheet for the print window
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        self.title.write_rule(&mut css, "h1");
        self.message.write_rule(&mut css, "div");
        self.head.write_rule(&mut css, "thead");
        self.body.write_rule(&mut css, "tbody");
        css
    }
}

/// Font sizes for the PDF document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStyle {
    pub default_font_size: u8,
    pub table_header_font_size: u8,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        Self {
            default_font_size: 8,
            table_header_font_size: 8,
        }
    }
}

/// Format-specific settings of one export button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "format", rename_all = "snake_case")]
pub enum ExportTarget {
    Spreadsheet {
        sheet_name: String,
        title_placement: TitlePlacement,
        styles: StylePlan,
        #[serde(default)]
        header_row_excluded: bool,
    },
    Print {
        title_placement: TitlePlacement,
        #[serde(default)]
        auto_print: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<PrintStyle>,
    },
    Document {
        title_placement: TitlePlacement,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<DocumentStyle>,
    },
}

impl ExportTarget {
    pub fn format(&self) -> ExportFormat {
        match self {
            ExportTarget::Spreadsheet { .. } => ExportFormat::Spreadsheet,
            ExportTarget::Print { .. } => ExportFormat::Print,
            ExportTarget::Document { .. } => ExportFormat::Document,
        }
    }

    pub fn title_placement(&self) -> TitlePlacement {
        match self {
            ExportTarget::Spreadsheet {
                title_placement, ..
            }
            | ExportTarget::Print {
                title_placement, ..
            }
            | ExportTarget::Document {
                title_placement, ..
            } => *title_placement,
        }
    }
}

/// Immutable export settings shared by every button of one table.
///
/// Only [`ExportConfigBuilder::build_config`] creates one, so the column
/// list is always validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportConfiguration {
    title: String,
    file_name: String,
    columns: Vec<usize>,
    visible_rows_only: bool,
    sanitizer: CellSanitizer,
    targets: Vec<ExportTarget>,
}

impl ExportConfiguration {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Exported column indices, in export order
    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn visible_rows_only(&self) -> bool {
        self.visible_rows_only
    }

    pub fn sanitizer(&self) -> &CellSanitizer {
        &self.sanitizer
    }

    pub fn targets(&self) -> &[ExportTarget] {
        &self.targets
    }

    pub fn target(&self, format: ExportFormat) -> Option<&ExportTarget> {
        self.targets.iter().find(|t| t.format() == format)
    }

    /// Styles for the spreadsheet export, if one is configured
    pub fn style_plan(&self) -> Option<(&StylePlan, bool)> {
        self.targets.iter().find_map(|target| match target {
            ExportTarget::Spreadsheet {
                styles,
                header_row_excluded,
                ..
            } => Some((styles, *header_row_excluded)),
            _ => None,
        })
    }
}

/// Check that `columns` is a non-empty ascending subsequence of
/// `0..column_count`
pub fn validate_columns(columns: &[usize], column_count: usize) -> Result<(), ConfigurationError> {
    if columns.is_empty() {
        return Err(ConfigurationError::EmptyColumns);
    }

    let mut previous: Option<usize> = None;
    for &index in columns {
        if index >= column_count {
            return Err(ConfigurationError::ColumnOutOfRange {
                index,
                column_count,
            });
        }
        if let Some(previous) = previous {
            if index <= previous {
                return Err(ConfigurationError::ColumnOrder {
                    previous,
                    next: index,
                });
            }
        }
        previous = Some(index);
    }

    Ok(())
}

/// Builds [`ExportConfiguration`]s for a table with a known column count
#[derive(Debug, Clone)]
pub struct ExportConfigBuilder {
    column_count: usize,
    sanitizer: CellSanitizer,
    targets: Vec<ExportTarget>,
}

impl ExportConfigBuilder {
    /// Spreadsheet, print and PDF buttons with the placeholder-only sanitizer
    pub fn new(column_count: usize) -> Self {
        Self {
            column_count,
            sanitizer: CellSanitizer::default(),
            targets: vec![
                ExportTarget::Spreadsheet {
                    sheet_name: "Sheet1".to_string(),
                    title_placement: TitlePlacement::MessageTop,
                    styles: StylePlan::default(),
                    header_row_excluded: false,
                },
                ExportTarget::Print {
                    title_placement: TitlePlacement::MessageTop,
                    auto_print: false,
                    style: None,
                },
                ExportTarget::Document {
                    title_placement: TitlePlacement::MessageTop,
                    style: None,
                },
            ],
        }
    }

    pub fn sanitize_with(mut self, profile: SanitizeProfile) -> Self {
        self.sanitizer = CellSanitizer::new(profile);
        self
    }

    /// Replace the default targets
    pub fn targets(mut self, targets: Vec<ExportTarget>) -> Self {
        self.targets = targets;
        self
    }

    pub fn build_config(
        &self,
        table_title: &str,
        file_name: &str,
        included_columns: &[usize],
        visible_rows_only: bool,
    ) -> Result<ExportConfiguration, ConfigurationError> {
        validate_columns(included_columns, self.column_count)?;

        tracing::debug!(
            title = table_title,
            file_name,
            columns = ?included_columns,
            visible_rows_only,
            targets = self.targets.len(),
            "built export configuration"
        );

        Ok(ExportConfiguration {
            title: table_title.to_string(),
            file_name: file_name.to_string(),
            columns: included_columns.to_vec(),
            visible_rows_only,
            sanitizer: self.sanitizer.clone(),
            targets: self.targets.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_config_keeps_columns_in_order() {
        let config = ExportConfigBuilder::new(8)
            .build_config("Klamath wells", "wells", &[0, 2, 3, 4, 5, 6, 7], true)
            .unwrap();

        assert_eq!(config.columns(), &[0, 2, 3, 4, 5, 6, 7]);
        assert_eq!(config.title(), "Klamath wells");
        assert_eq!(config.file_name(), "wells");
        assert!(config.visible_rows_only());
        assert_eq!(config.targets().len(), 3);
    }

    #[test]
    fn test_build_config_out_of_range() {
        let err = ExportConfigBuilder::new(8)
            .build_config("t", "f", &[0, 8], false)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::ColumnOutOfRange {
                index: 8,
                column_count: 8
            }
        );
    }

    #[test]
    fn test_build_config_rejects_empty_and_unordered() {
        let builder = ExportConfigBuilder::new(8);
        assert_eq!(
            builder.build_config("t", "f", &[], false).unwrap_err(),
            ConfigurationError::EmptyColumns
        );
        assert_eq!(
            builder.build_config("t", "f", &[2, 1], false).unwrap_err(),
            ConfigurationError::ColumnOrder {
                previous: 2,
                next: 1
            }
        );
        assert_eq!(
            builder.build_config("t", "f", &[3, 3], false).unwrap_err(),
            ConfigurationError::ColumnOrder {
                previous: 3,
                next: 3
            }
        );
    }

    #[test]
    fn test_hooks_are_bound() {
        let config = ExportConfigBuilder::new(3)
            .sanitize_with(SanitizeProfile::station_links())
            .build_config("t", "f", &[0, 1, 2], false)
            .unwrap();

        assert_eq!(
            config.sanitizer().sanitize(Some(r#"<a href="x">123</a>"#), 1),
            "123"
        );
        let (plan, excluded) = config.style_plan().unwrap();
        assert_eq!(plan, &StylePlan::default());
        assert!(!excluded);
    }

    #[test]
    fn test_target_lookup() {
        let config = ExportConfigBuilder::new(2)
            .targets(vec![ExportTarget::Print {
                title_placement: TitlePlacement::Title,
                auto_print: false,
                style: Some(PrintStyle::default()),
            }])
            .build_config("t", "f", &[0], false)
            .unwrap();

        assert!(config.target(ExportFormat::Spreadsheet).is_none());
        assert!(config.style_plan().is_none());
        let print = config.target(ExportFormat::Print).unwrap();
        assert_eq!(print.title_placement(), TitlePlacement::Title);
    }

    #[test]
    fn test_print_css() {
        let css = PrintStyle::default().to_css();
        assert!(css.contains("h1 { font-size: 16pt; text-align: center; font-weight: bold; }"));
        assert!(css.contains("div { font-size: 14pt; text-align: center; font-weight: bold; }"));
        assert!(css.contains("thead { font-size: 12pt; }"));
        assert!(css.contains("tbody { font-size: 10pt; }"));
    }

    #[test]
    fn test_configuration_is_shareable() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExportConfiguration>();
    }

    #[test]
    fn test_format_labels() {
        let labels: Vec<_> = ExportFormat::ALL.iter().map(|f| f.label()).collect();
        assert_eq!(labels, vec!["Excel", "Print", "PDF"]);
    }
}
