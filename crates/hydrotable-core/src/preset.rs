//! Page presets: the table widget options and export settings for one kind
//! of station table, loadable from JSON.

use crate::error::ConfigurationError;
use crate::export::{
    validate_columns, DocumentStyle, ExportConfigBuilder, ExportConfiguration, ExportTarget,
    PrintStyle, TitlePlacement,
};
use crate::profile::SanitizeProfile;
use crate::styler::{StylePlan, CAPTION_STYLE, GROUPED_CAPTION_STYLE, TEXT_STYLE};
use serde::{Deserialize, Serialize};

/// Caption element holding the title of grouped station tables
pub const STATIONS_CAPTION: &str = "caption#stationsCaption";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub column: usize,
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortOrder {
    pub const fn asc(column: usize) -> Self {
        Self {
            column,
            direction: SortDirection::Asc,
        }
    }
}

/// Where the export title comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleSource {
    Fixed(String),
    /// Text of the element matching this selector
    Caption(String),
}

/// Options passed through to the table widget
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableOptions {
    pub paging: bool,
    pub ordering: bool,
    pub info: bool,
    pub searching: bool,
    pub auto_width: bool,
    pub fixed_header: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_y: Option<String>,
    pub scroll_collapse: bool,
    /// Column whose values group rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_group: Option<usize>,
    /// Columns hidden from view and search
    pub hidden_columns: Vec<usize>,
    pub order: Vec<SortOrder>,
    /// Widget layout string
    pub dom: String,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            paging: false,
            ordering: true,
            info: true,
            searching: true,
            auto_width: true,
            fixed_header: false,
            scroll_y: None,
            scroll_collapse: false,
            row_group: None,
            hidden_columns: Vec::new(),
            order: vec![SortOrder::asc(0)],
            dom: "Bfrtip".to_string(),
        }
    }
}

/// Export side of a preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportSettings {
    pub columns: Vec<usize>,
    #[serde(default)]
    pub visible_rows_only: bool,
    /// Empty leaves the file name to the export engine
    #[serde(default)]
    pub file_name: String,
    #[serde(default)]
    pub sanitize: SanitizeProfile,
    pub targets: Vec<ExportTarget>,
}

/// Everything needed to enhance one station table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TablePreset {
    pub name: String,
    pub column_count: usize,
    pub title: TitleSource,
    #[serde(default)]
    pub table: TableOptions,
    pub export: ExportSettings,
}

impl TablePreset {
    /// Load and validate a preset
    pub fn from_json(json: &str) -> Result<Self, ConfigurationError> {
        let preset: TablePreset = serde_json::from_str(json)?;
        preset.validate()?;
        Ok(preset)
    }

    pub fn to_json(&self) -> Result<String, ConfigurationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Flow and precipitation station table: eight columns, sorted by the
    /// first, with a fixed header
    pub fn fps(title: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            name: "fps".to_string(),
            column_count: 8,
            title: TitleSource::Fixed(title.into()),
            table: TableOptions {
                info: false,
                searching: false,
                fixed_header: true,
                ..TableOptions::default()
            },
            export: ExportSettings {
                columns: (0..8).collect(),
                visible_rows_only: false,
                file_name: file_name.into(),
                sanitize: SanitizeProfile::placeholder_only(),
                targets: vec![
                    ExportTarget::Spreadsheet {
                        sheet_name: "FPS".to_string(),
                        title_placement: TitlePlacement::MessageTop,
                        styles: StylePlan::caption(CAPTION_STYLE).with_text_column(0, TEXT_STYLE),
                        header_row_excluded: false,
                    },
                    ExportTarget::Print {
                        title_placement: TitlePlacement::Title,
                        auto_print: false,
                        style: None,
                    },
                ],
            },
        }
    }

    /// Well tables grouped by the second column, with one hidden column and
    /// status highlighting in the spreadsheet export
    pub fn station_groups(hidden_column: usize, sheet_name: impl Into<String>) -> Self {
        Self {
            name: "station_groups".to_string(),
            column_count: 8,
            title: TitleSource::Caption(STATIONS_CAPTION.to_string()),
            table: TableOptions {
                auto_width: false,
                scroll_y: Some("40vh".to_string()),
                scroll_collapse: true,
                row_group: Some(1),
                hidden_columns: vec![hidden_column],
                order: vec![SortOrder::asc(2)],
                ..TableOptions::default()
            },
            export: ExportSettings {
                columns: vec![0, 2, 3, 4, 5, 6, 7],
                visible_rows_only: true,
                file_name: String::new(),
                sanitize: SanitizeProfile::station_links(),
                targets: vec![
                    ExportTarget::Spreadsheet {
                        sheet_name: sheet_name.into(),
                        title_placement: TitlePlacement::MessageTop,
                        styles: StylePlan::caption(GROUPED_CAPTION_STYLE).with_status_keywords(),
                        header_row_excluded: true,
                    },
                    ExportTarget::Print {
                        title_placement: TitlePlacement::MessageTop,
                        auto_print: false,
                        style: Some(PrintStyle::default()),
                    },
                    ExportTarget::Document {
                        title_placement: TitlePlacement::MessageTop,
                        style: Some(DocumentStyle::default()),
                    },
                ],
            },
        }
    }

    pub fn klamath_wells() -> Self {
        Self {
            name: "klamath_wells".to_string(),
            ..Self::station_groups(6, "KlamathWells")
        }
    }

    pub fn harney_wells() -> Self {
        Self {
            name: "harney_wells".to_string(),
            ..Self::station_groups(5, "HarneyWells")
        }
    }

    /// Look up a built-in preset by name
    pub fn builtin(name: &str) -> Option<Self> {
        match name {
            "fps" => Some(Self::fps("", "")),
            "klamath_wells" => Some(Self::klamath_wells()),
            "harney_wells" => Some(Self::harney_wells()),
            _ => None,
        }
    }

    /// Check every column reference against `column_count`
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        let check = |index: usize| {
            if index < self.column_count {
                Ok(())
            } else {
                Err(ConfigurationError::ColumnOutOfRange {
                    index,
                    column_count: self.column_count,
                })
            }
        };

        self.table.hidden_columns.iter().copied().try_for_each(check)?;
        self.table.order.iter().map(|o| o.column).try_for_each(check)?;
        self.table.row_group.into_iter().try_for_each(check)?;
        validate_columns(&self.export.columns, self.column_count)
    }

    /// Export configuration for this preset under the given title
    pub fn export_config(&self, title: &str) -> Result<ExportConfiguration, ConfigurationError> {
        ExportConfigBuilder::new(self.column_count)
            .sanitize_with(self.export.sanitize.clone())
            .targets(self.export.targets.clone())
            .build_config(
                title,
                &self.export.file_name,
                &self.export.columns,
                self.export.visible_rows_only,
            )
    }
}
