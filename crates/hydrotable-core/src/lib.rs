pub mod document;
pub mod engine;
pub mod error;
pub mod export;
pub mod markup;
pub mod preset;
pub mod profile;
pub mod sanitize;
pub mod styler;

pub use document::{col_from_label, col_to_label, SheetCell, SheetDocument, SheetRow, StyleId};
pub use engine::{resolve_title, setup_table, TableEngine};
pub use error::{ConfigurationError, SetupError};
pub use export::{
    validate_columns, DocumentStyle, ExportConfigBuilder, ExportConfiguration, ExportFormat,
    ExportTarget, PrintStyle, TextStyle, TitlePlacement,
};
pub use markup::{MarkupMatch, MarkupRule};
pub use preset::{
    ExportSettings, SortDirection, SortOrder, TableOptions, TablePreset, TitleSource,
};
pub use profile::{ColumnProfile, SanitizeProfile};
pub use sanitize::{sanitize, CellSanitizer, PLACEHOLDER};
pub use styler::{status_style, StylePlan, StyleSummary, TextColumnStyle};
