//! The table widget seam.
//!
//! Rendering, sorting and file generation live in the host page's widget
//! library. [`TableEngine`] is the capability this crate needs from it, and
//! [`setup_table`] is the host's single entry point.

use crate::error::SetupError;
use crate::export::ExportConfiguration;
use crate::preset::{TableOptions, TablePreset, TitleSource};

/// Host-side table widget
pub trait TableEngine {
    /// Handle to an enhanced table
    type Table;

    /// Number of page elements matching `selector`
    fn match_count(&self, selector: &str) -> usize;

    /// Text content of the first element matching `selector`
    fn text_of(&self, selector: &str) -> Option<String>;

    /// Turn the table at `selector` into an interactive table with export
    /// buttons. The engine calls back into the configuration's sanitizer for
    /// every exported cell and into its style plan after generating a sheet.
    fn enhance(
        &mut self,
        selector: &str,
        options: &TableOptions,
        export: &ExportConfiguration,
    ) -> Result<Self::Table, SetupError>;
}

/// Resolve the title a preset exports under
pub fn resolve_title<E: TableEngine + ?Sized>(engine: &E, preset: &TablePreset) -> String {
    match &preset.title {
        TitleSource::Fixed(title) => title.clone(),
        TitleSource::Caption(selector) => engine.text_of(selector).unwrap_or_else(|| {
            tracing::warn!(selector = %selector, "caption not found, exporting without a title");
            String::new()
        }),
    }
}

/// Enhance the table at `selector` according to `preset`
pub fn setup_table<E: TableEngine + ?Sized>(
    engine: &mut E,
    selector: &str,
    preset: &TablePreset,
) -> Result<E::Table, SetupError> {
    let count = engine.match_count(selector);
    tracing::info!(selector, count, preset = %preset.name, "initializing table");
    if count == 0 {
        return Err(SetupError::TableNotFound(selector.to_string()));
    }

    preset.validate()?;
    let title = resolve_title(engine, preset);
    let export = preset.export_config(&title)?;

    engine.enhance(selector, &preset.table, &export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::SheetDocument;
    use crate::error::ConfigurationError;
    use crate::styler::{ACTIVE_STYLE, GROUPED_CAPTION_STYLE, INACTIVE_STYLE};
    use std::collections::HashMap;

    /// Records enhancements and simulates one spreadsheet export
    #[derive(Default)]
    struct FakeEngine {
        elements: HashMap<String, Vec<String>>,
        enhanced: Vec<(String, TableOptions, ExportConfiguration)>,
    }

    impl FakeEngine {
        fn with_element(mut self, selector: &str, text: &str) -> Self {
            self.elements
                .entry(selector.to_string())
                .or_default()
                .push(text.to_string());
            self
        }

        /// Run the sanitizer over raw rows and style the generated sheet,
        /// as the widget does when the spreadsheet button is pressed
        fn export_sheet(&self, raw_rows: &[Vec<&str>]) -> SheetDocument {
            let (_, _, config) = &self.enhanced[0];
            let mut rows = vec![
                vec![config.title().to_string()],
                config.columns().iter().map(|col| format!("Column {col}")).collect(),
            ];
            for raw in raw_rows {
                rows.push(
                    config
                        .columns()
                        .iter()
                        .map(|&col| config.sanitizer().sanitize(raw.get(col).copied(), col))
                        .collect(),
                );
            }
            let mut document = SheetDocument::from_text_rows(rows);
            if let Some((plan, excluded)) = config.style_plan() {
                plan.apply_styles(&mut document, excluded);
            }
            document
        }
    }

    impl TableEngine for FakeEngine {
        type Table = usize;

        fn match_count(&self, selector: &str) -> usize {
            self.elements.get(selector).map_or(0, Vec::len)
        }

        fn text_of(&self, selector: &str) -> Option<String> {
            self.elements.get(selector)?.first().cloned()
        }

        fn enhance(
            &mut self,
            selector: &str,
            options: &TableOptions,
            export: &ExportConfiguration,
        ) -> Result<usize, SetupError> {
            self.enhanced
                .push((selector.to_string(), options.clone(), export.clone()));
            Ok(self.enhanced.len() - 1)
        }
    }

    #[test]
    fn test_setup_reads_caption_title() {
        let mut engine = FakeEngine::default()
            .with_element("#wells", "")
            .with_element(crate::preset::STATIONS_CAPTION, "Klamath Basin wells");

        let handle = setup_table(&mut engine, "#wells", &TablePreset::klamath_wells()).unwrap();
        assert_eq!(handle, 0);

        let (selector, options, export) = &engine.enhanced[0];
        assert_eq!(selector, "#wells");
        assert_eq!(options.hidden_columns, vec![6]);
        assert_eq!(export.title(), "Klamath Basin wells");
    }

    #[test]
    fn test_setup_missing_caption_uses_empty_title() {
        let mut engine = FakeEngine::default().with_element("#wells", "");
        setup_table(&mut engine, "#wells", &TablePreset::harney_wells()).unwrap();
        assert_eq!(engine.enhanced[0].2.title(), "");
    }

    #[test]
    fn test_setup_missing_table() {
        let mut engine = FakeEngine::default();
        let err = setup_table(&mut engine, "#nope", &TablePreset::fps("t", "f")).unwrap_err();
        assert_eq!(err, SetupError::TableNotFound("#nope".into()));
        assert!(engine.enhanced.is_empty());
    }

    #[test]
    fn test_setup_invalid_preset() {
        let mut engine = FakeEngine::default().with_element("#t", "");
        let mut preset = TablePreset::fps("t", "f");
        preset.export.columns = vec![0, 9];
        let err = setup_table(&mut engine, "#t", &preset).unwrap_err();
        assert_eq!(
            err,
            SetupError::Configuration(ConfigurationError::ColumnOutOfRange {
                index: 9,
                column_count: 8
            })
        );
    }

    #[test]
    fn test_export_flow() {
        let mut engine = FakeEngine::default()
            .with_element("#wells", "")
            .with_element(crate::preset::STATIONS_CAPTION, "Harney Basin wells");
        setup_table(&mut engine, "#wells", &TablePreset::harney_wells()).unwrap();

        let sheet = engine.export_sheet(&[
            vec![
                r#"<span class="site_no"><a href="site.html?id=1">433000119</a></span>"#,
                "Harney",
                "HARN 1",
                r#"<img src="Symbols/check.gif">"#,
                "",
                "Active",
                "x",
                "Status: Active",
            ],
            vec!["433000120", "Harney", "HARN 2", "", "", "Inactive", "x", "Status: Inactive"],
        ]);

        assert_eq!(sheet.rows[0].cells[0].style, Some(GROUPED_CAPTION_STYLE));
        assert_eq!(sheet.cell(1, 0).and_then(|c| c.style), None);

        assert_eq!(sheet.cell(2, 0).map(|c| c.text.as_str()), Some("433000119"));
        assert_eq!(sheet.cell(2, 2).map(|c| c.text.as_str()), Some("Yes"));
        assert_eq!(sheet.cell(2, 3).map(|c| c.text.as_str()), Some("--"));
        assert_eq!(sheet.cell(2, 4).and_then(|c| c.style), Some(ACTIVE_STYLE));
        assert_eq!(sheet.cell(2, 6).and_then(|c| c.style), Some(ACTIVE_STYLE));
        assert_eq!(sheet.cell(3, 4).and_then(|c| c.style), Some(INACTIVE_STYLE));
        assert_eq!(sheet.cell(3, 6).and_then(|c| c.style), Some(INACTIVE_STYLE));
        assert_eq!(sheet.cell(3, 1).and_then(|c| c.style), None);
    }
}
