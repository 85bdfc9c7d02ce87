use hydrotable_core::{
    setup_table, ConfigurationError, SanitizeProfile, SetupError, SheetDocument, StylePlan,
    TablePreset,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::widget::{EnhancedTable, WidgetEngine};

/// Structured error object for JavaScript
#[derive(Serialize)]
pub struct JsHydroError {
    code: String,
    message: String,
}

impl From<SetupError> for JsHydroError {
    fn from(err: SetupError) -> Self {
        Self {
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

impl From<ConfigurationError> for JsHydroError {
    fn from(err: ConfigurationError) -> Self {
        SetupError::from(err).into()
    }
}

fn to_js_error(err: impl Into<JsHydroError>) -> JsValue {
    let js_error = err.into();
    serde_wasm_bindgen::to_value(&js_error).unwrap_or(JsValue::NULL)
}

fn parse_json<T: serde::de::DeserializeOwned>(json: &str) -> Result<T, ConfigurationError> {
    Ok(serde_json::from_str(json)?)
}

fn enhance(
    selector: &str,
    preset: &TablePreset,
    factory: js_sys::Function,
) -> Result<EnhancedTable, JsValue> {
    let mut engine = WidgetEngine::new(factory).map_err(to_js_error)?;
    setup_table(&mut engine, selector, preset).map_err(to_js_error)
}

/// Flow and precipitation station table with spreadsheet and print export
#[wasm_bindgen(js_name = fpsDataTable)]
pub fn fps_data_table(
    selector: &str,
    title: &str,
    file_name: &str,
    factory: js_sys::Function,
) -> Result<EnhancedTable, JsValue> {
    enhance(selector, &TablePreset::fps(title, file_name), factory)
}

/// Klamath Basin well table, grouped and titled from its caption
#[wasm_bindgen(js_name = klamathDataTable)]
pub fn klamath_data_table(
    selector: &str,
    factory: js_sys::Function,
) -> Result<EnhancedTable, JsValue> {
    enhance(selector, &TablePreset::klamath_wells(), factory)
}

/// Harney Basin well table, grouped and titled from its caption
#[wasm_bindgen(js_name = harneyDataTable)]
pub fn harney_data_table(
    selector: &str,
    factory: js_sys::Function,
) -> Result<EnhancedTable, JsValue> {
    enhance(selector, &TablePreset::harney_wells(), factory)
}

/// Enhance a table from a JSON preset
#[wasm_bindgen(js_name = presetDataTable)]
pub fn preset_data_table(
    selector: &str,
    preset_json: &str,
    factory: js_sys::Function,
) -> Result<EnhancedTable, JsValue> {
    let preset = TablePreset::from_json(preset_json).map_err(to_js_error)?;
    enhance(selector, &preset, factory)
}

/// JSON of a built-in preset, as a starting point for custom pages
#[wasm_bindgen(js_name = builtinPreset)]
pub fn builtin_preset(name: &str) -> Result<String, JsValue> {
    let preset = TablePreset::builtin(name).ok_or_else(|| {
        to_js_error(ConfigurationError::InvalidPreset(format!(
            "unknown preset '{name}'"
        )))
    })?;
    preset.to_json().map_err(to_js_error)
}

/// Sanitize one cell value with a JSON sanitize profile
#[wasm_bindgen(js_name = sanitizeCell)]
pub fn sanitize_cell(
    value: Option<String>,
    column: usize,
    profile_json: &str,
) -> Result<String, JsValue> {
    let profile: SanitizeProfile = parse_json(profile_json).map_err(to_js_error)?;
    Ok(hydrotable_core::sanitize(value.as_deref(), column, &profile))
}

/// Style a JSON sheet document and return it as JSON
#[wasm_bindgen(js_name = styleSheet)]
pub fn style_sheet(
    document_json: &str,
    plan_json: &str,
    header_row_excluded: bool,
) -> Result<String, JsValue> {
    let mut document: SheetDocument = parse_json(document_json).map_err(to_js_error)?;
    let plan: StylePlan = parse_json(plan_json).map_err(to_js_error)?;
    plan.apply_styles(&mut document, header_row_excluded);
    serde_json::to_string(&document).map_err(|e| to_js_error(ConfigurationError::from(e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let err: JsHydroError = ConfigurationError::EmptyColumns.into();
        assert_eq!(err.code, "EMPTY_COLUMNS");
        assert_eq!(err.message, "at least one column must be included in the export");
    }

    #[test]
    fn test_parse_json_reports_invalid_preset() {
        let err = parse_json::<StylePlan>("{}").unwrap_err();
        assert_eq!(err.code(), "INVALID_PRESET");
    }
}
