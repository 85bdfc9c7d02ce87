//! [`TableEngine`] backed by the host page's table widget.

use crate::buttons::widget_options;
use hydrotable_core::{
    ExportConfiguration, ExportTarget, SetupError, SheetCell, SheetDocument, SheetRow, StylePlan,
    TableEngine, TableOptions,
};
use serde::Serialize;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const WORKSHEET: &str = "sheet1.xml";

type BodyHook = Closure<dyn Fn(JsValue, JsValue, u32) -> String>;
type CustomizeHook = Closure<dyn Fn(JsValue)>;

/// A table enhanced by the widget. Keeps the export hooks alive for as
/// long as JavaScript holds on to it.
#[wasm_bindgen]
pub struct EnhancedTable {
    table: JsValue,
    _body_hooks: Vec<BodyHook>,
    _customize_hooks: Vec<CustomizeHook>,
}

#[wasm_bindgen]
impl EnhancedTable {
    /// The widget's own table API object
    #[wasm_bindgen(getter)]
    pub fn api(&self) -> JsValue {
        self.table.clone()
    }
}

/// Drives the widget through a host-supplied factory
/// `(selector, options) => widgetApi`
pub struct WidgetEngine {
    document: web_sys::Document,
    factory: js_sys::Function,
}

impl WidgetEngine {
    pub fn new(factory: js_sys::Function) -> Result<Self, SetupError> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| SetupError::Engine("no document available".to_string()))?;
        Ok(Self { document, factory })
    }
}

impl TableEngine for WidgetEngine {
    type Table = EnhancedTable;

    fn match_count(&self, selector: &str) -> usize {
        self.document
            .query_selector_all(selector)
            .map_or(0, |nodes| nodes.length() as usize)
    }

    fn text_of(&self, selector: &str) -> Option<String> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .and_then(|element| element.text_content())
    }

    fn enhance(
        &mut self,
        selector: &str,
        options: &TableOptions,
        export: &ExportConfiguration,
    ) -> Result<EnhancedTable, SetupError> {
        web_sys::console::log_1(
            &format!("datatablesInit {} title '{}'", self.match_count(selector), export.title())
                .into(),
        );

        let value = widget_options(options, export);
        let js_options = value
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| SetupError::Engine(e.to_string()))?;

        let buttons = get(&js_options, "buttons")?;
        let export = Rc::new(export.clone());
        let mut body_hooks = Vec::new();
        let mut customize_hooks = Vec::new();

        for (index, target) in export.targets().iter().enumerate() {
            let button = js_sys::Reflect::get_u32(&buttons, index as u32).map_err(js_error)?;

            let body = body_hook(Rc::clone(&export));
            let format = js_sys::Object::new();
            set(&format, "body", body.as_ref())?;
            set(&get(&button, "exportOptions")?, "format", &format)?;
            body_hooks.push(body);

            if let Some(hook) = customize_hook(target) {
                set(&button, "customize", hook.as_ref())?;
                customize_hooks.push(hook);
            }
        }

        let table = self
            .factory
            .call2(&JsValue::NULL, &JsValue::from_str(selector), &js_options)
            .map_err(js_error)?;

        Ok(EnhancedTable {
            table,
            _body_hooks: body_hooks,
            _customize_hooks: customize_hooks,
        })
    }
}

/// `exportOptions.format.body(data, row, column, node)`
fn body_hook(export: Rc<ExportConfiguration>) -> BodyHook {
    Closure::new(move |data: JsValue, _row: JsValue, column: u32| {
        let raw = data.as_string().or_else(|| data.as_f64().map(|n| n.to_string()));
        export.sanitizer().sanitize(raw.as_deref(), column as usize)
    })
}

fn customize_hook(target: &ExportTarget) -> Option<CustomizeHook> {
    match target {
        ExportTarget::Spreadsheet {
            styles,
            header_row_excluded,
            ..
        } => {
            let plan = styles.clone();
            let excluded = *header_row_excluded;
            Some(Closure::new(move |xlsx: JsValue| {
                if let Err(err) = style_workbook(&xlsx, &plan, excluded) {
                    web_sys::console::error_1(&err);
                }
            }))
        }
        ExportTarget::Print {
            style: Some(style), ..
        } => {
            let css = style.to_css();
            Some(Closure::new(move |win: JsValue| {
                if let Err(err) = style_print_window(&win, &css) {
                    web_sys::console::error_1(&err);
                }
            }))
        }
        ExportTarget::Document {
            style: Some(style), ..
        } => {
            let style = *style;
            Some(Closure::new(move |doc: JsValue| {
                let result =
                    set_path(&doc, &["defaultStyle", "fontSize"], style.default_font_size)
                        .and_then(|_| {
                            set_path(
                                &doc,
                                &["styles", "tableHeader", "fontSize"],
                                style.table_header_font_size,
                            )
                        });
                if let Err(err) = result {
                    web_sys::console::error_1(&err);
                }
            }))
        }
        _ => None,
    }
}

/// Apply `plan` to the generated worksheet of an `xlsx` export
fn style_workbook(
    xlsx: &JsValue,
    plan: &StylePlan,
    header_row_excluded: bool,
) -> Result<(), JsValue> {
    let xl = js_sys::Reflect::get(xlsx, &"xl".into())?;
    let worksheets = js_sys::Reflect::get(&xl, &"worksheets".into())?;
    let sheet: web_sys::Document =
        js_sys::Reflect::get(&worksheets, &WORKSHEET.into())?.dyn_into()?;

    let rows = sheet.get_elements_by_tag_name("row");
    let mut elements = Vec::new();
    let mut document = SheetDocument::new();

    for row_index in 0..rows.length() {
        let Some(row) = rows.item(row_index) else {
            continue;
        };
        let cells = row.get_elements_by_tag_name("c");
        let mut sheet_row = SheetRow::default();
        for cell_index in 0..cells.length() {
            let Some(cell) = cells.item(cell_index) else {
                continue;
            };
            sheet_row.cells.push(SheetCell {
                reference: cell.get_attribute("r").unwrap_or_default(),
                text: cell.text_content().unwrap_or_default(),
                style: cell.get_attribute("s").and_then(|s| s.parse().ok()),
            });
            elements.push(cell);
        }
        document.rows.push(sheet_row);
    }

    plan.apply_styles(&mut document, header_row_excluded);

    let styled = document.rows.iter().flat_map(|row| row.cells.iter());
    for (element, cell) in elements.iter().zip(styled) {
        if let Some(style) = cell.style {
            element.set_attribute("s", &style.to_string())?;
        }
    }
    Ok(())
}

/// Append the print stylesheet to the print window's body
fn style_print_window(win: &JsValue, css: &str) -> Result<(), JsValue> {
    let document: web_sys::Document = js_sys::Reflect::get(win, &"document".into())?.dyn_into()?;
    if let Some(body) = document.query_selector("body")? {
        body.insert_adjacent_html("beforeend", &format!("<style>{css}</style>"))?;
    }
    Ok(())
}

fn set_path(root: &JsValue, path: &[&str], value: u8) -> Result<(), JsValue> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };
    let mut target = root.clone();
    for key in parents {
        target = js_sys::Reflect::get(&target, &JsValue::from_str(key))?;
    }
    js_sys::Reflect::set(&target, &JsValue::from_str(last), &JsValue::from(value))?;
    Ok(())
}

fn get(target: &JsValue, key: &str) -> Result<JsValue, SetupError> {
    js_sys::Reflect::get(target, &JsValue::from_str(key)).map_err(js_error)
}

fn set(target: &JsValue, key: &str, value: &JsValue) -> Result<(), SetupError> {
    js_sys::Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(js_error)
}

fn js_error(err: JsValue) -> SetupError {
    SetupError::Engine(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
