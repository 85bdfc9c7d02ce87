//! Widget option objects built from presets and export configurations.
//!
//! Hooks (body formatting, sheet customization) are functions and are
//! attached separately once the options reach JavaScript.

use hydrotable_core::{
    ExportConfiguration, ExportFormat, ExportTarget, SortDirection, TableOptions, TitlePlacement,
};
use serde_json::{json, Value};

/// Widget button type for an export format
pub fn extend_name(format: ExportFormat) -> &'static str {
    match format {
        ExportFormat::Spreadsheet => "excelHtml5",
        ExportFormat::Print => "print",
        ExportFormat::Document => "pdfHtml5",
    }
}

/// Table-level options, without buttons
pub fn table_options(options: &TableOptions) -> Value {
    let order: Vec<Value> = options
        .order
        .iter()
        .map(|o| {
            let direction = match o.direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            };
            json!([o.column, direction])
        })
        .collect();

    let mut value = json!({
        "paging": options.paging,
        "ordering": options.ordering,
        "info": options.info,
        "searching": options.searching,
        "autoWidth": options.auto_width,
        "stripeClasses": [],
        "order": order,
        "dom": options.dom,
    });

    if options.fixed_header {
        value["fixedHeader"] = json!({ "header": true, "footer": false });
    }
    if let Some(scroll_y) = &options.scroll_y {
        value["scrollY"] = json!(scroll_y);
    }
    if options.scroll_collapse {
        value["scrollCollapse"] = json!(true);
    }
    if let Some(column) = options.row_group {
        value["rowGroup"] = json!({ "dataSrc": column });
    }
    if !options.hidden_columns.is_empty() {
        value["columnDefs"] = json!([{
            "targets": options.hidden_columns,
            "visible": false,
            "searchable": false,
        }]);
    }

    value
}

/// One export button
pub fn button_options(target: &ExportTarget, export: &ExportConfiguration) -> Value {
    let format = target.format();
    let mut button = json!({
        "extend": extend_name(format),
        "text": format.label(),
        "exportOptions": { "columns": export.columns() },
    });

    if export.visible_rows_only() {
        button["exportOptions"]["rows"] = json!(":visible");
    }

    match target.title_placement() {
        TitlePlacement::Title => button["title"] = json!(export.title()),
        TitlePlacement::MessageTop => {
            button["messageTop"] = json!(export.title());
            if format == ExportFormat::Spreadsheet {
                button["title"] = json!("");
            }
        }
    }

    match target {
        ExportTarget::Spreadsheet { sheet_name, .. } => {
            button["sheetName"] = json!(sheet_name);
        }
        ExportTarget::Print { auto_print, .. } => {
            button["autoPrint"] = json!(auto_print);
        }
        ExportTarget::Document { .. } => {}
    }

    if format != ExportFormat::Print && !export.file_name().is_empty() {
        button["filename"] = json!(export.file_name());
    }

    button
}

/// Complete widget options: table options plus one button per target
pub fn widget_options(options: &TableOptions, export: &ExportConfiguration) -> Value {
    let mut value = table_options(options);
    value["buttons"] = export
        .targets()
        .iter()
        .map(|target| button_options(target, export))
        .collect();
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use hydrotable_core::TablePreset;

    #[test]
    fn test_fps_options() {
        let preset = TablePreset::fps("Flow stations", "fps");
        let export = preset.export_config("Flow stations").unwrap();
        let value = widget_options(&preset.table, &export);

        assert_eq!(value["paging"], json!(false));
        assert_eq!(value["info"], json!(false));
        assert_eq!(value["order"], json!([[0, "asc"]]));
        assert_eq!(value["fixedHeader"], json!({ "header": true, "footer": false }));
        assert!(value.get("rowGroup").is_none());

        let buttons = value["buttons"].as_array().unwrap();
        assert_eq!(buttons.len(), 2);
        assert_eq!(buttons[0]["extend"], json!("excelHtml5"));
        assert_eq!(buttons[0]["sheetName"], json!("FPS"));
        assert_eq!(buttons[0]["title"], json!(""));
        assert_eq!(buttons[0]["messageTop"], json!("Flow stations"));
        assert_eq!(buttons[0]["filename"], json!("fps"));
        assert_eq!(buttons[0]["exportOptions"]["columns"], json!([0, 1, 2, 3, 4, 5, 6, 7]));
        assert!(buttons[0]["exportOptions"].get("rows").is_none());

        assert_eq!(buttons[1]["extend"], json!("print"));
        assert_eq!(buttons[1]["title"], json!("Flow stations"));
        assert_eq!(buttons[1]["autoPrint"], json!(false));
        assert!(buttons[1].get("filename").is_none());
    }

    #[test]
    fn test_station_options() {
        let preset = TablePreset::klamath_wells();
        let export = preset.export_config("Klamath Basin wells").unwrap();
        let value = widget_options(&preset.table, &export);

        assert_eq!(value["rowGroup"], json!({ "dataSrc": 1 }));
        assert_eq!(value["scrollY"], json!("40vh"));
        assert_eq!(value["scrollCollapse"], json!(true));
        assert_eq!(value["order"], json!([[2, "asc"]]));
        assert_eq!(
            value["columnDefs"],
            json!([{ "targets": [6], "visible": false, "searchable": false }])
        );

        let buttons = value["buttons"].as_array().unwrap();
        let extends: Vec<_> = buttons.iter().map(|b| b["extend"].clone()).collect();
        assert_eq!(extends, vec![json!("excelHtml5"), json!("print"), json!("pdfHtml5")]);
        for button in buttons {
            assert_eq!(button["exportOptions"]["rows"], json!(":visible"));
            assert_eq!(button["exportOptions"]["columns"], json!([0, 2, 3, 4, 5, 6, 7]));
            assert_eq!(button["messageTop"], json!("Klamath Basin wells"));
            assert!(button.get("filename").is_none());
        }
        assert!(buttons[1].get("title").is_none());
    }
}
