//! Turning CLI inputs into rendered output

use anyhow::{bail, Context, Result};
use jaspresultslib::{apply_script, parse_script, Plot, RenderOptions, Table};
use log::{debug, info};
use serde_json::Value;

/// Element kinds a snapshot document can hold
const TABLE_KIND: &str = "table";
const PLOT_KIND: &str = "plot";

/// Restore a table or plot snapshot and render it.
///
/// The element kind comes from the snapshot's `type` field; a snapshot
/// without one is read as a table.
pub fn render_snapshot(json: &str, options: &RenderOptions) -> Result<String> {
    let value: Value = serde_json::from_str(json).context("snapshot is not valid JSON")?;
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .unwrap_or(TABLE_KIND)
        .to_string();
    debug!("restoring {} snapshot", kind);

    match kind.as_str() {
        TABLE_KIND => {
            let table = Table::from_json_value(value)?;
            Ok(options.render_table(&table)?)
        }
        PLOT_KIND => {
            let plot = Plot::from_json_value(value)?;
            Ok(options.render_plot(&plot)?)
        }
        other => bail!("cannot render a snapshot of type '{}'", other),
    }
}

/// Run an operation script on a fresh table and render the result.
pub fn build_table(script: &str, options: &RenderOptions) -> Result<String> {
    let ops = parse_script(script).context("invalid operation script")?;
    info!("applying {} operations", ops.len());

    let mut table = Table::default();
    apply_script(&mut table, ops)?;
    Ok(options.render_table(&table)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jaspresultslib::OutputFormat;

    const SCRIPT: &str = r#"[
        {"op": "set_title", "title": "Counts"},
        {"op": "add_columns", "data": {"dataframe": {"columns": [{"name": "n", "values": [3, 4]}]}}}
    ]"#;

    #[test]
    fn test_build_then_render_snapshot() {
        let text = build_table(SCRIPT, &RenderOptions::new()).unwrap();
        let snapshot =
            build_table(SCRIPT, &RenderOptions::new().format(OutputFormat::Snapshot)).unwrap();
        assert_eq!(render_snapshot(&snapshot, &RenderOptions::new()).unwrap(), text);
    }

    #[test]
    fn test_render_plot_snapshot() {
        let json = r#"{"type": "plot", "title": "Density", "filePathPng": "d.png"}"#;
        let html = render_snapshot(
            json,
            &RenderOptions::new().format(OutputFormat::Html),
        )
        .unwrap();
        assert!(html.contains("d.png"));
    }

    #[test]
    fn test_unknown_snapshot_type() {
        let err = render_snapshot(r#"{"type": "collection"}"#, &RenderOptions::new()).unwrap_err();
        assert!(err.to_string().contains("collection"));
    }
}
