pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => {
            log_warnings(value);
            csv_out::print_csv(value)
        }
        OutputFormat::Minimal => {
            log_warnings(value);
            minimal::print_minimal(value)
        }
    }
}

/// Formats without room for warnings surface them on stderr instead.
fn log_warnings(value: &Value) {
    let warnings = value
        .get("warnings")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(Value::as_str);
    for w in warnings {
        tracing::warn!("{w}");
    }
}
