use serde_json::Value;
use std::io;

/// Write output as CSV to stdout.
///
/// Row-shaped results (amortization schedules, trend series) are written as a
/// table; anything else as field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    for record in csv_records(value) {
        let _ = wtr.write_record(&record);
    }
    let _ = wtr.flush();
}

fn csv_records(value: &Value) -> Vec<Vec<String>> {
    match value {
        Value::Object(map) => {
            if let Some(Value::Array(results)) = map.get("results") {
                return array_records(results);
            }
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            if let Some(rows) = body.values().find_map(|v| match v {
                Value::Array(arr) if arr.first().is_some_and(Value::is_object) => Some(arr),
                _ => None,
            }) {
                return array_records(rows);
            }
            let mut records = vec![vec!["field".to_string(), "value".to_string()]];
            for (key, val) in body {
                records.push(vec![key.clone(), format_csv_value(val)]);
            }
            records
        }
        Value::Array(arr) => array_records(arr),
        _ => vec![vec![format_csv_value(value)]],
    }
}

fn array_records(arr: &[Value]) -> Vec<Vec<String>> {
    let Some(Value::Object(first)) = arr.first() else {
        return arr.iter().map(|v| vec![format_csv_value(v)]).collect();
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut records = vec![headers.clone()];
    for item in arr {
        if let Value::Object(map) = item {
            records.push(
                headers
                    .iter()
                    .map(|h| map.get(h).map(format_csv_value).unwrap_or_default())
                    .collect(),
            );
        }
    }
    records
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
