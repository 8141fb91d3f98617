use serde_json::Value;

/// Headline figure of each command, in priority order.
const PRIORITY_KEYS: [&str; 6] = [
    "monthly_payment",
    "estimated_price_lakhs",
    "max_loan_amount",
    "next_year_forecast_lakhs",
    "market_data",
    "year",
];

/// Print just the key answer value from the output.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result").or_else(|| m.get("results")))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return format_minimal(val);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_minimal(val));
        }
    }

    format_minimal(result_obj)
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_picks_emi_over_other_fields() {
        let v = json!({"result": {"principal": "5000000", "monthly_payment": "43391.16"}});
        assert_eq!(minimal_line(&v), "43391.16");
    }

    #[test]
    fn test_falls_back_to_first_field() {
        let v = json!({"result": {"loan_amount": "10"}});
        assert_eq!(minimal_line(&v), "loan_amount: 10");
    }
}
