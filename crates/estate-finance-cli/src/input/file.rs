use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Read a JSON file and deserialise into a typed struct.
pub fn read_json<T: DeserializeOwned>(path: &str) -> Result<T, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: T = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_finance_core::loan::emi::LoanRequest;
    use rust_decimal_macros::dec;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_reads_loan_request() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"principal": "2500000", "annual_rate_percent": "7.9", "tenure_years": 15}}"#
        )
        .unwrap();
        let req: LoanRequest = read_json(file.path().to_str().unwrap()).unwrap();
        assert_eq!(req.principal, dec!(2500000));
        assert_eq!(req.tenure_years, 15);
    }

    #[test]
    fn test_missing_file() {
        assert!(read_json::<LoanRequest>("/no/such/loan.json").is_err());
    }
}
