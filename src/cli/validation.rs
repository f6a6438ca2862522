use crate::cli::args::CliArgs;
use crate::output::OutputFormat;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if args.initial == Some(0) {
        return Err("invalid --initial, expected positive integer".to_string());
    }
    if args.increment == Some(0) {
        return Err("invalid --increment, expected positive integer".to_string());
    }
    if args.timeout == Some(0) {
        return Err("invalid --timeout, expected positive integer".to_string());
    }
    if let Some(raw) = args.format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --format '{raw}', expected text or json"));
        }
    }
    if let Some(endpoint) = args.endpoint.as_deref() {
        if endpoint.trim().is_empty() {
            return Err("invalid --endpoint, expected non-empty URL".to_string());
        }
    }
    Ok(())
}
