use crate::cli::args::CliArgs;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.base_url.as_deref() {
        if raw.trim().is_empty() {
            return Err("base URL cannot be empty".to_string());
        }
        if reqwest::Url::parse(raw.trim()).is_err() {
            return Err(format!("invalid --base-url '{raw}'"));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    Ok(())
}
