use anyhow::{anyhow, Result};

pub fn validate_base_url(field: &str, value: &str) -> Result<()> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("{} must not be empty", field));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(anyhow!("{} must start with http:// or https://", field));
    }
    Ok(())
}
