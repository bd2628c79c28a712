use std::path::Path;

use majex::error::AppError;
use serde::Serialize;
use serde::de::DeserializeOwned;

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::unexpected(format!("failed to render output: {e}")))?;
    println!("{out}");
    Ok(())
}

pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let data = tokio::fs::read(path).await?;
    serde_json::from_slice(&data)
        .map_err(|e| AppError::invalid_input(format!("{}: {e}", path.display())))
}
