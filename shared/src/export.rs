use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExportError {
    /// Pixel data is unreadable because a cross-origin image was drawn.
    #[error("{0}")]
    Tainted(String),
    #[error("export failed: {0}")]
    Other(String),
}

/// Link target for the save control.
///
/// A tainted surface turns into a link that explains the failure instead of
/// downloading; any other failure is handed back to the caller.
pub fn save_href(export: Result<String, ExportError>) -> Result<String, ExportError> {
    match export {
        Ok(url) => Ok(url),
        Err(ExportError::Tainted(reason)) => {
            log::warn!("save blocked: {reason}");
            let message = serde_json::Value::String(format!("Can't save: {reason}"));
            Ok(format!("javascript:alert({message})"))
        }
        Err(other) => Err(other),
    }
}
