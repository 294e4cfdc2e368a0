//! Board model identification

use std::fs;

use log::debug;

use crate::config::BoardConfig;
use crate::error::CtlError;

/// Read the model file and match it against the accepted models
///
/// Returns the model string as reported by the system.
pub fn identify(board: &BoardConfig) -> Result<String, CtlError> {
    let raw = fs::read(&board.model_file).map_err(|source| CtlError::ModelRead {
        path: board.model_file.clone(),
        source,
    })?;
    let text = String::from_utf8_lossy(&raw);
    let model = text.trim_end_matches('\0').trim();
    debug!("board model {:?}", model);

    match match_model(model, &board.models) {
        Some(_) => Ok(model.to_owned()),
        None => Err(CtlError::UnsupportedModel(model.to_owned())),
    }
}

/// First accepted model contained in `model`, ignoring case
pub fn match_model<'a>(model: &str, accepted: &'a [String]) -> Option<&'a str> {
    let model = model.to_ascii_lowercase();
    accepted
        .iter()
        .find(|m| model.contains(&m.to_ascii_lowercase()))
        .map(String::as_str)
}
