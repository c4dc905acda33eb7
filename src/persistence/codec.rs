//! Day state codec
//!
//! States are stored as compact JSON text. Decoding is soft: absent or
//! malformed text becomes `None` so a bad entry never blocks startup.

use crate::day::DayState;
use crate::error::CodecError;

/// Longest stored-text preview included in decode warnings
const PREVIEW_LEN: usize = 64;

/// Serialize a day state to JSON text
pub fn encode(state: &DayState) -> String {
    state.as_value().to_string()
}

/// Parse JSON text into a day state, reporting why it failed
pub fn try_decode(text: &str) -> Result<DayState, CodecError> {
    Ok(serde_json::from_str(text)?)
}

/// Parse stored text, treating absent or malformed input as no state
///
/// A stored literal `null` is a real (null) state, not an absent one.
pub fn decode(text: Option<&str>) -> Option<DayState> {
    let text = text?;
    match try_decode(text) {
        Ok(state) => Some(state),
        Err(e) => {
            log::warn!("Discarding unreadable day state {:?}: {}", preview(text), e);
            None
        }
    }
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(PREVIEW_LEN) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
