//! Time parsing and formatting utilities

use crate::error::{ClipDeckError, ClipDeckResult};

/// Format seconds as `M:SS`, truncating to whole seconds.
///
/// Negative and non-finite input renders as `0:00`.
pub fn format_clock(seconds: f64) -> String {
    let whole = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", whole / 60, whole % 60)
}

/// Time parser for the formats accepted on the command line
pub struct TimeParser;

impl TimeParser {
    /// Create a new time parser
    pub fn new() -> Self {
        Self
    }
}

impl Default for TimeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeParser {
    /// Parse `12.5`, `M:SS(.ms)` or `H:MM:SS(.ms)` into seconds
    pub fn parse_time(&self, time_str: &str) -> ClipDeckResult<f64> {
        let time_str = time_str.trim();
        let invalid = || ClipDeckError::InvalidTimeFormat {
            time: time_str.to_string(),
        };

        let parts: Vec<&str> = time_str.split(':').collect();
        let seconds = match parts.as_slice() {
            [secs] => secs.parse::<f64>().map_err(|_| invalid())?,
            [mins, secs] => {
                let minutes: u64 = mins.parse().map_err(|_| invalid())?;
                let seconds: f64 = secs.parse().map_err(|_| invalid())?;
                if !(0.0..60.0).contains(&seconds) {
                    return Err(invalid());
                }
                minutes as f64 * 60.0 + seconds
            }
            [hours, mins, secs] => {
                let hours: u64 = hours.parse().map_err(|_| invalid())?;
                let minutes: u64 = mins.parse().map_err(|_| invalid())?;
                let seconds: f64 = secs.parse().map_err(|_| invalid())?;
                if minutes >= 60 || !(0.0..60.0).contains(&seconds) {
                    return Err(invalid());
                }
                hours as f64 * 3600.0 + minutes as f64 * 60.0 + seconds
            }
            _ => return Err(invalid()),
        };

        if !seconds.is_finite() || seconds < 0.0 {
            return Err(invalid());
        }
        Ok(seconds)
    }
}
