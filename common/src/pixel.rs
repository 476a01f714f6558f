use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixelDecodeError {
    #[error("coordinate token '{0}' is not a non-negative integer")]
    BadToken(String),
    #[error("canvas width must be nonzero")]
    ZeroWidth,
}

/// A decoded canvas position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: u64,
    pub y: u64,
}

impl PixelPoint {
    /// Decodes a packed linear index (`y * width + x`) into a position.
    ///
    /// The raw token may carry `,` thousands separators; these are
    /// stripped before parsing.
    pub fn from_packed_index(token: &str, width: u32) -> Result<Self, PixelDecodeError> {
        if width == 0 {
            return Err(PixelDecodeError::ZeroWidth);
        }
        let cleaned: String = token.chars().filter(|c| *c != ',').collect();
        let index: u64 = cleaned
            .parse()
            .map_err(|_| PixelDecodeError::BadToken(token.to_string()))?;
        let width = u64::from(width);
        Ok(Self {
            x: index % width,
            y: index / width,
        })
    }
}

impl fmt::Display for PixelPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
