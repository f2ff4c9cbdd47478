//! Bounding box types and operations.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A projected bounding box in British National Grid metres.
///
/// The legacy OpenSpace service only reads the lower-left corner; tiles it
/// requests carry `(x0, y0, 0, 0)` and the extent comes from WIDTH/HEIGHT.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Bounding box carrying only a lower-left corner, upper-right left at zero.
    pub fn lower_left(x0: f64, y0: f64) -> Self {
        Self::new(x0, y0, 0.0, 0.0)
    }

    /// Format as a WMS BBOX parameter value.
    pub fn to_wms_string(&self) -> String {
        [self.min_x, self.min_y, self.max_x, self.max_y]
            .iter()
            .map(|v| format_number(*v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_wms_string())
    }
}

/// Format a number the way map services expect it in a query string.
///
/// Integral values print without a fractional part and negative zero prints
/// as `0`, so `500000.0` becomes `"500000"` and `2.5` stays `"2.5"`.
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lower_left_formatting() {
        let bbox = BoundingBox::lower_left(500000.0, 0.0);
        assert_eq!(bbox.to_wms_string(), "500000,0,0,0");
        assert_eq!(bbox.to_string(), "500000,0,0,0");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2500.0), "2500");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(1.75), "1.75");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(-1000.0), "-1000");
    }
}
