//! Shared test utilities for the osgrid workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Sample configuration paths and temp config files
//! - Tile address sweeps
//! - Common fixtures (API keys, known tile answers)
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{assert_approx_eq, fixtures};
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;
pub use paths::*;

/// Macro for approximate floating-point equality assertions.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_approx_eq;
///
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// assert_approx_eq!(1.1_f32, 1.0_f32, 0.001_f32);    // fails
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Assert that a query parameter appears exactly once in a URL and return its value.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_single_param;
///
/// let value = assert_single_param!("https://host/ts?BBOX=1,2,0,0", "BBOX");
/// assert_eq!(value, "1,2,0,0");
/// ```
#[macro_export]
macro_rules! assert_single_param {
    ($url:expr, $name:expr) => {{
        let values = $crate::query_values($url, $name);
        if values.len() != 1 {
            panic!(
                "expected parameter `{}` exactly once in `{}`, found {} times",
                $name,
                $url,
                values.len()
            );
        }
        values.into_iter().next().unwrap_or_default()
    }};
}

/// Collect the raw (still percent-encoded) values of `name` in a URL's query string.
pub fn query_values(url: &str, name: &str) -> Vec<String> {
    let query = match url.split_once('?') {
        Some((_, query)) => query,
        None => return Vec::new(),
    };
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .filter(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assert_approx_eq_passes() {
        assert_approx_eq!(1.0001, 1.0, 0.001);
        assert_approx_eq!(0.0, 0.0, 0.0001);
        assert_approx_eq!(-5.5, -5.500001, 0.0001);
    }

    #[test]
    #[should_panic(expected = "assertion failed")]
    fn test_assert_approx_eq_fails() {
        assert_approx_eq!(1.1, 1.0, 0.001);
    }

    #[test]
    fn test_query_values() {
        let url = "https://host/ts?KEY=abc&BBOX=1,2,0,0&KEY=def";
        assert_eq!(query_values(url, "KEY"), vec!["abc", "def"]);
        assert!(query_values(url, "LAYERS").is_empty());
        assert!(query_values("https://host/ts", "KEY").is_empty());
    }

    #[test]
    fn test_assert_single_param() {
        let value = assert_single_param!("https://host/ts?BBOX=1,2,0,0&LAYERS=5", "BBOX");
        assert_eq!(value, "1,2,0,0");
    }

    #[test]
    #[should_panic(expected = "exactly once")]
    fn test_assert_single_param_duplicate() {
        assert_single_param!("https://host/ts?KEY=a&KEY=b", "KEY");
    }
}
