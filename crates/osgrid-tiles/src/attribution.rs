//! Attribution text shown by the host next to Ordnance Survey tiles.

use chrono::Datelike;

use osgrid_common::Protocol;

pub const OPENSPACE_ATTRIBUTION: &str =
    "&copy; <a href=\"https://www.ordnancesurvey.co.uk/osmaps/\">Ordnance Survey</a>.";

/// Linked when the terms notice is requested without an explicit URL.
pub const DEFAULT_TERMS_URL: &str = "https://www.ordnancesurvey.co.uk/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribution {
    protocol: Protocol,
    terms_url: Option<String>,
}

impl Attribution {
    pub fn new(protocol: Protocol, terms_url: Option<String>) -> Self {
        Self {
            protocol,
            terms_url,
        }
    }

    /// Attribution for the current calendar year.
    pub fn text(&self) -> String {
        self.text_for_year(chrono::Local::now().year())
    }

    pub fn text_for_year(&self, year: i32) -> String {
        let mut text = match self.protocol {
            Protocol::LegacyBbox => OPENSPACE_ATTRIBUTION.to_string(),
            Protocol::Matrix => format!(
                "&copy; Crown copyright and database rights {} Ordnance Survey. ",
                year
            ),
        };

        if let Some(url) = &self.terms_url {
            if !text.ends_with(' ') {
                text.push(' ');
            }
            text.push_str(&format!(
                "<a href=\"{}\">Terms of use</a>",
                escape_attribute(url)
            ));
        }
        text
    }

    pub fn terms_url(&self) -> Option<&str> {
        self.terms_url.as_deref()
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
