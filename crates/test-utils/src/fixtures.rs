//! Common test fixtures for osgrid tests.
//!
//! Known answers are taken from hand-worked examples against the two
//! Ordnance Survey pyramids.

/// API keys used across tests.
pub mod keys {
    /// A well-formed API key.
    pub const API_KEY: &str = "TEST-API-KEY-0123456789";

    /// A key containing characters that must be percent-encoded.
    pub const API_KEY_NEEDS_ENCODING: &str = "key with/special&chars=";

    /// Keys that must be rejected at construction.
    pub const INVALID_KEYS: [&str; 3] = ["", " ", "\t\n"];
}

/// Known tile answers for the OpenSpace bbox pyramid (200px tiles).
pub mod legacy {
    /// (zoom, column, row, expected BBOX, expected LAYERS)
    pub const KNOWN_TILES: [(u32, i64, i64, &str, &str); 5] = [
        (0, 1, -1, "500000,0,0,0", "2500"),
        (0, 0, -3, "0,1000000,0,0", "2500"),
        (3, 12, -20, "480000,760000,0,0", "200"),
        (9, 1000, -400, "500000,199500,0,0", "2.5"),
        (5, 2, 0, "20000,-10000,0,0", "50"),
    ];

    pub const ENDPOINT: &str = "http://openspace.ordnancesurvey.co.uk/osmapapi/ts";
}

/// Known tile answers for the OS Maps API tile matrix set (256px tiles).
pub mod matrix {
    /// (zoom, column, row, expected tileMatrix, expected tileRow)
    pub const KNOWN_TILES: [(u32, i64, i64, &str, i64); 5] = [
        (0, 0, -6, "EPSG:27700:0", 0),
        (0, 0, 0, "EPSG:27700:0", 6),
        (1, 3, -12, "EPSG:27700:1", 0),
        (4, 17, -50, "EPSG:27700:4", 46),
        (9, 1200, -2000, "EPSG:27700:9", 1072),
    ];

    pub const ENDPOINT: &str = "https://api2.ordnancesurvey.co.uk/mapping_api/v1/service/wmts";
}
