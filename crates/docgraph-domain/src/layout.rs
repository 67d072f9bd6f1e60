//! Layout configuration for the force-directed renderer
//!
//! The layout algorithm itself lives in the browser library; this module only
//! owns the tuning constants handed to it and the cluster color palette.

use thiserror::Error;

/// Repulsion between every pair of nodes
pub const NODE_REPULSION: f64 = 100_000.0;

/// Preferred edge length in pixels
pub const IDEAL_EDGE_LENGTH: f64 = 150.0;

/// Spring strength of edges
pub const EDGE_ELASTICITY: f64 = 0.1;

/// Pull towards the center of the canvas
pub const GRAPH_GRAVITY: f64 = 0.6;

/// Maximum number of layout iterations
pub const LAYOUT_NUM_ITER: u32 = 2500;

/// Padding around the fitted graph
pub const GRAPH_PADDING: f64 = 50.0;

/// Vertical padding between tiled disconnected components
pub const TILING_PADDING_VERTICAL: f64 = 50.0;

/// Horizontal padding between tiled disconnected components
pub const TILING_PADDING_HORIZONTAL: f64 = 50.0;

/// Gravity range for compound nodes
pub const GRAVITY_RANGE_COMPOUND: f64 = 1.5;

/// Gravity strength for compound nodes
pub const GRAVITY_COMPOUND: f64 = 1.0;

/// Starting energy when re-running the layout incrementally
pub const INITIAL_ENERGY_ON_INCREMENTAL: f64 = 0.5;

/// Default cluster colors: blue, yellow, green, red, purple, orange, teal, pink
pub const CLUSTER_COLORS: [&str; 8] = [
    "#2563eb", "#eab308", "#10b981", "#ef4444", "#a21caf", "#f59e42", "#14b8a6", "#f472b6",
];

/// Layout configuration errors
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// A palette entry is not a `#rgb` or `#rrggbb` hex color
    #[error("Invalid palette color '{0}': expected #rgb or #rrggbb")]
    InvalidColor(String),

    /// A numeric parameter is out of range
    #[error("Invalid layout parameter {name}: {reason}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// What is wrong with it
        reason: String,
    },
}

/// Ordered list of cluster colors; index i colors cluster i
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<String>,
}

impl Palette {
    /// Build a palette, validating every color
    pub fn new<I, S>(colors: I) -> Result<Self, LayoutError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let colors: Vec<String> = colors.into_iter().map(Into::into).collect();
        if let Some(bad) = colors.iter().find(|c| !is_hex_color(c)) {
            return Err(LayoutError::InvalidColor(bad.clone()));
        }
        Ok(Self { colors })
    }

    /// Color for a cluster index, `None` past the end of the palette
    pub fn get(&self, cluster: u32) -> Option<&str> {
        self.colors.get(cluster as usize).map(String::as_str)
    }

    /// Number of colors
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Whether the palette has no colors
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Iterate colors in cluster order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.colors.iter().map(String::as_str)
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            colors: CLUSTER_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Named tuning parameters for the force-directed layout
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Node repulsion
    pub node_repulsion: f64,
    /// Ideal edge length
    pub ideal_edge_length: f64,
    /// Edge elasticity
    pub edge_elasticity: f64,
    /// Gravity
    pub gravity: f64,
    /// Iteration count
    pub num_iter: u32,
    /// Padding around the graph
    pub padding: f64,
    /// Vertical tiling padding
    pub tiling_padding_vertical: f64,
    /// Horizontal tiling padding
    pub tiling_padding_horizontal: f64,
    /// Compound gravity range
    pub gravity_range_compound: f64,
    /// Compound gravity
    pub gravity_compound: f64,
    /// Initial energy for incremental layout
    pub initial_energy_on_incremental: f64,
    /// Per-cluster colors
    pub palette: Palette,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            node_repulsion: NODE_REPULSION,
            ideal_edge_length: IDEAL_EDGE_LENGTH,
            edge_elasticity: EDGE_ELASTICITY,
            gravity: GRAPH_GRAVITY,
            num_iter: LAYOUT_NUM_ITER,
            padding: GRAPH_PADDING,
            tiling_padding_vertical: TILING_PADDING_VERTICAL,
            tiling_padding_horizontal: TILING_PADDING_HORIZONTAL,
            gravity_range_compound: GRAVITY_RANGE_COMPOUND,
            gravity_compound: GRAVITY_COMPOUND,
            initial_energy_on_incremental: INITIAL_ENERGY_ON_INCREMENTAL,
            palette: Palette::default(),
        }
    }
}

impl LayoutConfig {
    /// Check that every numeric parameter is finite and non-negative
    ///
    /// Overrides come from user configuration, so this runs before anything
    /// is handed to the renderer.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let params = [
            ("node_repulsion", self.node_repulsion),
            ("ideal_edge_length", self.ideal_edge_length),
            ("edge_elasticity", self.edge_elasticity),
            ("gravity", self.gravity),
            ("padding", self.padding),
            ("tiling_padding_vertical", self.tiling_padding_vertical),
            ("tiling_padding_horizontal", self.tiling_padding_horizontal),
            ("gravity_range_compound", self.gravity_range_compound),
            ("gravity_compound", self.gravity_compound),
            ("initial_energy_on_incremental", self.initial_energy_on_incremental),
        ];

        for (name, value) in params {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidParameter {
                    name,
                    reason: format!("must be a finite, non-negative number (got {})", value),
                });
            }
        }

        if self.num_iter == 0 {
            return Err(LayoutError::InvalidParameter {
                name: "num_iter",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(())
    }
}

fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_constants() {
        let config = LayoutConfig::default();
        assert_eq!(config.node_repulsion, 100_000.0);
        assert_eq!(config.ideal_edge_length, 150.0);
        assert_eq!(config.num_iter, 2500);
        assert_eq!(config.palette.len(), 8);
        assert_eq!(config.palette.get(0), Some("#2563eb"));
        assert_eq!(config.palette.get(7), Some("#f472b6"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_palette_overflow_has_no_color() {
        let palette = Palette::default();
        assert_eq!(palette.get(8), None);
        assert_eq!(palette.get(u32::MAX), None);
    }

    #[test]
    fn test_palette_rejects_non_hex() {
        let err = Palette::new(["#fff", "blue"]).unwrap_err();
        assert_eq!(err, LayoutError::InvalidColor("blue".to_string()));
        assert!(Palette::new(["#12345"]).is_err());
        assert!(Palette::new(["#A1b2C3", "#abc"]).is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_and_nan() {
        let config = LayoutConfig {
            gravity: -1.0,
            ..LayoutConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LayoutError::InvalidParameter { name: "gravity", .. })
        ));

        let config = LayoutConfig {
            padding: f64::NAN,
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());

        let config = LayoutConfig {
            num_iter: 0,
            ..LayoutConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
