//! Toolkit-wide defaults.

use crate::geometry::BBox;

/// How a row or column hands out main-axis space beyond its minimum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Spread {
    /// Children keep their minimum extent; the surplus follows the last child.
    Trailing,
    /// The surplus widens the gaps between children. A single child behaves
    /// as [`Spread::Trailing`].
    #[default]
    Between,
    /// The surplus is shared among the children's own extents.
    Even,
}

/// Cross-axis placement of a child inside a row or column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    Start,
    Centre,
    End,
    /// Stretch to the full cross extent.
    #[default]
    Fill,
}

/// Defaults applied when a container is built without explicit settings.
#[derive(Debug, Clone)]
pub struct Config {
    /// Gap between adjacent children of rows and columns.
    pub gap: i32,
    /// Margin placed around dialogue contents.
    pub margin: BBox,
    pub spread: Spread,
    pub align: Align,
    /// Log filter handed to [`crate::logging`].
    pub log_filter: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gap: 8,
            margin: BBox::new(-16, -16, 16, 16),
            spread: Spread::default(),
            align: Align::default(),
            log_filter: None,
        }
    }
}

impl Config {
    /// Defaults overridden by `CORBEL_GAP`, `CORBEL_MARGIN` and `CORBEL_LOG`.
    ///
    /// Unparseable values are logged and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`Config::from_env`] with a caller-supplied variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(raw) = lookup("CORBEL_GAP") {
            match raw.trim().parse::<i32>() {
                Ok(gap) => config.gap = gap,
                Err(e) => tracing::warn!("ignoring CORBEL_GAP={raw:?}: {e}"),
            }
        }
        if let Some(raw) = lookup("CORBEL_MARGIN") {
            match raw.trim().parse::<i32>() {
                Ok(m) => config.margin = BBox::new(-m, -m, m, m),
                Err(e) => tracing::warn!("ignoring CORBEL_MARGIN={raw:?}: {e}"),
            }
        }
        if let Some(filter) = lookup("CORBEL_LOG") {
            config.log_filter = Some(filter);
        }

        config
    }

    pub fn log_config(&self) -> crate::logging::LogConfig {
        crate::logging::LogConfig {
            filter: self.log_filter.clone(),
            ..Default::default()
        }
    }
}
