use std::env;

use tracing::warn;

pub const DEFAULT_MAX_NESTING_DEPTH: usize = 128;

/// Environment variable overriding [`ParserConfig::max_nesting_depth`].
pub const MAX_DEPTH_ENV: &str = "MATHSCRIPT_MAX_DEPTH";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// How many blocks and sub-expressions may be open at once before the
    /// parse fails with a nesting error.
    pub max_nesting_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParserConfig {
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Defaults, with the depth limit taken from `MATHSCRIPT_MAX_DEPTH` when
    /// it holds a number.
    pub fn from_env() -> Self {
        let config = ParserConfig::default();

        match env::var(MAX_DEPTH_ENV) {
            Ok(value) => match value.trim().parse::<usize>() {
                Ok(depth) => config.with_max_nesting_depth(depth),
                Err(_) => {
                    warn!(value = %value, "ignoring non-numeric {}", MAX_DEPTH_ENV);
                    config
                }
            },
            Err(_) => config,
        }
    }
}
