//! Kernel configuration.

/// Seed used by the process-wide generator provider.
pub const DEFAULT_GLOBAL_SEED: u64 = 12345;

/// Configuration for the batch evaluation kernel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KernelConfig {
    /// Seed mixed with each thread index to seed that thread's generator.
    pub global_seed: u64,
    /// Build one distribution per batch when every parameter column is constant.
    ///
    /// Disabling this forces row-by-row evaluation; results are identical.
    pub constant_fast_path: bool,
}

impl Default for KernelConfig {
    fn default() -> Self {
        Self {
            global_seed: DEFAULT_GLOBAL_SEED,
            constant_fast_path: true,
        }
    }
}

impl KernelConfig {
    /// Creates a new kernel configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the global seed.
    #[must_use]
    pub fn with_global_seed(mut self, global_seed: u64) -> Self {
        self.global_seed = global_seed;
        self
    }

    /// Enables or disables the constant-parameter fast path.
    #[must_use]
    pub fn with_constant_fast_path(mut self, enabled: bool) -> Self {
        self.constant_fast_path = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = KernelConfig::default();
        assert_eq!(config.global_seed, DEFAULT_GLOBAL_SEED);
        assert!(config.constant_fast_path);
    }

    #[test]
    fn test_builder() {
        let config = KernelConfig::new()
            .with_global_seed(7)
            .with_constant_fast_path(false);
        assert_eq!(config.global_seed, 7);
        assert!(!config.constant_fast_path);
    }
}
