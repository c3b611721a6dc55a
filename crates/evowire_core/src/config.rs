//! Reader configuration.

/// Configuration for a tolerant reader.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Maximum number of frames discarded inside one skip block before the
    /// stream is declared malformed.
    ///
    /// On a finite stream a missing terminator is caught at end of stream,
    /// but an unbounded transport (a socket, a pipe) could otherwise feed a
    /// reader forever. Exceeding the bound raises
    /// [`crate::ProtocolError::MalformedStream`].
    pub max_skip_values: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            max_skip_values: 1 << 20,
        }
    }
}

impl ReadOptions {
    /// Creates options with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the per-block discard bound.
    #[must_use]
    pub const fn max_skip_values(mut self, value: u64) -> Self {
        self.max_skip_values = value;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_default() {
        let options = ReadOptions::new().max_skip_values(4);
        assert_eq!(options.max_skip_values, 4);
    }
}
