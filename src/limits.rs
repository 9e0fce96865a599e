//! Size and strictness limits for a parse.
//!
//! The defaults keep the permissive handling of unterminated strings while
//! rejecting trailing commas. `Limits::strict()` and `Limits::lenient()`
//! are the two other presets.

/// The default maximum nesting depth (e.g., `[[[]]]`) to prevent stack overflows.
pub const DEFAULT_MAX_DEPTH: usize = 100;
/// The default maximum input size (10MB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 10 * 1024 * 1024;

/// Limits and strictness switches applied by the tokenizer and parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Inputs longer than this many bytes are rejected before scanning.
    pub max_input_bytes: usize,
    /// Maximum nesting depth of objects and arrays.
    pub max_depth: usize,
    /// Let a comma followed by a non-value token end a member/element list
    /// instead of raising a syntax error.
    pub allow_trailing_commas: bool,
    /// Accept a string that runs into end-of-input as a truncated token.
    pub allow_unterminated_strings: bool,
    /// Treat a quote as escaped only when an odd run of backslashes precedes
    /// it, so `"a\\"` closes. When off, any quote right after a backslash is
    /// escaped.
    pub backslash_parity_escapes: bool,
}

impl Limits {
    /// Rejects unterminated strings and trailing commas.
    pub const fn strict() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_commas: false,
            allow_unterminated_strings: false,
            backslash_parity_escapes: false,
        }
    }

    /// Accepts everything the legacy grammar accepted, with larger caps.
    pub const fn lenient() -> Self {
        Self {
            max_input_bytes: 16 * DEFAULT_MAX_INPUT_BYTES,
            max_depth: 4 * DEFAULT_MAX_DEPTH,
            allow_trailing_commas: true,
            allow_unterminated_strings: true,
            backslash_parity_escapes: true,
        }
    }

    /// Replaces the maximum nesting depth.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replaces the maximum input size in bytes.
    pub const fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing_commas: false,
            allow_unterminated_strings: true,
            backslash_parity_escapes: false,
        }
    }
}
