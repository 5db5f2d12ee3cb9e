//! Decoder limits.
//!
//! The decoder is recursive descent, so every nested object or array costs a
//! stack frame. `Limits` caps that nesting so hostile input is rejected with
//! an error instead of exhausting the stack.

/// Default maximum nesting depth for objects/arrays.
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Configuration carried by a [`Decoder`](crate::decoder::Decoder).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum nesting depth for arrays/objects. `None` disables the check.
    pub max_depth: Option<usize>,
}

impl Limits {
    /// Default limits: nesting capped at [`DEFAULT_MAX_DEPTH`].
    pub const fn new() -> Self {
        Self {
            max_depth: Some(DEFAULT_MAX_DEPTH),
        }
    }

    /// No depth check at all.
    pub const fn unbounded() -> Self {
        Self { max_depth: None }
    }

    /// Replace the nesting cap.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Whether `depth` levels of nesting are allowed.
    pub fn allows_depth(&self, depth: usize) -> bool {
        self.max_depth.is_none_or(|max| depth <= max)
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new()
    }
}
