//! Opaque references into a native context

use std::sync::atomic::{AtomicU32, Ordering};

/// Generation id of a native context. Zero is reserved for the null handle.
pub type ContextId = u32;

static NEXT_CONTEXT_ID: AtomicU32 = AtomicU32::new(1);

pub(crate) fn fresh_context_id() -> ContextId {
    NEXT_CONTEXT_ID.fetch_add(1, Ordering::Relaxed)
}

/// Reference to one node owned by a native context.
///
/// Handles are compared, never dereferenced directly: every read goes
/// through the owning context, which rejects handles it did not issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RawHandle {
    context: ContextId,
    index: u32,
}

impl RawHandle {
    /// The null sentinel
    pub const NULL: RawHandle = RawHandle {
        context: 0,
        index: 0,
    };

    pub(crate) fn new(context: ContextId, index: u32) -> Self {
        Self { context, index }
    }

    pub fn is_null(&self) -> bool {
        self.context == 0
    }

    /// Context that issued this handle
    pub fn context(&self) -> ContextId {
        self.context
    }

    /// Arena slot within the issuing context
    pub fn index(&self) -> u32 {
        self.index
    }
}

impl std::fmt::Display for RawHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_null() {
            write!(f, "#null")
        } else {
            write!(f, "#{}:{}", self.context, self.index)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle() {
        assert!(RawHandle::NULL.is_null());
        assert!(!RawHandle::new(1, 0).is_null());
        assert_eq!(RawHandle::NULL.to_string(), "#null");
        assert_eq!(RawHandle::new(3, 7).to_string(), "#3:7");
    }

    #[test]
    fn test_context_ids_are_distinct() {
        let a = fresh_context_id();
        let b = fresh_context_id();
        assert_ne!(a, b);
        assert_ne!(a, 0);
    }
}
