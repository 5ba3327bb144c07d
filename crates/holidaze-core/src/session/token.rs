//! Shared bearer-token cell.

use std::sync::RwLock;

/// Single-writer cell holding the current bearer token.
///
/// The session manager is the only writer (on login, logout, and restore);
/// the gateway takes synchronous snapshots when building request headers.
/// `None` means anonymous.
#[derive(Debug, Default)]
pub struct SharedToken {
    inner: RwLock<Option<String>>,
}

impl SharedToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current token, if any.
    pub fn get(&self) -> Option<String> {
        self.inner.read().expect("token lock poisoned").clone()
    }

    pub fn is_present(&self) -> bool {
        self.inner.read().expect("token lock poisoned").is_some()
    }

    pub fn set(&self, token: impl Into<String>) {
        *self.inner.write().expect("token lock poisoned") = Some(token.into());
    }

    pub fn clear(&self) {
        *self.inner.write().expect("token lock poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear_round_trip() {
        let token = SharedToken::new();
        assert!(token.get().is_none());
        assert!(!token.is_present());

        token.set("bearer-1");
        assert_eq!(token.get().as_deref(), Some("bearer-1"));
        assert!(token.is_present());

        token.clear();
        assert!(token.get().is_none());
    }
}
