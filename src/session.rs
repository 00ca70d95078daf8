use std::collections::HashSet;

/// URLs downloaded during the current run. Lives only as long as the
/// interactive loop that owns it.
#[derive(Debug, Default)]
pub struct SessionState {
    downloaded: HashSet<String>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a downloaded URL. Returns false if it was already present.
    pub fn record(&mut self, url: impl Into<String>) -> bool {
        self.downloaded.insert(url.into())
    }

    pub fn contains(&self, url: &str) -> bool {
        self.downloaded.contains(url)
    }

    pub fn len(&self) -> usize {
        self.downloaded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.downloaded.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_empty() {
        let session = SessionState::new();
        assert!(session.is_empty());
        assert!(!session.contains("https://www.youtube.com/watch?v=abc"));
    }

    #[test]
    fn test_record_is_idempotent() {
        let mut session = SessionState::new();
        assert!(session.record("https://www.youtube.com/watch?v=abc"));
        assert!(!session.record("https://www.youtube.com/watch?v=abc"));
        assert_eq!(session.len(), 1);
        assert!(session.contains("https://www.youtube.com/watch?v=abc"));
    }
}
