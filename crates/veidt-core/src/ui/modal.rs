//! Modal dialog state

/// A dialog that is either closed or open with some content
///
/// Opening an open modal replaces its content. Escape and an explicit
/// dismiss do the same thing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Modal<T> {
    content: Option<T>,
}

impl<T> Default for Modal<T> {
    fn default() -> Self {
        Self { content: None }
    }
}

impl<T> Modal<T> {
    /// Create a closed modal
    pub fn new() -> Self {
        Self::default()
    }

    /// Open with `content`, returning whatever was displayed before
    pub fn open(&mut self, content: T) -> Option<T> {
        self.content.replace(content)
    }

    /// Close the modal, handing back its content
    pub fn close(&mut self) -> Option<T> {
        self.content.take()
    }

    /// Escape key from the input layer
    ///
    /// Closes the modal if it is open; does nothing otherwise.
    pub fn on_escape(&mut self) -> Option<T> {
        self.close()
    }

    pub fn is_open(&self) -> bool {
        self.content.is_some()
    }

    pub fn content(&self) -> Option<&T> {
        self.content.as_ref()
    }

    pub fn content_mut(&mut self) -> Option<&mut T> {
        self.content.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let modal: Modal<&str> = Modal::new();
        assert!(!modal.is_open());
        assert!(modal.content().is_none());
    }

    #[test]
    fn test_escape_closes_like_dismiss() {
        let mut escaped = Modal::new();
        escaped.open("signup");
        assert_eq!(escaped.on_escape(), Some("signup"));
        assert!(!escaped.is_open());

        let mut dismissed = Modal::new();
        dismissed.open("signup");
        assert_eq!(dismissed.close(), Some("signup"));
        assert_eq!(escaped, dismissed);
    }

    #[test]
    fn test_escape_while_closed_is_noop() {
        let mut modal: Modal<u8> = Modal::new();
        assert!(modal.on_escape().is_none());
        assert!(!modal.is_open());
    }

    #[test]
    fn test_reopen_replaces_content() {
        let mut modal = Modal::new();
        assert!(modal.open(1).is_none());
        assert_eq!(modal.open(2), Some(1));
        assert_eq!(modal.content(), Some(&2));

        if let Some(content) = modal.content_mut() {
            *content = 3;
        }
        assert_eq!(modal.close(), Some(3));
    }
}
