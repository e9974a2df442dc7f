//! Link resolver module

#[cfg(test)]
use mockall::mock;

/// Expands internal dynamic content links into public URLs
pub trait LinkResolver: Clone + Send + Sync + 'static {
    /// Expand every dynamic link in `text`
    fn expand_dynamic_links(&self, text: &str) -> String;
}

#[cfg(test)]
mock! {
    pub LinkResolver {}

    impl Clone for LinkResolver {
        fn clone(&self) -> Self;
    }

    impl LinkResolver for LinkResolver {
        fn expand_dynamic_links(&self, text: &str) -> String;
    }
}
