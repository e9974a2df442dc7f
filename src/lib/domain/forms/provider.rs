//! Field provider module

#[cfg(test)]
use mockall::mock;

/// Computes the human-readable value of a field from its raw input
pub trait FieldProvider: Clone + Send + Sync + 'static {
    /// Adapt a raw submitted value for display
    fn get_adapted_value(&self, field_id: &str, value: &str) -> String;
}

#[cfg(test)]
mock! {
    pub FieldProvider {}

    impl Clone for FieldProvider {
        fn clone(&self) -> Self;
    }

    impl FieldProvider for FieldProvider {
        fn get_adapted_value(&self, field_id: &str, value: &str) -> String;
    }
}
