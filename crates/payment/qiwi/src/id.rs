use uuid::Uuid;

/// Source of bill and refund ids.
pub trait IdSource: Send + Sync {
    fn generate(&self) -> String;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn generate(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
