use thiserror::Error;

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("snapshot has {actual} slots, store records {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
    #[error("{offered} days offered, store capacity is {capacity}")]
    CapacityExceeded { offered: usize, capacity: usize },
    #[error("history io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("history parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
