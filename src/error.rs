#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum KdTreeError {
    /// A lookup was attempted against an index holding zero points.
    #[error("Nearest-neighbour query on an empty index")]
    EmptyIndexQuery,
}

pub type Result<T> = std::result::Result<T, KdTreeError>;
