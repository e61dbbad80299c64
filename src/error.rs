use thiserror::Error;

#[derive(Clone, Debug, PartialEq, Error)]
pub enum SimError {
    /// Aiming needs two distinct centers; both sat at `(x, y)`.
    #[error("cannot aim between coincident centers at ({x}, {y})")]
    CoincidentCenters { x: f32, y: f32 },
}
