/// An error to describe why some geometry could not be generated.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// ### A parameter has a non-physical value.
    /// Examples are a sphere with a radius of zero or less, an orbit with a
    /// non-positive semi-major axis, a non-finite angle, or fewer than two
    /// samples along a sampled axis.
    ///
    /// The `*_unchecked` functions skip this validation and produce
    /// whatever the formulas yield.
    #[error("invalid parameter `{name}` = {value}: {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: &'static str,
        /// The value that was rejected.
        value: f64,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl GeometryError {
    pub(crate) fn invalid(name: &'static str, value: f64, reason: &'static str) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason,
        }
    }
}

/// An error to describe why a scene could not be displayed.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The scene has no primitives, so there is nothing to fit the view to.
    #[error("scene has nothing to draw")]
    EmptyScene,

    /// The display backend failed, e.g. no window could be created.
    #[error("rendering backend error: {0}")]
    Backend(String),
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if !value.is_finite() {
        return Err(GeometryError::invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(GeometryError::invalid(name, value, "must be greater than zero"));
    }
    Ok(())
}

pub(crate) fn ensure_finite(name: &'static str, value: f64) -> Result<(), GeometryError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(GeometryError::invalid(name, value, "must be finite"))
    }
}

pub(crate) fn ensure_samples(name: &'static str, count: usize) -> Result<(), GeometryError> {
    if count < 2 {
        return Err(GeometryError::invalid(
            name,
            count as f64,
            "at least two samples are needed",
        ));
    }
    Ok(())
}
