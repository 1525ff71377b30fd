//! Shared configuration for root-finding algorithms.
//!
//! Provides [`CommonCfg`] with the default tolerance and iteration limit,
//! used by all root-finding configs.
//!
//! [`CommonCfg`] : universal fields
//! ├ `delta`    : convergence threshold on residual, step or bracket width
//! └ `max_iter` : iteration cap (optional)
//!
//! [`CommonCfg::new`] initializes configuration with default values.


use super::algorithms::{Algorithm, GLOBAL_MAX_ITER_FALLBACK};


pub const DEFAULT_DELTA : f64 = 1e-6;


#[derive(Debug, Copy, Clone)]
pub struct CommonCfg {
    delta:    f64,
    max_iter: Option<usize>,
}

impl CommonCfg {
    pub fn new() -> Self {
        Self {
            delta    : DEFAULT_DELTA,
            max_iter : None
        }
    }

    // getters
    pub fn delta(&self)    -> f64 { self.delta }
    pub fn max_iter(&self) -> Option<usize> { self.max_iter }

    /// `max_iter` if set, else the algorithm's heuristic default,
    /// else [`GLOBAL_MAX_ITER_FALLBACK`].
    pub fn resolve_max_iter(&self, algorithm: Algorithm) -> usize {
        self.max_iter
            .or(algorithm.default_max_iter())
            .unwrap_or(GLOBAL_MAX_ITER_FALLBACK)
    }

    // setters (internal)
    pub(crate) fn with_delta    (&mut self, v: f64)   { self.delta    = v; }
    pub(crate) fn with_max_iter (&mut self, v: usize) { self.max_iter = Some(v); }
}

impl Default for CommonCfg {
    fn default() -> Self { Self::new() }
}

macro_rules! impl_common_cfg {
    ($cfg:ty) => {
        impl $cfg {
            pub fn set_delta(
                mut self, v: f64
            ) -> Result<Self, $crate::root_finding::errors::ToleranceError> {
                if !v.is_finite() || v <= 0.0 {
                    return Err(
                        $crate::root_finding::errors::ToleranceError::InvalidDelta { got: v }
                    );
                }
                self.common.with_delta(v);
                Ok(self)
            }
            pub fn set_max_iter(
                mut self, v: usize
            ) -> Result<Self, $crate::root_finding::errors::RootFindingError> {
                if v == 0 {
                    return Err(
                        $crate::root_finding::errors::RootFindingError::InvalidMaxIter { got: v }
                    );
                }
                self.common.with_max_iter(v);
                Ok(self)
            }

            pub fn delta(&self)    -> f64           { self.common.delta() }
            pub fn max_iter(&self) -> Option<usize> { self.common.max_iter() }
        }

        impl Default for $cfg {
            fn default() -> Self { Self::new() }
        }
    };
}
pub(crate) use impl_common_cfg;
