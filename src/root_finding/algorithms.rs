//! Root-finding algorithm definitions.
//!
//! Provides the [`Algorithm`] enum, which enumerates all supported methods,
//! along with shared [`GLOBAL_MAX_ITER_FALLBACK`] hard cap.


/// Most methods use heuristic defaults from [`Algorithm::default_max_iter`].
/// This cap is only applied when bisection's theoretical iteration bound
/// would otherwise exceed it.
///
/// Serves as a practical safeguard against iteration counts that are
/// mathematically valid but computationally excessive.
pub const GLOBAL_MAX_ITER_FALLBACK: usize = 500;


/// Root-finding algorithm variants.
/// - [`Algorithm::Bracket`] contains bracket methods for root-finding
/// - [`Algorithm::Open`]    contains open methods for root-finding
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Algorithm {
    Bracket(BracketFamily),
    Open(OpenFamily),
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BracketFamily {
    Bisection,
    RegulaFalsi,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum OpenFamily {
    FixedPoint,
    Newton,
    Secant,
}

impl Algorithm {
    pub const BISECTION    : Algorithm = Algorithm::Bracket(BracketFamily::Bisection);
    pub const FIXED_POINT  : Algorithm = Algorithm::Open(OpenFamily::FixedPoint);
    pub const NEWTON       : Algorithm = Algorithm::Open(OpenFamily::Newton);
    pub const SECANT       : Algorithm = Algorithm::Open(OpenFamily::Secant);
    pub const REGULA_FALSI : Algorithm = Algorithm::Bracket(BracketFamily::RegulaFalsi);

    /// Every method, in the order a full run reports them.
    pub const ALL: [Algorithm; 5] = [
        Self::BISECTION,
        Self::FIXED_POINT,
        Self::NEWTON,
        Self::SECANT,
        Self::REGULA_FALSI,
    ];

    /// Default iteration count if `max_iter` is unset in config.
    ///
    /// # Notes
    /// - Applied only when `max_iter` is unset.
    /// - Values are heuristic and method-specific.
    /// - [`BracketFamily::Bisection`] returns `None`, meaning
    ///   “compute theoretical bound instead”.
    ///   - If that bound exceeds practical limits,
    ///     [`GLOBAL_MAX_ITER_FALLBACK`] is used.
    pub const fn default_max_iter(self) -> Option<usize> {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)   => None,
            Algorithm::Bracket(BracketFamily::RegulaFalsi) => Some(200),
            Algorithm::Open(OpenFamily::FixedPoint)        => Some(100),
            Algorithm::Open(OpenFamily::Newton)            => Some(50),
            Algorithm::Open(OpenFamily::Secant)            => Some(100),
        }
    }

    pub const fn algorithm_name(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)   => "bisection",
            Algorithm::Bracket(BracketFamily::RegulaFalsi) => "regula_falsi",
            Algorithm::Open(OpenFamily::FixedPoint)        => "fixed_point",
            Algorithm::Open(OpenFamily::Newton)            => "newton",
            Algorithm::Open(OpenFamily::Secant)            => "secant",
        }
    }

    /// Heading used in written reports.
    pub const fn title(self) -> &'static str {
        match self {
            Algorithm::Bracket(BracketFamily::Bisection)   => "Bisection",
            Algorithm::Bracket(BracketFamily::RegulaFalsi) => "Regula Falsi",
            Algorithm::Open(OpenFamily::FixedPoint)        => "Fixed Point (MIL)",
            Algorithm::Open(OpenFamily::Newton)            => "Newton-Raphson",
            Algorithm::Open(OpenFamily::Secant)            => "Secant",
        }
    }
}
impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.algorithm_name())
    }
}
