//! Input file parsing.
//!
//! One line, five or six `;`-separated fields:
//!
//! ```text
//! a;b;delta;n;f(x)[;g(x)]
//! ```
//!
//! ┌ `a`, `b`   : bracket ends (bisection, regula falsi) or initial guesses
//! │              (`a` for fixed point and Newton, `a` and `b` for secant)
//! ├ `delta`    : tolerance
//! ├ `n`        : iteration cap
//! ├ `f(x)`     : expression whose root is sought
//! └ `g(x)`     : optional fixed-point map, `x = g(x)`

use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("expected 5 or 6 `;`-separated fields (a;b;delta;n;f[;g]), got {got}")]
    FieldCount { got: usize },

    #[error("field `{field}`: `{value}` is not a valid number")]
    InvalidNumber { field: &'static str, value: String },

    #[error("field `{field}` is empty")]
    EmptyField { field: &'static str },

    #[error("cannot read input file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parsed input, handed unchanged to every method.
#[derive(Debug, Clone, PartialEq)]
pub struct InputConfig {
    pub a               : f64,
    pub b               : f64,
    pub delta           : f64,
    pub n               : usize,
    pub function        : String,
    pub fixed_point_map : Option<String>,
}

impl InputConfig {
    /// Reads and parses the input file at `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, InputError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| InputError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }
}

fn number<T: FromStr>(field: &'static str, value: &str) -> Result<T, InputError> {
    value.parse().map_err(|_| InputError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

impl FromStr for InputConfig {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<&str> = s.trim().split(';').map(str::trim).collect();
        if !(5..=6).contains(&fields.len()) {
            return Err(InputError::FieldCount { got: fields.len() });
        }

        let function = fields[4];
        if function.is_empty() {
            return Err(InputError::EmptyField { field: "f" });
        }

        Ok(Self {
            a               : number("a", fields[0])?,
            b               : number("b", fields[1])?,
            delta           : number("delta", fields[2])?,
            n               : number("n", fields[3])?,
            function        : function.to_string(),
            // a trailing `;` with nothing after it means no map
            fixed_point_map : fields.get(5)
                .filter(|g| !g.is_empty())
                .map(|g| g.to_string()),
        })
    }
}
