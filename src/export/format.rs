//! Text formatting shared by the OBJ and MTL writers.

use super::ExportConfig;
use std::fmt::{self, Write};

/// Locale-independent rendering of a real number.
///
/// Without a precision the shortest decimal that reads back as the same
/// `f32` is written (`1`, `0.5`, `-2.25`). With a precision, fixed notation
/// with that many fractional digits. Scientific notation is never used.
#[derive(Debug, Clone, Copy)]
pub struct Real {
    value: f32,
    precision: Option<usize>,
}

impl Real {
    pub fn new(value: f32, precision: Option<usize>) -> Self {
        Self { value, precision }
    }
}

impl fmt::Display for Real {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.precision {
            Some(p) => write!(f, "{:.*}", p, self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

/// Number formatting state for one export.
#[derive(Debug, Clone, Copy, Default)]
pub struct RealFormat {
    precision: Option<usize>,
}

impl RealFormat {
    pub fn new(precision: Option<usize>) -> Self {
        Self { precision }
    }

    pub fn real(&self, value: f32) -> Real {
        Real::new(value, self.precision)
    }

    /// Three reals separated by single spaces.
    pub fn triple(&self, x: f32, y: f32, z: f32) -> Triple {
        Triple([self.real(x), self.real(y), self.real(z)])
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Triple([Real; 3]);

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.0[0], self.0[1], self.0[2])
    }
}

/// Comment block opening both output files, followed by a blank line.
pub fn write_header(out: &mut String, config: &ExportConfig) -> fmt::Result {
    let [major, minor, revision] = config.version;
    writeln!(out, "# File produced by {}", config.product_name)?;
    writeln!(out, "# ({} v{}.{}.{})", config.short_name, major, minor, revision)?;
    writeln!(out)
}
