use dashu_base::{Abs, Approximation};
use dashu_float::round::mode::Zero;
use dashu_float::{DBig, FBig};
use serde::{Deserialize, Serialize};

/// Arbitrary precision floating point with explicit precision enforcement
///
/// Uses f64 internally when precision_bits <= 64, FBig otherwise.
/// This optimization is completely transparent to external code.
#[derive(Clone, Debug)]
pub struct BigFloat {
    value: BigFloatValue,
    precision_bits: usize,
}

#[derive(Clone, Debug)]
pub enum BigFloatValue {
    F64(f64),
    Arbitrary(FBig),
}

/// Builds an FBig from an f64 at the requested precision.
///
/// Non-finite inputs have no binary representation and collapse to zero.
fn fbig_from_f64(val: f64, precision_bits: usize) -> FBig {
    let base = if val == 0.0 {
        FBig::<Zero>::ZERO
    } else {
        FBig::try_from(val).unwrap_or(FBig::<Zero>::ZERO)
    };
    base.with_precision(precision_bits).value()
}

impl BigFloat {
    /// Create BigFloat from f64 with explicit precision
    ///
    /// NO DEFAULT - precision must always be specified
    pub fn with_precision(val: f64, precision_bits: usize) -> Self {
        let value = if precision_bits <= 64 {
            BigFloatValue::F64(val)
        } else {
            BigFloatValue::Arbitrary(fbig_from_f64(val, precision_bits))
        };

        Self {
            value,
            precision_bits,
        }
    }

    /// Create zero with explicit precision
    pub fn zero(precision_bits: usize) -> Self {
        Self::with_precision(0.0, precision_bits)
    }

    /// Get precision in bits
    pub fn precision_bits(&self) -> usize {
        self.precision_bits
    }

    /// Same value re-rounded to a different precision.
    pub fn to_precision(&self, precision_bits: usize) -> Self {
        if precision_bits <= 64 {
            return Self::with_precision(self.to_f64(), precision_bits);
        }
        let fbig = self.to_fbig().with_precision(precision_bits).value();
        Self {
            value: BigFloatValue::Arbitrary(fbig),
            precision_bits,
        }
    }

    /// Convert to f64 (for display/colorization only)
    /// May lose precision for values requiring > 64 bits
    pub fn to_f64(&self) -> f64 {
        match &self.value {
            BigFloatValue::F64(v) => *v,
            BigFloatValue::Arbitrary(v) => v.to_f64().value(),
        }
    }

    /// Decimal text that [`BigFloat::from_string`] parses back at the same
    /// precision. Used for the host's coordinate inputs.
    pub fn to_decimal_string(&self) -> String {
        match &self.value {
            BigFloatValue::F64(v) => v.to_string(),
            BigFloatValue::Arbitrary(v) => v.to_decimal().value().to_string(),
        }
    }

    /// Create BigFloat from string with explicit precision
    ///
    /// Allows creating values beyond f64 range (e.g., "1e1000").
    /// Uses atomic base conversion with target precision to avoid precision loss.
    pub fn from_string(val: &str, precision_bits: usize) -> Result<Self, String> {
        let val = val.trim();
        if precision_bits <= 64 {
            val.parse::<f64>()
                .map_err(|e| format!("Failed to parse f64: {}", e))
                .and_then(|f| {
                    if f.is_finite() {
                        Ok(Self::with_precision(f, precision_bits))
                    } else {
                        Err(format!("Value out of f64 range: {}", val))
                    }
                })
        } else {
            val.parse::<DBig>()
                .map_err(|e| format!("Failed to parse DBig: {}", e))
                .map(|dbig| {
                    let fbig_halfaway = match dbig.with_base_and_precision::<2>(precision_bits) {
                        Approximation::Exact(v) => v,
                        Approximation::Inexact(v, _) => v,
                    };
                    // FBig defaults to Zero rounding; DBig conversion yields HalfAway
                    let fbig_with_prec = fbig_halfaway.with_rounding::<Zero>();
                    Self {
                        value: BigFloatValue::Arbitrary(fbig_with_prec),
                        precision_bits,
                    }
                })
        }
    }

    /// Applies `fast` when both operands fit in f64, `exact` otherwise.
    /// The result carries the wider of the two precisions.
    fn combine(
        &self,
        other: &Self,
        fast: impl FnOnce(f64, f64) -> f64,
        exact: impl FnOnce(&FBig, &FBig) -> FBig,
    ) -> Self {
        let precision_bits = self.precision_bits.max(other.precision_bits);
        let value = match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) if precision_bits <= 64 => {
                BigFloatValue::F64(fast(*a, *b))
            }
            _ => BigFloatValue::Arbitrary(exact(&self.to_fbig(), &other.to_fbig())),
        };
        Self {
            value,
            precision_bits,
        }
    }

    pub fn add(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a + b, |a, b| a + b)
    }

    pub fn sub(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a - b, |a, b| a - b)
    }

    pub fn mul(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a * b, |a, b| a * b)
    }

    pub fn div(&self, other: &Self) -> Self {
        self.combine(other, |a, b| a / b, |a, b| a / b)
    }

    /// Multiply by a plain f64 factor at this value's precision.
    pub fn mul_f64(&self, factor: f64) -> Self {
        self.mul(&Self::with_precision(factor, self.precision_bits))
    }

    /// Square, preserving precision
    pub fn square(&self) -> Self {
        self.mul(self)
    }

    pub fn abs(&self) -> Self {
        let value = match &self.value {
            BigFloatValue::F64(v) => BigFloatValue::F64(v.abs()),
            BigFloatValue::Arbitrary(v) => BigFloatValue::Arbitrary(v.clone().abs()),
        };
        Self {
            value,
            precision_bits: self.precision_bits,
        }
    }

    /// Whether the value is exactly zero
    pub fn is_zero(&self) -> bool {
        match &self.value {
            BigFloatValue::F64(v) => *v == 0.0,
            BigFloatValue::Arbitrary(v) => *v == FBig::<Zero>::ZERO,
        }
    }

    /// Approximate log2(|self|), valid far outside the f64 exponent range.
    ///
    /// Rescales by 2^±512 until the value fits in f64, then takes the f64 log.
    /// Returns negative infinity for zero.
    pub fn log2_approx(&self) -> f64 {
        const STEP_LOG2: f64 = 512.0;

        if self.is_zero() {
            return f64::NEG_INFINITY;
        }

        let step = Self::with_precision(2f64.powi(STEP_LOG2 as i32), self.precision_bits);
        let mut value = self.abs();
        let mut exponent = 0.0;

        loop {
            let approx = value.to_f64();
            if approx.is_infinite() || approx > 1e300 {
                value = value.div(&step);
                exponent += STEP_LOG2;
            } else if approx < 1e-300 {
                value = value.mul(&step);
                exponent -= STEP_LOG2;
            } else {
                return exponent + approx.log2();
            }
        }
    }

    /// Convert to FBig for arbitrary precision operations
    fn to_fbig(&self) -> FBig {
        match &self.value {
            BigFloatValue::F64(v) => fbig_from_f64(*v, self.precision_bits),
            BigFloatValue::Arbitrary(v) => v.clone(),
        }
    }
}

impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) => a == b,
            _ => self.to_fbig() == other.to_fbig(),
        }
    }
}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        match (&self.value, &other.value) {
            (BigFloatValue::F64(a), BigFloatValue::F64(b)) => a.partial_cmp(b),
            _ => self.to_fbig().partial_cmp(&other.to_fbig()),
        }
    }
}

impl std::fmt::Display for BigFloat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.value {
            BigFloatValue::F64(v) => write!(f, "{v}"),
            BigFloatValue::Arbitrary(v) => write!(f, "{v}"),
        }
    }
}

/// Wire form: the exact text of the value plus the precision it carries.
#[derive(Serialize, Deserialize)]
struct ExactRepr {
    value: String,
    precision_bits: usize,
}

impl Serialize for BigFloat {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        ExactRepr {
            value: self.to_string(),
            precision_bits: self.precision_bits,
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for BigFloat {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error;

        let ExactRepr {
            value,
            precision_bits,
        } = ExactRepr::deserialize(deserializer)?;
        let value = if precision_bits <= 64 {
            BigFloatValue::F64(value.parse::<f64>().map_err(D::Error::custom)?)
        } else {
            BigFloatValue::Arbitrary(value.parse::<FBig>().map_err(D::Error::custom)?)
        };
        Ok(Self {
            value,
            precision_bits,
        })
    }
}
