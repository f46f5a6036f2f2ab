use super::{error::DecimalError, params::MAX_PRECISION};
use bigdecimal::{
  num_bigint::{BigInt, Sign},
  ToPrimitive, Zero,
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
  cmp::Ordering,
  fmt::{Display, Formatter},
  str::FromStr,
};

/// Fixed-point signed amount: `value / 10^precision`.
///
/// Amounts of the same asset always share one precision. Combining two
/// decimals of different precision means two different assets are being
/// mixed, and aborts through [`assert_same_precision`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Decimal {
  precision: u32,
  value: BigInt,
}

/// Aborts when `a` and `b` do not share a precision. Every binary operation
/// goes through here.
pub fn assert_same_precision(a: &Decimal, b: &Decimal) {
  if a.precision != b.precision {
    panic!(
      "decimal precision mismatch: {} (precision {}) vs {} (precision {})",
      a, a.precision, b, b.precision
    );
  }
}

fn assert_valid_precision(precision: u32) {
  if precision > MAX_PRECISION {
    panic!("decimal precision {precision} exceeds the maximum of {MAX_PRECISION}");
  }
}

fn ten_pow(exp: u32) -> BigInt {
  BigInt::from(10u32).pow(exp)
}

impl Decimal {
  /// Wraps an already scaled integer: `from_int(12345, 3)` is `12.345`.
  pub fn from_int(value: i64, precision: u32) -> Self {
    assert_valid_precision(precision);
    Self {
      precision,
      value: BigInt::from(value),
    }
  }

  /// Expresses the whole number `whole` at `precision`: `with_precision(12, 3)` is `12.000`.
  pub fn with_precision(whole: i64, precision: u32) -> Self {
    assert_valid_precision(precision);
    Self {
      precision,
      value: BigInt::from(whole) * ten_pow(precision),
    }
  }

  pub fn zero(precision: u32) -> Self {
    Self::from_int(0, precision)
  }

  /// Parses `[+-]digits[.digits]` into a decimal of exactly `max_precision`.
  pub fn from_string(s: &str, max_precision: u32) -> Result<Self, DecimalError> {
    if max_precision > MAX_PRECISION {
      return Err(DecimalError::PrecisionTooLarge {
        precision: max_precision,
        max: MAX_PRECISION,
      });
    }

    let (negative, unsigned) = match s.as_bytes().first() {
      Some(b'-') => (true, &s[1..]),
      Some(b'+') => (false, &s[1..]),
      _ => (false, s),
    };

    let (integer, fraction) = match unsigned.split_once('.') {
      Some((integer, fraction)) => (integer, Some(fraction)),
      None => (unsigned, None),
    };

    let is_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());

    if !is_digits(integer) {
      return Err(DecimalError::InvalidNum(s.to_string()));
    }

    let fraction = match fraction {
      Some(fraction) if !is_digits(fraction) => {
        return Err(DecimalError::InvalidNum(s.to_string()));
      }
      Some(fraction) => fraction,
      None => "",
    };

    let fraction_len =
      u32::try_from(fraction.len()).map_err(|_| DecimalError::InvalidNum(s.to_string()))?;
    if fraction_len > max_precision {
      return Err(DecimalError::PrecisionTooLarge {
        precision: fraction_len,
        max: max_precision,
      });
    }

    let digits = format!(
      "{integer}{fraction}{}",
      "0".repeat((max_precision - fraction_len) as usize)
    );
    let mut value =
      BigInt::from_str(&digits).map_err(|_| DecimalError::InvalidNum(s.to_string()))?;
    if negative {
      value = -value;
    }

    Ok(Self {
      precision: max_precision,
      value,
    })
  }

  /// Re-expresses the whole number `value`, bounded by `max`, at the largest
  /// precision not above `precision` for which `max` still fits in an i64
  /// once scaled.
  pub fn from_int64_with_max(value: i64, max: i64, precision: u32) -> Self {
    let limit = i128::from(i64::MAX);
    let mut precision = precision.min(MAX_PRECISION);
    while precision > 0 && i128::from(max).abs() * 10i128.pow(precision) > limit {
      precision -= 1;
    }
    Self::with_precision(value, precision)
  }

  pub fn precision(&self) -> u32 {
    self.precision
  }

  /// The raw scaled integer.
  pub fn value(&self) -> &BigInt {
    &self.value
  }

  pub fn add(&self, other: &Decimal) -> Self {
    assert_same_precision(self, other);
    Self {
      precision: self.precision,
      value: &self.value + &other.value,
    }
  }

  pub fn sub(&self, other: &Decimal) -> Self {
    assert_same_precision(self, other);
    Self {
      precision: self.precision,
      value: &self.value - &other.value,
    }
  }

  pub fn mul(&self, by: i64) -> Self {
    Self {
      precision: self.precision,
      value: &self.value * by,
    }
  }

  /// Truncating division. Panics when `by` is zero.
  pub fn div(&self, by: i64) -> Self {
    if by == 0 {
      panic!("decimal {self} divided by zero");
    }
    Self {
      precision: self.precision,
      value: &self.value / by,
    }
  }

  pub fn neg(&self) -> Self {
    Self {
      precision: self.precision,
      value: -&self.value,
    }
  }

  pub fn sign(&self) -> Sign {
    self.value.sign()
  }

  pub fn is_zero(&self) -> bool {
    self.value.is_zero()
  }

  pub fn is_positive(&self) -> bool {
    self.sign() == Sign::Plus
  }

  pub fn is_negative(&self) -> bool {
    self.sign() == Sign::Minus
  }

  /// No fractional part.
  pub fn is_integral(&self) -> bool {
    (&self.value % ten_pow(self.precision)).is_zero()
  }

  /// Integer part, truncated toward zero and clamped to the i64 range.
  pub fn to_int64_saturating(&self) -> i64 {
    let whole = &self.value / ten_pow(self.precision);
    whole.to_i64().unwrap_or(match whole.sign() {
      Sign::Minus => i64::MIN,
      _ => i64::MAX,
    })
  }

  /// Renders every fractional digit, so the precision survives a parse.
  pub fn to_fixed_string(&self) -> String {
    let (integer, fraction) = self.parts();
    let sign = if self.is_negative() { "-" } else { "" };
    if self.precision == 0 {
      format!("{sign}{integer}")
    } else {
      format!("{sign}{integer}.{fraction}")
    }
  }

  fn parts(&self) -> (BigInt, String) {
    let magnitude = BigInt::from_biguint(Sign::Plus, self.value.magnitude().clone());
    let base = ten_pow(self.precision);
    let integer = &magnitude / &base;
    let fraction = format!(
      "{:0>width$}",
      (&magnitude % &base).to_string(),
      width = self.precision as usize
    );
    (integer, fraction)
  }

  /// Nil-absorbing addition: an absent operand counts as zero.
  pub fn sum(a: Option<&Decimal>, b: Option<&Decimal>) -> Option<Decimal> {
    match (a, b) {
      (None, None) => None,
      (Some(a), None) => Some(a.clone()),
      (None, Some(b)) => Some(b.clone()),
      (Some(a), Some(b)) => Some(a.add(b)),
    }
  }

  /// Nil-absorbing subtraction: an absent operand counts as zero.
  pub fn difference(a: Option<&Decimal>, b: Option<&Decimal>) -> Option<Decimal> {
    match (a, b) {
      (None, None) => None,
      (Some(a), None) => Some(a.clone()),
      (None, Some(b)) => Some(b.neg()),
      (Some(a), Some(b)) => Some(a.sub(b)),
    }
  }

  /// Nil-absorbing comparison: an absent operand counts as zero.
  pub fn compare(a: Option<&Decimal>, b: Option<&Decimal>) -> Ordering {
    match (a, b) {
      (None, None) => Ordering::Equal,
      (Some(a), None) => a.value.sign().cmp(&Sign::NoSign),
      (None, Some(b)) => Sign::NoSign.cmp(&b.value.sign()),
      (Some(a), Some(b)) => a.cmp(b),
    }
  }
}

impl PartialOrd for Decimal {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Ord for Decimal {
  fn cmp(&self, other: &Self) -> Ordering {
    assert_same_precision(self, other);
    self.value.cmp(&other.value)
  }
}

impl Display for Decimal {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    let (integer, fraction) = self.parts();
    let sign = if self.is_negative() { "-" } else { "" };
    let fraction = fraction.trim_end_matches('0');
    if fraction.is_empty() {
      write!(f, "{sign}{integer}")
    } else {
      write!(f, "{sign}{integer}.{fraction}")
    }
  }
}

/// Parses at the precision the string itself carries.
impl FromStr for Decimal {
  type Err = DecimalError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let precision = match s.split_once('.') {
      Some((_, fraction)) => u32::try_from(fraction.len()).unwrap_or(u32::MAX),
      None => 0,
    };
    Self::from_string(s, precision)
  }
}

impl Serialize for Decimal {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.serialize_str(&self.to_fixed_string())
  }
}

impl<'de> Deserialize<'de> for Decimal {
  fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
  where
    D: Deserializer<'de>,
  {
    let s = String::deserialize(deserializer)?;
    Self::from_str(&s).map_err(serde::de::Error::custom)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_int_to_string() {
    assert_eq!(Decimal::from_int(12345, 3).to_string(), "12.345");
    assert_eq!(Decimal::from_int(12000, 3).to_string(), "12");
    assert_eq!(Decimal::from_int(12300, 3).to_string(), "12.3");
    assert_eq!(Decimal::from_int(5, 3).to_string(), "0.005");
    assert_eq!(Decimal::from_int(-1500, 3).to_string(), "-1.5");
    assert_eq!(Decimal::from_int(-5, 2).to_string(), "-0.05");
    assert_eq!(Decimal::from_int(0, 18).to_string(), "0");
    assert_eq!(Decimal::from_int(7, 0).to_string(), "7");
  }

  #[test]
  fn test_from_string() {
    assert_eq!(
      Decimal::from_string("12.345", 3).unwrap(),
      Decimal::from_int(12345, 3)
    );
    assert_eq!(
      Decimal::from_string("12.3", 3).unwrap(),
      Decimal::from_int(12300, 3)
    );
    assert_eq!(
      Decimal::from_string("-0.5", 2).unwrap(),
      Decimal::from_int(-50, 2)
    );
    assert_eq!(
      Decimal::from_string("+7", 0).unwrap(),
      Decimal::from_int(7, 0)
    );
    assert_eq!(
      Decimal::from_string("001", 0).unwrap(),
      Decimal::from_int(1, 0)
    );
    assert_eq!(
      Decimal::from_string("1.000000000000000001", 18).unwrap(),
      Decimal::from_int(1_000_000_000_000_000_001, 18)
    );
  }

  #[test]
  fn test_invalid_from_string() {
    for s in [
      "", " ", ".", "-", "+", ".456", "123.", " 123", "123 ", "1 2", "1.2.3", "12a", "1e2",
      "1.-5", "--1", "+-1",
    ] {
      assert_eq!(
        Decimal::from_string(s, 3).unwrap_err(),
        DecimalError::InvalidNum(s.to_string()),
        "{s:?}"
      );
    }

    assert_eq!(
      Decimal::from_string("1.2345", 3).unwrap_err(),
      DecimalError::PrecisionTooLarge {
        precision: 4,
        max: 3
      }
    );
    assert_eq!(
      Decimal::from_string("1", 19).unwrap_err(),
      DecimalError::PrecisionTooLarge {
        precision: 19,
        max: MAX_PRECISION
      }
    );
  }

  #[test]
  fn test_string_round_trip() {
    for (s, precision, canonical) in [
      ("0", 0, "0"),
      ("0.0", 4, "0"),
      ("12.345", 3, "12.345"),
      ("12.3400", 6, "12.34"),
      ("-7.10", 2, "-7.1"),
      ("+3", 5, "3"),
      ("000120", 1, "120"),
      ("18446744073709551615.999999999999999999", 18, "18446744073709551615.999999999999999999"),
    ] {
      let decimal = Decimal::from_string(s, precision).unwrap();
      assert_eq!(decimal.to_string(), canonical);
      assert_eq!(
        Decimal::from_string(&decimal.to_string(), precision).unwrap(),
        decimal
      );
    }
  }

  #[test]
  fn test_arithmetic() {
    let a = Decimal::from_string("1.5", 2).unwrap();
    let b = Decimal::from_string("0.25", 2).unwrap();
    assert_eq!(a.add(&b).to_string(), "1.75");
    assert_eq!(a.sub(&b).to_string(), "1.25");
    assert_eq!(b.sub(&a).to_string(), "-1.25");
    assert_eq!(a.mul(3).to_string(), "4.5");
    assert_eq!(a.div(4).to_string(), "0.37");
    assert_eq!(a.neg().to_string(), "-1.5");
    assert!(a > b);
    assert_eq!(a.cmp(&a.clone()), Ordering::Equal);
  }

  #[test]
  fn test_sign_and_zero() {
    assert_eq!(Decimal::zero(8).sign(), Sign::NoSign);
    assert!(Decimal::zero(8).is_zero());
    assert!(Decimal::from_int(1, 8).is_positive());
    assert!(Decimal::from_int(-1, 8).is_negative());
  }

  #[test]
  fn test_to_int64_saturating() {
    assert_eq!(Decimal::from_int(12345, 3).to_int64_saturating(), 12);
    assert_eq!(Decimal::from_int(-12345, 3).to_int64_saturating(), -12);
    let huge = Decimal::from_string("99999999999999999999999", 0).unwrap();
    assert_eq!(huge.to_int64_saturating(), i64::MAX);
    assert_eq!(huge.neg().to_int64_saturating(), i64::MIN);
  }

  #[test]
  fn test_is_integral() {
    assert!(Decimal::from_int(5000, 1).is_integral());
    assert!(!Decimal::from_int(5005, 1).is_integral());
    assert!(!Decimal::from_int(-5005, 1).is_integral());
    assert!(Decimal::zero(18).is_integral());
    assert!(Decimal::from_int(7, 0).is_integral());
  }

  #[test]
  fn test_from_int64_with_max() {
    let decimal = Decimal::from_int64_with_max(5, 1000, 18);
    assert_eq!(decimal.precision(), 15);
    assert_eq!(decimal.to_string(), "5");

    let decimal = Decimal::from_int64_with_max(5, 9, 3);
    assert_eq!(decimal.precision(), 3);
    assert_eq!(decimal, Decimal::from_int(5000, 3));

    assert_eq!(Decimal::from_int64_with_max(1, i64::MAX, 8).precision(), 0);
  }

  #[test]
  fn test_nil_absorbing() {
    let a = Decimal::from_int(10, 1);
    let b = Decimal::from_int(3, 1);
    assert_eq!(Decimal::sum(None, None), None);
    assert_eq!(Decimal::sum(Some(&a), None), Some(a.clone()));
    assert_eq!(Decimal::sum(None, Some(&b)), Some(b.clone()));
    assert_eq!(Decimal::sum(Some(&a), Some(&b)), Some(Decimal::from_int(13, 1)));
    assert_eq!(Decimal::difference(None, Some(&b)), Some(Decimal::from_int(-3, 1)));
    assert_eq!(Decimal::compare(None, None), Ordering::Equal);
    assert_eq!(Decimal::compare(Some(&a), None), Ordering::Greater);
    assert_eq!(Decimal::compare(None, Some(&b)), Ordering::Less);
    assert_eq!(
      Decimal::compare(None, Some(&Decimal::zero(1))),
      Ordering::Equal
    );
    assert_eq!(
      Decimal::compare(Some(&a.neg()), None),
      Ordering::Less
    );
  }

  #[test]
  #[should_panic(expected = "decimal precision mismatch")]
  fn test_add_precision_mismatch_panics() {
    Decimal::from_int(1, 2).add(&Decimal::from_int(1, 3));
  }

  #[test]
  #[should_panic(expected = "decimal precision mismatch")]
  fn test_cmp_precision_mismatch_panics() {
    let _ = Decimal::from_int(1, 0) < Decimal::from_int(1, 8);
  }

  #[test]
  #[should_panic(expected = "divided by zero")]
  fn test_div_by_zero_panics() {
    Decimal::from_int(1, 0).div(0);
  }

  #[test]
  fn test_serialize() {
    let decimal = Decimal::from_string("1.01", 4).unwrap();
    assert_eq!(serde_json::to_string(&decimal).unwrap(), "\"1.0100\"");
    assert_eq!(
      serde_json::from_str::<Decimal>("\"1.0100\"").unwrap(),
      decimal
    );
    assert_eq!(
      serde_json::from_str::<Decimal>("\"42\"").unwrap(),
      Decimal::from_int(42, 0)
    );
    assert!(serde_json::from_str::<Decimal>("\"4x\"").is_err());
  }
}
