use super::{AssetName, Decimal};
use serde::{Deserialize, Serialize};

/// A quantity of one asset.
///
/// `binding_sat == 0` keeps the asset off satoshi positions (a ledger
/// balance). `binding_sat == n` puts exactly `n` units on every satoshi the
/// asset occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetInfo {
  pub name: AssetName,
  pub amount: Decimal,
  pub binding_sat: u32,
}

impl AssetInfo {
  pub fn new(name: AssetName, amount: Decimal, binding_sat: u32) -> Self {
    Self {
      name,
      amount,
      binding_sat,
    }
  }

  pub fn is_bound(&self) -> bool {
    self.binding_sat > 0
  }

  /// Satoshis needed to carry the amount; zero for unbound assets.
  pub fn binding_sat_count(&self) -> i64 {
    satoshis_for(&self.amount, self.binding_sat)
  }

  /// Amount carried by `sats` satoshis of this asset.
  pub fn amount_for_sats(&self, sats: i64) -> Decimal {
    Decimal::with_precision(sats, self.amount.precision()).mul(i64::from(self.binding_sat))
  }

  /// Same asset, different amount.
  pub fn with_amount(&self, amount: Decimal) -> Self {
    Self {
      name: self.name.clone(),
      amount,
      binding_sat: self.binding_sat,
    }
  }
}

pub(crate) fn satoshis_for(amount: &Decimal, binding_sat: u32) -> i64 {
  if binding_sat == 0 {
    return 0;
  }
  amount.div(i64::from(binding_sat)).to_int64_saturating()
}
