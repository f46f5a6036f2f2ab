use super::{error::AssetError, AssetInfo, AssetName, Decimal};
use serde::{Deserialize, Serialize};

/// The assets held by one output, sorted and unique by name. No entry ever
/// carries a zero amount.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TxAssets(Vec<AssetInfo>);

impl TxAssets {
  pub fn new() -> Self {
    Self::default()
  }

  fn position(&self, name: &AssetName) -> Result<usize, usize> {
    self.0.binary_search_by(|info| info.name.cmp(name))
  }

  pub fn find(&self, name: &AssetName) -> Result<&AssetInfo, AssetError> {
    self
      .position(name)
      .map(|index| &self.0[index])
      .map_err(|_| AssetError::AssetNotFound(name.clone()))
  }

  pub fn contains(&self, name: &AssetName) -> bool {
    self.position(name).is_ok()
  }

  pub fn add(&mut self, info: &AssetInfo) -> Result<(), AssetError> {
    if info.amount.is_negative() {
      return Err(AssetError::InvalidAmount(info.amount.clone()));
    }
    if info.amount.is_zero() {
      return Ok(());
    }

    match self.position(&info.name) {
      Ok(index) => {
        let existing = &mut self.0[index];
        if existing.binding_sat != info.binding_sat {
          return Err(AssetError::InvalidAssetState(info.name.clone()));
        }
        existing.amount = existing.amount.add(&info.amount);
      }
      Err(index) => self.0.insert(index, info.clone()),
    }
    Ok(())
  }

  pub fn subtract(&mut self, info: &AssetInfo) -> Result<(), AssetError> {
    if info.amount.is_negative() {
      return Err(AssetError::InvalidAmount(info.amount.clone()));
    }

    let index = self
      .position(&info.name)
      .map_err(|_| AssetError::AssetNotFound(info.name.clone()))?;

    let existing = &mut self.0[index];
    if existing.amount < info.amount {
      return Err(AssetError::InsufficientAsset {
        name: info.name.clone(),
        have: existing.amount.clone(),
        need: info.amount.clone(),
      });
    }

    existing.amount = existing.amount.sub(&info.amount);
    if existing.amount.is_zero() {
      self.0.remove(index);
    }
    Ok(())
  }

  /// Adds every entry of `other`. Either all of them land or none do.
  pub fn merge(&mut self, other: &TxAssets) -> Result<(), AssetError> {
    let mut merged = self.clone();
    for info in other.iter() {
      merged.add(info)?;
    }
    *self = merged;
    Ok(())
  }

  /// Subtracts every entry of `other`. Either all of them apply or none do.
  pub fn split(&mut self, other: &TxAssets) -> Result<(), AssetError> {
    let mut remaining = self.clone();
    for info in other.iter() {
      remaining.subtract(info)?;
    }
    *self = remaining;
    Ok(())
  }

  /// Projects `amount` of `name` out of the set without touching it.
  pub fn pick_up(&self, name: &AssetName, amount: &Decimal) -> Result<AssetInfo, AssetError> {
    let info = self.find(name)?;
    if info.amount < *amount {
      return Err(AssetError::InsufficientAsset {
        name: name.clone(),
        have: info.amount.clone(),
        need: amount.clone(),
      });
    }
    Ok(info.with_amount(amount.clone()))
  }

  pub fn remove(&mut self, name: &AssetName) -> Option<AssetInfo> {
    self.position(name).ok().map(|index| self.0.remove(index))
  }

  pub fn equal(&self, other: &TxAssets) -> bool {
    self.0.len() == other.0.len() && self.0.iter().zip(other.0.iter()).all(|(a, b)| a == b)
  }

  /// The high-water mark of satoshi demand across bound assets. Different
  /// assets may sit on the same satoshis, so the counts are not summed.
  pub fn get_binding_satoshi_count(&self) -> i64 {
    self
      .0
      .iter()
      .filter(|info| info.is_bound())
      .map(AssetInfo::binding_sat_count)
      .max()
      .unwrap_or(0)
  }

  pub fn iter(&self) -> impl Iterator<Item = &AssetInfo> {
    self.0.iter()
  }

  pub fn names(&self) -> impl Iterator<Item = &AssetName> {
    self.0.iter().map(|info| &info.name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}

impl<'a> IntoIterator for &'a TxAssets {
  type Item = &'a AssetInfo;
  type IntoIter = std::slice::Iter<'a, AssetInfo>;

  fn into_iter(self) -> Self::IntoIter {
    self.0.iter()
  }
}
