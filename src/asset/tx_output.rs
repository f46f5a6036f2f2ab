use super::{
  error::AssetError, info::satoshis_for, AssetInfo, AssetName, AssetOffsets, Decimal,
  OffsetRange, TxAssets, UtxoId,
};
use crate::config::{Config, DEFAULT_CONFIG};
use bitcoin::OutPoint;
use serde::{Deserialize, Serialize};
use std::{
  cmp::Ordering,
  collections::{BTreeMap, BTreeSet},
};

/// Assets pinned to a single satoshi, keyed by that satoshi's offset.
pub type SatBindingMap = BTreeMap<i64, AssetInfo>;

/// A physical output, or a compiled pool of several, together with every
/// asset it carries and where those assets sit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxOutput {
  pub utxo_id: Option<UtxoId>,
  pub outpoint: Option<OutPoint>,
  pub value: i64,
  pub assets: TxAssets,
  pub offsets: BTreeMap<AssetName, AssetOffsets>,
  pub sat_binding_map: SatBindingMap,
  /// Kept for display only, excluded from every computation.
  pub invalid: BTreeSet<AssetName>,
}

impl TxOutput {
  pub fn new(value: i64) -> Self {
    Self {
      value,
      ..Default::default()
    }
  }

  pub fn with_identity(mut self, utxo_id: UtxoId, outpoint: OutPoint) -> Self {
    self.utxo_id = Some(utxo_id);
    self.outpoint = Some(outpoint);
    self
  }

  /// A pool no longer corresponds to a single physical output.
  pub fn is_pool(&self) -> bool {
    self.utxo_id.is_none() && self.outpoint.is_none()
  }

  pub fn is_invalid(&self, name: &AssetName) -> bool {
    self.invalid.contains(name)
  }

  pub fn mark_invalid(&mut self, name: AssetName) {
    self.invalid.insert(name);
  }

  pub fn valid_assets(&self) -> impl Iterator<Item = &AssetInfo> {
    self
      .assets
      .iter()
      .filter(move |info| !self.invalid.contains(&info.name))
  }

  pub fn asset_amount(&self, name: &AssetName) -> Option<&Decimal> {
    self.assets.find(name).ok().map(|info| &info.amount)
  }

  pub fn offsets_of(&self, name: &AssetName) -> Option<&AssetOffsets> {
    self.offsets.get(name)
  }

  pub fn has_plain_sat_only(&self) -> bool {
    self.valid_assets().next().is_none()
  }

  pub fn binding_sat_count(&self) -> i64 {
    self.assets.get_binding_satoshi_count()
  }

  fn check_within_value(&self, offsets: &AssetOffsets) -> Result<(), AssetError> {
    if let Some(start) = offsets.first_start().filter(|start| *start < 0) {
      return Err(AssetError::InvalidOffset(start));
    }
    match offsets.last_end() {
      Some(end) if end > self.value => Err(AssetError::OffsetTooLarge {
        offset: end,
        value: self.value,
      }),
      _ => Ok(()),
    }
  }

  /// Places a satoshi-bound asset (ordinals, ordx) on `offsets`. The amount
  /// must match the occupied satoshis exactly.
  pub fn add_bound_asset(
    &mut self,
    info: AssetInfo,
    offsets: AssetOffsets,
  ) -> Result<(), AssetError> {
    if !info.is_bound() {
      return Err(AssetError::InvalidAssetState(info.name));
    }
    if info.amount_for_sats(offsets.total_size()) != info.amount {
      return Err(AssetError::InvalidAmount(info.amount));
    }
    self.check_within_value(&offsets)?;
    if info.amount.is_zero() {
      return Ok(());
    }

    let mut assets = self.assets.clone();
    assets.add(&info)?;

    let entry = self.offsets.entry(info.name).or_default();
    for range in offsets.iter() {
      entry.insert(*range);
    }
    self.assets = assets;
    Ok(())
  }

  /// Adds a ledger balance that is not tied to any satoshi (runes).
  pub fn add_unbound_asset(&mut self, info: AssetInfo) -> Result<(), AssetError> {
    if info.is_bound() || self.offsets.contains_key(&info.name) {
      return Err(AssetError::InvalidAssetState(info.name));
    }
    if self
      .unbound_names()
      .any(|name| *name != info.name)
    {
      return Err(AssetError::MultipleUnboundAssets);
    }
    self.assets.add(&info)
  }

  /// Pins `info` to the single satoshi at `offset` (brc20 transfers).
  pub fn bind_sat(&mut self, offset: i64, info: AssetInfo) -> Result<(), AssetError> {
    if info.is_bound() {
      return Err(AssetError::InvalidAssetState(info.name));
    }
    if offset < 0 || self.sat_binding_map.contains_key(&offset) {
      return Err(AssetError::InvalidOffset(offset));
    }
    if offset >= self.value {
      return Err(AssetError::OffsetTooLarge {
        offset,
        value: self.value,
      });
    }
    if !info.amount.is_positive() {
      return Err(AssetError::InvalidAmount(info.amount));
    }

    self.assets.add(&info)?;
    self
      .offsets
      .entry(info.name.clone())
      .or_default()
      .insert(OffsetRange::new(offset, offset + 1));
    self.sat_binding_map.insert(offset, info);
    Ok(())
  }

  fn unbound_names(&self) -> impl Iterator<Item = &AssetName> {
    self
      .valid_assets()
      .filter(move |info| !info.is_bound() && !self.offsets.contains_key(&info.name))
      .map(|info| &info.name)
  }

  /// Drops everything that is only kept for display.
  fn without_invalid(&self) -> TxOutput {
    let mut output = self.clone();
    for name in std::mem::take(&mut output.invalid) {
      output.assets.remove(&name);
      output.offsets.remove(&name);
      output.sat_binding_map.retain(|_, info| info.name != name);
    }
    output
  }

  fn sat_bound_amount(&self, name: &AssetName, precision: u32) -> Decimal {
    self
      .sat_binding_map
      .values()
      .filter(|info| info.name == *name)
      .fold(Decimal::zero(precision), |total, info| total.add(&info.amount))
  }

  fn attach(
    &mut self,
    info: &AssetInfo,
    amount: Decimal,
    offsets: AssetOffsets,
  ) -> Result<(), AssetError> {
    if amount.is_zero() {
      return Ok(());
    }
    self.assets.add(&info.with_amount(amount))?;
    self.offsets.insert(info.name.clone(), offsets);
    Ok(())
  }

  /// Pools `other` behind the value already held here. The result is a
  /// compiled pool and loses its physical identity.
  pub fn append(&mut self, other: &TxOutput) -> Result<(), AssetError> {
    let value = self
      .value
      .checked_add(other.value)
      .ok_or(AssetError::ValueOverflow)?;
    let base = self.value;

    let mut pool = self.without_invalid();
    for info in other.valid_assets() {
      pool.assets.add(info)?;
      if let Some(offsets) = other.offsets.get(&info.name) {
        pool
          .offsets
          .entry(info.name.clone())
          .or_default()
          .concatenate(&offsets.shifted(base));
      }
    }

    for (offset, info) in other.sat_binding_map.iter() {
      if other.is_invalid(&info.name) {
        continue;
      }
      pool.sat_binding_map.insert(offset + base, info.clone());
    }

    pool.value = value;
    pool.utxo_id = None;
    pool.outpoint = None;

    log::trace!(
      "appended output of {} sats at base {}, pool now {} sats with {} assets",
      other.value,
      base,
      pool.value,
      pool.assets.len()
    );

    *self = pool;
    Ok(())
  }

  /// Divides the output at `offset` into `[0, offset)` and `[offset, value)`.
  pub fn cut(&self, offset: i64) -> Result<(TxOutput, TxOutput), AssetError> {
    if offset < 0 {
      return Err(AssetError::InvalidOffset(offset));
    }
    if offset > self.value {
      return Err(AssetError::OffsetTooLarge {
        offset,
        value: self.value,
      });
    }

    // Unbound assets cannot be divided by position; a pool holding more
    // than one of them has to be isolated by the caller first.
    if self.unbound_names().count() > 1 {
      return Err(AssetError::MultipleUnboundAssets);
    }

    if offset == self.value {
      return Ok((self.without_invalid(), TxOutput::new(0)));
    }
    if offset == 0 {
      return Ok((TxOutput::new(0), self.without_invalid()));
    }

    let mut left = TxOutput::new(offset);
    let mut right = TxOutput::new(self.value - offset);

    for (&key, info) in self.sat_binding_map.iter() {
      if self.is_invalid(&info.name) {
        continue;
      }
      if key < offset {
        left.sat_binding_map.insert(key, info.clone());
      } else {
        right.sat_binding_map.insert(key - offset, info.clone());
      }
    }

    for info in self.valid_assets() {
      match (info.is_bound(), self.offsets.get(&info.name)) {
        (true, Some(offsets)) => {
          let (left_offsets, right_offsets) = offsets.cut_by_position(offset);
          left.attach(
            info,
            info.amount_for_sats(left_offsets.total_size()),
            left_offsets,
          )?;
          right.attach(
            info,
            info.amount_for_sats(right_offsets.total_size()),
            right_offsets,
          )?;
        }
        (true, None) => return Err(AssetError::OffsetNotFound(info.name.clone())),
        (false, Some(offsets)) => {
          let (left_offsets, right_offsets) = offsets.cut_by_position(offset);
          let precision = info.amount.precision();
          let left_amount = left.sat_bound_amount(&info.name, precision);
          let right_amount = right.sat_bound_amount(&info.name, precision);
          left.attach(info, left_amount, left_offsets)?;
          right.attach(info, right_amount, right_offsets)?;
        }
        (false, None) => left.assets.add(info)?,
      }
    }

    log::trace!(
      "cut {} sats at {}: left {} assets, right {} assets",
      self.value,
      offset,
      left.assets.len(),
      right.assets.len()
    );

    Ok((left, right))
  }

  /// Splits off either `value` sats or `amount` of `name`, using the
  /// default dust policy.
  pub fn split(
    &self,
    name: &AssetName,
    value: i64,
    amount: &Decimal,
  ) -> Result<(TxOutput, TxOutput), AssetError> {
    self.split_with(&DEFAULT_CONFIG, name, value, amount)
  }

  pub fn split_with(
    &self,
    config: &Config,
    name: &AssetName,
    value: i64,
    amount: &Decimal,
  ) -> Result<(TxOutput, TxOutput), AssetError> {
    if value != 0 {
      return self.cut(value);
    }
    if amount.is_zero() {
      return Err(AssetError::InvalidSplitRequest);
    }
    if amount.is_negative() {
      return Err(AssetError::InvalidAmount(amount.clone()));
    }

    if name.is_plain_sat() {
      if !amount.is_integral() {
        return Err(AssetError::InvalidAmount(amount.clone()));
      }
      let value = amount.to_int64_saturating();
      if value < config.dust_limit {
        return Err(AssetError::BelowDustLimit {
          value,
          dust: config.dust_limit,
        });
      }
      self.ensure_single_asset()?;
      return self.cut(value);
    }

    if self.is_invalid(name) {
      return Err(AssetError::InvalidAssetState(name.clone()));
    }
    let info = self.assets.pick_up(name, amount)?;
    let unbound = !info.is_bound() && !self.offsets.contains_key(name);

    let point = if info.is_bound() {
      self.bound_cut_point(config, &info)?
    } else if !unbound {
      self.sat_binding_cut_point(config, &info)?
    } else {
      config.dust_limit
    };

    self.ensure_single_asset()?;

    log::debug!(
      "split {} of {} from {} sats output at {}",
      amount,
      name,
      self.value,
      point
    );

    let (mut left, mut right) = self.cut(point)?;

    let held = left
      .asset_amount(name)
      .cloned()
      .unwrap_or_else(|| Decimal::zero(amount.precision()));
    if held != *amount {
      if !unbound {
        return Err(AssetError::NoAccurateSplit {
          name: name.clone(),
          amount: amount.clone(),
        });
      }

      // An unbound asset always lands on the left whole; hand the surplus
      // to a freshly built right side.
      let surplus = info.with_amount(held.sub(amount));
      left.assets.subtract(&surplus)?;
      right.assets = TxAssets::new();
      right.assets.add(&surplus)?;
    }

    Ok((left, right))
  }

  fn ensure_single_asset(&self) -> Result<(), AssetError> {
    match self.valid_assets().count() {
      count if count > 1 => Err(AssetError::MultipleAssetsUnsupported(count)),
      _ => Ok(()),
    }
  }

  fn bound_cut_point(&self, config: &Config, info: &AssetInfo) -> Result<i64, AssetError> {
    let offsets = self
      .offsets
      .get(&info.name)
      .ok_or_else(|| AssetError::OffsetNotFound(info.name.clone()))?;

    let (left, right) = offsets.split_by_amount(satoshis_for(&info.amount, info.binding_sat));
    let point = left.last_end().unwrap_or(0);
    if point >= config.dust_limit {
      return Ok(point);
    }

    match right.first_start() {
      Some(next) if next < config.dust_limit => Err(AssetError::BelowDustLimit {
        value: point,
        dust: config.dust_limit,
      }),
      _ => Ok(config.dust_limit),
    }
  }

  fn sat_binding_cut_point(&self, config: &Config, info: &AssetInfo) -> Result<i64, AssetError> {
    let offsets = self
      .offsets
      .get(&info.name)
      .ok_or_else(|| AssetError::OffsetNotFound(info.name.clone()))?;

    let no_accurate_split = || AssetError::NoAccurateSplit {
      name: info.name.clone(),
      amount: info.amount.clone(),
    };

    let mut total = Decimal::zero(info.amount.precision());
    for range in offsets.iter() {
      for (offset, bound) in self.sat_binding_map.range(range.start..range.end) {
        if bound.name != info.name {
          continue;
        }
        total = total.add(&bound.amount);
        match total.cmp(&info.amount) {
          Ordering::Equal => {
            return Ok((offset + config.inscription_footprint).min(self.value));
          }
          Ordering::Greater => return Err(no_accurate_split()),
          Ordering::Less => {}
        }
      }
    }

    Err(no_accurate_split())
  }
}
