use super::{error::AssetError, AssetName, Decimal, TxOutput};
use crate::config::Config;

/// Everything a transaction spends, pooled in input order and handed out to
/// its outputs front to back.
///
/// Offsets stay monotonic only if outputs are taken in output-index order,
/// which is the only order this type allows.
#[derive(Debug)]
pub struct TxPool<'a> {
  config: &'a Config,
  remaining: TxOutput,
  taken: usize,
}

impl<'a> TxPool<'a> {
  pub fn compile<'i>(
    config: &'a Config,
    inputs: impl IntoIterator<Item = &'i TxOutput>,
  ) -> Result<Self, AssetError> {
    let mut pool = TxOutput::new(0);
    let mut count = 0;
    for input in inputs {
      pool.append(input)?;
      count += 1;
    }

    log::debug!(
      "compiled pool of {} sats with {} assets from {} inputs",
      pool.value,
      pool.assets.len(),
      count
    );

    Ok(Self {
      config,
      remaining: pool,
      taken: 0,
    })
  }

  pub fn value(&self) -> i64 {
    self.remaining.value
  }

  pub fn remaining(&self) -> &TxOutput {
    &self.remaining
  }

  /// Number of outputs handed out so far.
  pub fn taken(&self) -> usize {
    self.taken
  }

  /// Cuts the next output, `value` sats wide, off the front of the pool.
  pub fn take(&mut self, value: i64) -> Result<TxOutput, AssetError> {
    let (output, rest) = self.remaining.cut(value)?;
    self.commit(output, rest)
  }

  /// Cuts the next output so that it carries exactly `amount` of `name`.
  pub fn take_asset(&mut self, name: &AssetName, amount: &Decimal) -> Result<TxOutput, AssetError> {
    let (output, rest) = self.remaining.split_with(self.config, name, 0, amount)?;
    self.commit(output, rest)
  }

  fn commit(&mut self, output: TxOutput, rest: TxOutput) -> Result<TxOutput, AssetError> {
    log::trace!(
      "output {} takes {} sats, {} sats left in pool",
      self.taken,
      output.value,
      rest.value
    );
    self.remaining = rest;
    self.taken += 1;
    Ok(output)
  }

  /// Cuts one output per entry of `values`, in order. Whatever is left over
  /// goes to the fee.
  pub fn distribute(mut self, values: &[i64]) -> Result<(Vec<TxOutput>, TxOutput), AssetError> {
    let total = values
      .iter()
      .try_fold(0i64, |total, value| total.checked_add(*value))
      .ok_or(AssetError::ValueOverflow)?;
    if total > self.value() {
      return Err(AssetError::OffsetTooLarge {
        offset: total,
        value: self.value(),
      });
    }

    let outputs = values
      .iter()
      .map(|value| self.take(*value))
      .collect::<Result<Vec<_>, _>>()?;

    Ok((outputs, self.remaining))
  }

  pub fn into_remainder(self) -> TxOutput {
    self.remaining
  }
}
