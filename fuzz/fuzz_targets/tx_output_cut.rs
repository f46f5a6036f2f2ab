#![no_main]

use {
  arbitrary::Arbitrary,
  libfuzzer_sys::fuzz_target,
  ordx::{AssetInfo, AssetName, AssetOffsets, Decimal, OffsetRange, TxOutput},
};

#[derive(Arbitrary, Debug)]
struct Input {
  value: u16,
  ranges: Vec<(u16, u16)>,
  bound_sats: Vec<(u16, u32)>,
  cut: u16,
}

fuzz_target!(|input: Input| {
  let value = i64::from(input.value);
  let mut output = TxOutput::new(value);

  let offsets = AssetOffsets::from_ranges(input.ranges.iter().map(|(a, b)| {
    let (start, end) = (i64::from(*a.min(b)), i64::from(*a.max(b)));
    OffsetRange::new(start, end)
  }));
  let ordx = AssetInfo::new(
    AssetName::ordx_ft("fuzz"),
    Decimal::from_int(offsets.total_size(), 0),
    1,
  );
  let _ = output.add_bound_asset(ordx, offsets);

  for (offset, amount) in input.bound_sats {
    let info = AssetInfo::new(
      AssetName::brc20("fuzz"),
      Decimal::from_int(i64::from(amount), 0),
      0,
    );
    let _ = output.bind_sat(i64::from(offset), info);
  }

  let Ok((left, right)) = output.cut(i64::from(input.cut)) else {
    return;
  };

  assert_eq!(left.value + right.value, output.value);
  for info in output.valid_assets() {
    assert_eq!(
      Decimal::sum(left.asset_amount(&info.name), right.asset_amount(&info.name)).as_ref(),
      Some(&info.amount)
    );
  }

  let mut rejoined = left.clone();
  rejoined.append(&right).unwrap();
  assert_eq!(rejoined, output);
});
