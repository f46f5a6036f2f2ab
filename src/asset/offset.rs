use serde::{Deserialize, Serialize};

/// Satoshi positions `[start, end)` relative to the first satoshi of an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OffsetRange {
  pub start: i64,
  pub end: i64,
}

impl OffsetRange {
  pub fn new(start: i64, end: i64) -> Self {
    debug_assert!(start <= end, "inverted offset range [{start}, {end})");
    Self { start, end }
  }

  pub fn size(&self) -> i64 {
    self.end - self.start
  }

  pub fn contains(&self, offset: i64) -> bool {
    self.start <= offset && offset < self.end
  }

  fn shifted(self, delta: i64) -> Self {
    Self {
      start: self.start + delta,
      end: self.end + delta,
    }
  }
}

/// Sorted, non-overlapping and fully coalesced ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetOffsets(Vec<OffsetRange>);

impl AssetOffsets {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_ranges(ranges: impl IntoIterator<Item = OffsetRange>) -> Self {
    let mut offsets = Self::new();
    for range in ranges {
      offsets.insert(range);
    }
    offsets
  }

  pub fn total_size(&self) -> i64 {
    self.0.iter().map(OffsetRange::size).sum()
  }

  pub fn insert(&mut self, range: OffsetRange) {
    if range.size() <= 0 {
      return;
    }

    let mut index = self.0.partition_point(|r| r.start < range.start);
    self.0.insert(index, range);

    if index > 0 && self.0[index - 1].end >= self.0[index].start {
      let current = self.0.remove(index);
      index -= 1;
      self.0[index].end = self.0[index].end.max(current.end);
    }

    while index + 1 < self.0.len() && self.0[index].end >= self.0[index + 1].start {
      let next = self.0.remove(index + 1);
      self.0[index].end = self.0[index].end.max(next.end);
    }
  }

  /// Appends `other`, whose ranges must already lie at or after the last
  /// range here, coalescing the boundary.
  pub fn concatenate(&mut self, other: &AssetOffsets) {
    let mut ranges = other.0.iter().copied();
    if let (Some(last), Some(first)) = (self.0.last_mut(), other.0.first()) {
      if last.end == first.start {
        last.end = first.end;
        ranges.next();
      }
    }
    self.0.extend(ranges);
  }

  pub fn shift(&mut self, delta: i64) {
    for range in self.0.iter_mut() {
      *range = range.shifted(delta);
    }
  }

  pub fn shifted(&self, delta: i64) -> Self {
    let mut offsets = self.clone();
    offsets.shift(delta);
    offsets
  }

  /// Divides after the first `n` occupied satoshis. Both halves keep their
  /// absolute positions.
  pub fn split_by_amount(&self, n: i64) -> (AssetOffsets, AssetOffsets) {
    if n <= 0 {
      return (Self::new(), self.clone());
    }

    let mut left = Vec::new();
    let mut right = Vec::new();
    let mut remaining = n;

    for range in self.0.iter() {
      if remaining == 0 {
        right.push(*range);
      } else if range.size() <= remaining {
        left.push(*range);
        remaining -= range.size();
      } else {
        let point = range.start + remaining;
        left.push(OffsetRange::new(range.start, point));
        right.push(OffsetRange::new(point, range.end));
        remaining = 0;
      }
    }

    (Self(left), Self(right))
  }

  /// Divides at the absolute position `offset`. The right half is rebased so
  /// that `offset` becomes position zero.
  pub fn cut_by_position(&self, offset: i64) -> (AssetOffsets, AssetOffsets) {
    let mut left = Vec::new();
    let mut right = Vec::new();

    for range in self.0.iter() {
      if range.end <= offset {
        left.push(*range);
      } else if range.start >= offset {
        right.push(range.shifted(-offset));
      } else {
        left.push(OffsetRange::new(range.start, offset));
        right.push(OffsetRange::new(0, range.end - offset));
      }
    }

    (Self(left), Self(right))
  }

  pub fn contains(&self, offset: i64) -> bool {
    let index = self.0.partition_point(|r| r.end <= offset);
    self
      .0
      .get(index)
      .map(|range| range.contains(offset))
      .unwrap_or(false)
  }

  pub fn first_start(&self) -> Option<i64> {
    self.0.first().map(|range| range.start)
  }

  pub fn last_end(&self) -> Option<i64> {
    self.0.last().map(|range| range.end)
  }

  pub fn ranges(&self) -> &[OffsetRange] {
    &self.0
  }

  pub fn iter(&self) -> impl Iterator<Item = &OffsetRange> {
    self.0.iter()
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
