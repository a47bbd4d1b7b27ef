//! Hash-rate unit normalization.
//!
//! The upstream chart source does not reliably declare which unit its
//! hash-rate values are in; the declared unit has been observed to
//! disagree with the actual magnitude. The policy here is a pinned
//! magnitude heuristic: inspect the raw value's order of magnitude,
//! pick the scale bucket it falls into, and convert to EH/s. For a
//! time series the bucket is chosen once from the latest raw value and
//! applied to the whole series, so one series never mixes scales.

/// Scale bucket inferred from a raw hash-rate value's magnitude.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HashrateScale {
    /// Raw H/s, divided by 1e18
    HashesPerSecond,
    /// TH/s, divided by 1e6
    TeraHashesPerSecond,
    /// GH/s, divided by 1e9
    GigaHashesPerSecond,
    /// MH/s, divided by 1e12
    MegaHashesPerSecond,
    /// Already EH/s (or zero), unscaled
    ExaHashesPerSecond,
}

impl HashrateScale {
    /// Pick the scale bucket for a raw value.
    pub fn infer(raw: f64) -> Self {
        if raw > 1e15 {
            HashrateScale::HashesPerSecond
        } else if raw > 1e6 {
            HashrateScale::TeraHashesPerSecond
        } else if raw > 1e3 {
            HashrateScale::GigaHashesPerSecond
        } else if raw > 1.0 {
            HashrateScale::MegaHashesPerSecond
        } else {
            HashrateScale::ExaHashesPerSecond
        }
    }

    /// Divisor that converts a value in this scale to EH/s.
    pub fn divisor(self) -> f64 {
        match self {
            HashrateScale::HashesPerSecond => 1e18,
            HashrateScale::TeraHashesPerSecond => 1e6,
            HashrateScale::GigaHashesPerSecond => 1e9,
            HashrateScale::MegaHashesPerSecond => 1e12,
            HashrateScale::ExaHashesPerSecond => 1.0,
        }
    }
}

/// Normalize one raw hash-rate value to EH/s.
pub fn normalize_hashrate_ehs(raw: f64) -> (f64, HashrateScale) {
    let scale = HashrateScale::infer(raw);
    (raw / scale.divisor(), scale)
}

/// Normalize a raw hash-rate series to EH/s in place.
///
/// The scale is inferred from the latest raw value and applied to
/// every point. An empty series is left untouched.
pub fn normalize_hashrate_series(values: &mut [f64]) -> HashrateScale {
    let latest = match values.last() {
        Some(&v) => v,
        None => return HashrateScale::ExaHashesPerSecond,
    };
    let scale = HashrateScale::infer(latest);
    let divisor = scale.divisor();
    for v in values.iter_mut() {
        *v /= divisor;
    }
    scale
}
