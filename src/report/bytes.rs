use std::fmt;

const KB: u64 = 1 << 10;
const MB: u64 = 1 << 20;
const GB: u64 = 1 << 30;

/// Human-readable byte count with a 1024 base and two decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ByteSize(pub u64);

impl fmt::Display for ByteSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (scale, unit) = match self.0 {
            value if value >= GB => (GB, "GB"),
            value if value >= MB => (MB, "MB"),
            value if value >= KB => (KB, "KB"),
            _ => (1, "bytes"),
        };
        let scaled_x100 = u128::from(self.0)
            .saturating_mul(100)
            .checked_div(u128::from(scale))
            .unwrap_or(0);
        write!(f, "{}.{:02}{}", scaled_x100 / 100, scaled_x100 % 100, unit)
    }
}
