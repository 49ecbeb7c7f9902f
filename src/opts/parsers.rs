use std::str::FromStr;

use crate::prelude::*;

pub fn non_zero_usize(value: &str) -> Result<usize> {
    match FromStr::from_str(value)? {
        value if value >= 1 => Ok(value),
        _ => Err(anyhow!("expected a positive number")),
    }
}

pub fn duration(value: &str) -> Result<StdDuration> {
    humantime::parse_duration(value).with_context(|| format!("`{}` is not a valid duration", value))
}
