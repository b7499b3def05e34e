//! Identifier generators used by entity stores.
//!
//! Stores never invent identifiers themselves; they ask an [`IdGenerator`].
//! The default [`TimeRandomIdGenerator`] is probabilistically unique. Use
//! [`UuidV7IdGenerator`] when collisions must be structurally impossible.

use crate::timestamp::MonotonicClock;
use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Number of base-36 digits in the random suffix of a time-random id.
const RANDOM_SUFFIX_LEN: u32 = 9;

/// Produces a fresh identifier string on every call.
pub trait IdGenerator: Send + Sync {
    fn generate(&self) -> String;
}

impl<F> IdGenerator for F
where
    F: Fn() -> String + Send + Sync,
{
    fn generate(&self) -> String {
        self()
    }
}

/// Base-36 monotonic millisecond component followed by a random base-36 suffix.
///
/// Two ids from the same generator never share the time component, so they
/// cannot collide with each other. Ids from separate generators rely on the
/// random suffix (36^9 values) to stay apart.
#[derive(Debug, Default)]
pub struct TimeRandomIdGenerator {
    clock: MonotonicClock,
}

impl TimeRandomIdGenerator {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            clock: MonotonicClock::new(),
        }
    }

    /// Recovers the millisecond component of an id this generator produced.
    pub fn timestamp_of(id: &str) -> Result<u64> {
        let split = id
            .len()
            .checked_sub(RANDOM_SUFFIX_LEN as usize)
            .filter(|&at| at > 0 && id.is_char_boundary(at))
            .ok_or_else(|| Error::InvalidTimestamp(format!("id too short: {id}")))?;
        from_base36(&id[..split])
            .ok_or_else(|| Error::InvalidTimestamp(format!("not a base-36 time component: {id}")))
    }

    fn random_suffix() -> String {
        let space = 36u64.pow(RANDOM_SUFFIX_LEN);
        let value = rand::thread_rng().gen_range(0..space);
        let digits = to_base36(value);
        format!("{digits:0>width$}", width = RANDOM_SUFFIX_LEN as usize)
    }
}

impl IdGenerator for TimeRandomIdGenerator {
    fn generate(&self) -> String {
        let time = to_base36(self.clock.tick());
        format!("{time}{}", Self::random_suffix())
    }
}

/// Time-ordered UUID v7 strings.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidV7IdGenerator;

impl UuidV7IdGenerator {
    /// Unix milliseconds embedded in a time-based UUID.
    pub fn timestamp_of(id: &str) -> Result<u64> {
        let uuid = Uuid::parse_str(id)?;
        let (secs, nanos) = uuid
            .get_timestamp()
            .ok_or_else(|| Error::InvalidTimestamp(format!("UUID carries no timestamp: {id}")))?
            .to_unix();
        Ok(secs * 1_000 + u64::from(nanos) / 1_000_000)
    }
}

impl IdGenerator for UuidV7IdGenerator {
    fn generate(&self) -> String {
        Uuid::now_v7().to_string()
    }
}

/// `prefix` followed by a counter starting at 1. Deterministic, for fixtures and tests.
#[derive(Debug)]
pub struct SequentialIdGenerator {
    prefix: String,
    next: AtomicU64,
}

impl SequentialIdGenerator {
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self::starting_at(prefix, 1)
    }

    #[must_use]
    pub fn starting_at(prefix: impl Into<String>, first: u64) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(first),
        }
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{n}", self.prefix)
    }
}

/// Named identifier strategy, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdStrategy {
    #[default]
    TimeRandom,
    UuidV7,
}

impl IdStrategy {
    /// Builds a fresh generator for this strategy.
    #[must_use]
    pub fn generator(self) -> Arc<dyn IdGenerator> {
        match self {
            Self::TimeRandom => Arc::new(TimeRandomIdGenerator::new()),
            Self::UuidV7 => Arc::new(UuidV7IdGenerator),
        }
    }
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TimeRandom => f.write_str("time_random"),
            Self::UuidV7 => f.write_str("uuid_v7"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = Error;

    /// Accepts the config spelling (`uuid_v7`) and the flag spelling (`uuid-v7`).
    fn from_str(raw: &str) -> Result<Self> {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "time_random" => Ok(Self::TimeRandom),
            "uuid_v7" => Ok(Self::UuidV7),
            _ => Err(Error::UnknownIdStrategy(raw.to_string())),
        }
    }
}

fn from_base36(digits: &str) -> Option<u64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0u64, |acc, c| {
        let digit = u64::from(c.to_digit(36)?);
        acc.checked_mul(36)?.checked_add(digit)
    })
}

fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(BASE36[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();
    // Only ASCII digits and lowercase letters are pushed.
    String::from_utf8(digits).unwrap_or_default()
}
