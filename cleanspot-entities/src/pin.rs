use std::{fmt, str::FromStr};

use thiserror::Error;
use time::Duration;

use crate::{id::*, time::*};

/// A redeemable voucher code: four groups of four digits,
/// e.g. `4711-0815-2342-9999`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PinCode(String);

impl PinCode {
    pub const GROUPS: usize = 4;
    pub const GROUP_LEN: usize = 4;
    /// Formatted length including separators.
    pub const STR_LEN: usize = Self::GROUPS * Self::GROUP_LEN + Self::GROUPS - 1;

    /// Builds a code from one numeric value per group.
    ///
    /// Each value must be below 10_000 so it fits its four digits.
    pub fn from_groups(groups: [u16; Self::GROUPS]) -> Self {
        debug_assert!(groups.iter().all(|g| *g < 10_000));
        let formatted = groups
            .iter()
            .map(|g| format!("{g:04}"))
            .collect::<Vec<_>>()
            .join("-");
        Self(formatted)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Masked form for persisted reads: all but the last group blanked.
    pub fn masked(&self) -> String {
        let last = &self.0[Self::STR_LEN - Self::GROUP_LEN..];
        format!("****-****-****-{last}")
    }
}

#[derive(Debug, Error)]
#[error("Invalid pin code")]
pub struct PinCodeParseError;

impl FromStr for PinCode {
    type Err = PinCodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::STR_LEN {
            return Err(PinCodeParseError);
        }
        let groups: Vec<&str> = s.split('-').collect();
        if groups.len() != Self::GROUPS {
            return Err(PinCodeParseError);
        }
        for group in &groups {
            if group.len() != Self::GROUP_LEN || !group.chars().all(|c| c.is_ascii_digit()) {
                return Err(PinCodeParseError);
            }
        }
        Ok(Self(s.to_owned()))
    }
}

impl fmt::Display for PinCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        f.write_str(&self.0)
    }
}

/// The redeemable code issued for a reward, 1:1 and globally unique.
///
/// Immutable after issuance except for the used flag and timestamp.
#[rustfmt::skip]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardPin {
    pub id         : Id,
    pub reward_id  : Id,
    pub code       : PinCode,
    pub issued_at  : Timestamp,
    pub expires_at : Timestamp,
    pub used       : bool,
    pub used_at    : Option<Timestamp>,
}

impl RewardPin {
    /// How long an issued pin stays redeemable.
    pub const VALIDITY: Duration = Duration::days(365);

    pub fn issue(reward_id: Id, code: PinCode, at: Timestamp) -> Self {
        Self {
            id: Id::new(),
            reward_id,
            code,
            issued_at: at,
            expires_at: at + Self::VALIDITY,
            used: false,
            used_at: None,
        }
    }

    /// The expiry boundary is inclusive: a pin is expired at exactly
    /// `expires_at`.
    pub fn is_expired(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }

    pub fn is_available(&self, now: Timestamp) -> bool {
        !self.used && !self.is_expired(now)
    }

    /// Marks the pin used. Returns `false` if it already was.
    pub fn mark_used(&mut self, at: Timestamp) -> bool {
        if self.used {
            return false;
        }
        self.used = true;
        self.used_at = Some(at);
        true
    }
}
