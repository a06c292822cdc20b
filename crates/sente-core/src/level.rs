//! Level codes and rank ordering.
//!
//! A level code is one or more digits followed by a tier letter: `"5k"`,
//! `"3d"`, `"2p"`. The numeric rank maps all tiers onto a single axis so
//! the public listing can sort strongest-first.

use std::{cmp::Reverse, fmt, str::FromStr};

use crate::{
  Error, Result,
  participant::Participant,
};

/// Rank assigned to a participant with no level at all. Sorts below every
/// valid code; the weakest valid rank is 30 kyu = -30.
pub const UNRANKED: i32 = -50;

// ─── Level ───────────────────────────────────────────────────────────────────

/// Skill-grade tier. Kyu counts down towards mastery, dan counts up,
/// dan-pro is the elite dan sub-tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
  Kyu,
  Dan,
  DanPro,
}

/// A parsed level code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level {
  pub number: u16,
  pub tier:   Tier,
}

impl Level {
  /// Position on the single descending-sort axis:
  /// `Nk` = -N, `Nd` = N, `Np` = N + 8 (so `1p` outranks `8d`).
  pub fn rank(&self) -> i32 {
    let n = i32::from(self.number);
    match self.tier {
      Tier::Kyu => -n,
      Tier::Dan => n,
      Tier::DanPro => n + 8,
    }
  }
}

impl FromStr for Level {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    let malformed = || Error::MalformedLevel(s.to_string());

    let tier_char = s.chars().last().ok_or_else(malformed)?;
    let digits = &s[..s.len() - tier_char.len_utf8()];

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
      return Err(malformed());
    }
    let number: u16 = digits.parse().map_err(|_| malformed())?;

    let tier = match tier_char {
      'k' => Tier::Kyu,
      'd' => Tier::Dan,
      'p' => Tier::DanPro,
      _ => return Err(malformed()),
    };

    Ok(Level { number, tier })
  }
}

impl fmt::Display for Level {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let tier = match self.tier {
      Tier::Kyu => "Kyu",
      Tier::Dan => "Dan",
      Tier::DanPro => "Dan Pro",
    };
    write!(f, "{} {tier}", self.number)
  }
}

// ─── Rank helpers ────────────────────────────────────────────────────────────

/// Rank for an optional stored level code. `None` is [`UNRANKED`].
pub fn rank_of(level: Option<&str>) -> Result<i32> {
  match level {
    Some(code) => Ok(code.parse::<Level>()?.rank()),
    None => Ok(UNRANKED),
  }
}

/// Sort participants by rank, descending (strongest first). Stable, so
/// equal ranks keep their input order.
///
/// Fails with [`Error::MalformedLevel`] if any stored code does not parse;
/// that cannot happen for records that went through form validation.
pub fn by_rank_descending(
  participants: Vec<Participant>,
) -> Result<Vec<Participant>> {
  let mut keyed: Vec<(i32, Participant)> = participants
    .into_iter()
    .map(|p| Ok((rank_of(p.level.as_deref())?, p)))
    .collect::<Result<_>>()?;

  keyed.sort_by_key(|(rank, _)| Reverse(*rank));
  Ok(keyed.into_iter().map(|(_, p)| p).collect())
}

// ─── Form choices ────────────────────────────────────────────────────────────

/// One entry of the level `<select>`.
#[derive(Debug, Clone)]
pub struct Choice {
  pub code:  String,
  pub label: String,
}

/// All selectable codes, weakest first: the empty placeholder, 30k down to
/// 1k, 1d up to 8d, 1p up to 9p.
pub fn choices() -> Vec<Choice> {
  let mut out = vec![Choice { code: String::new(), label: "---".to_string() }];

  let levels = (1..=30)
    .rev()
    .map(|n| Level { number: n, tier: Tier::Kyu })
    .chain((1..=8).map(|n| Level { number: n, tier: Tier::Dan }))
    .chain((1..=9).map(|n| Level { number: n, tier: Tier::DanPro }));

  for level in levels {
    let tier = match level.tier {
      Tier::Kyu => "k",
      Tier::Dan => "d",
      Tier::DanPro => "p",
    };
    out.push(Choice {
      code:  format!("{}{tier}", level.number),
      label: level.to_string(),
    });
  }
  out
}

// ─── Tests ───────────────────────────────────────────────────────────────────
