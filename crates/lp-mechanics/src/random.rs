//! Sources of random integers.
//!
//! Every roll and every automatic decision goes through [`RandomSource`], so
//! a run can be driven by the local PRNG, by random.org, or by a fixed script
//! in tests without the caller knowing which.

use std::collections::VecDeque;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{RandomError, RandomResult};

const RANDOM_ORG_URL: &str = "https://www.random.org/integers/";

/// Produces integers in an inclusive range.
pub trait RandomSource {
    /// Draw `count` integers, each in `min..=max`.
    fn draw(&mut self, count: usize, min: u32, max: u32) -> RandomResult<Vec<u32>>;

    /// Draw a single integer in `min..=max`.
    fn draw_one(&mut self, min: u32, max: u32) -> RandomResult<u32> {
        let values = self.draw(1, min, max)?;
        values.first().copied().ok_or(RandomError::ShortBatch {
            expected: 1,
            got: 0,
        })
    }

    /// A uniformly chosen index into a list of `len` items.
    fn choose_index(&mut self, len: usize) -> RandomResult<usize> {
        let max = u32::try_from(len).unwrap_or(u32::MAX);
        if max == 0 {
            return Err(RandomError::InvalidRange { min: 0, max: 0 });
        }
        Ok(self.draw_one(0, max - 1)? as usize)
    }
}

fn check_range(min: u32, max: u32) -> RandomResult<()> {
    if min > max {
        return Err(RandomError::InvalidRange { min, max });
    }
    Ok(())
}

/// Local seeded pseudo-random generator.
#[derive(Debug, Clone)]
pub struct PseudoRandom {
    rng: StdRng,
}

impl PseudoRandom {
    /// A reproducible generator.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A generator seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl RandomSource for PseudoRandom {
    fn draw(&mut self, count: usize, min: u32, max: u32) -> RandomResult<Vec<u32>> {
        check_range(min, max)?;
        Ok((0..count).map(|_| self.rng.random_range(min..=max)).collect())
    }
}

/// Integers from the random.org HTTP service. One blocking request per draw,
/// no retry.
#[derive(Debug, Clone)]
pub struct TrueRandom {
    client: reqwest::blocking::Client,
}

impl TrueRandom {
    /// Build the HTTP client. Requests wait as long as the service takes;
    /// the blocking client's 30 second default is switched off.
    pub fn new() -> RandomResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(None::<Duration>)
            .build()?;
        Ok(Self { client })
    }
}

impl RandomSource for TrueRandom {
    fn draw(&mut self, count: usize, min: u32, max: u32) -> RandomResult<Vec<u32>> {
        check_range(min, max)?;
        tracing::debug!(count, min, max, "requesting integers from random.org");
        let body = self
            .client
            .get(RANDOM_ORG_URL)
            .query(&[
                ("num", count.to_string()),
                ("min", min.to_string()),
                ("max", max.to_string()),
                ("col", "1".to_string()),
                ("base", "10".to_string()),
                ("format", "plain".to_string()),
                ("rnd", "new".to_string()),
            ])
            .send()?
            .error_for_status()?
            .text()?;
        parse_plain_integers(&body, count, min, max)
    }
}

/// Parse random.org's plain format: one integer per line.
pub fn parse_plain_integers(body: &str, count: usize, min: u32, max: u32) -> RandomResult<Vec<u32>> {
    let values = body
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<u32>()
                .ok()
                .filter(|v| (min..=max).contains(v))
                .ok_or_else(|| RandomError::Malformed(line.to_string()))
        })
        .collect::<RandomResult<Vec<u32>>>()?;
    if values.len() < count {
        return Err(RandomError::ShortBatch {
            expected: count,
            got: values.len(),
        });
    }
    Ok(values)
}

/// Replays a fixed list of values, in order.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    values: VecDeque<u32>,
    served: usize,
}

impl ScriptedRandom {
    /// A source that will hand out `values` front to back.
    pub fn new(values: impl IntoIterator<Item = u32>) -> Self {
        Self {
            values: values.into_iter().collect(),
            served: 0,
        }
    }

    /// Values not yet served.
    pub fn remaining(&self) -> usize {
        self.values.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn draw(&mut self, count: usize, min: u32, max: u32) -> RandomResult<Vec<u32>> {
        check_range(min, max)?;
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let value = self
                .values
                .pop_front()
                .ok_or(RandomError::Exhausted(self.served))?;
            if !(min..=max).contains(&value) {
                return Err(RandomError::Malformed(format!(
                    "scripted value {value} outside {min}..={max}"
                )));
            }
            self.served += 1;
            out.push(value);
        }
        Ok(out)
    }
}
