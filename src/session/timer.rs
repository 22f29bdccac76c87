use std::time::{Duration, Instant};

use crate::error::QuizError;

pub const MIN_MINUTES: u32 = 1;
pub const MAX_MINUTES: u32 = 180;

const TICK: Duration = Duration::from_secs(1);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// No active chain, or the next deadline has not passed.
    Idle,
    Ticked,
    /// The countdown reached zero on this tick. Reported once per chain.
    Expired,
}

#[derive(Clone, Copy, Debug)]
struct TickChain {
    generation: u64,
    next_due: Instant,
}

/// Session-wide countdown with at most one active tick chain.
///
/// Starting or resuming replaces the current chain, so a restart can never
/// leave two chains decrementing the same value.
#[derive(Clone, Debug)]
pub struct Countdown {
    remaining: u32,
    chain: Option<TickChain>,
    generation: u64,
}

impl Countdown {
    pub fn new(remaining: u32) -> Self {
        Self {
            remaining,
            chain: None,
            generation: 0,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.chain.is_some()
    }

    /// Generation of the active chain, if any.
    pub fn active_generation(&self) -> Option<u64> {
        self.chain.map(|c| c.generation)
    }

    pub fn parse_minutes(input: &str) -> Result<u32, QuizError> {
        let trimmed = input.trim();
        let minutes: i64 = trimmed
            .parse()
            .map_err(|_| QuizError::TimerNotANumber(trimmed.to_string()))?;
        if minutes < MIN_MINUTES as i64 || minutes > MAX_MINUTES as i64 {
            return Err(QuizError::TimerOutOfRange {
                min: MIN_MINUTES,
                max: MAX_MINUTES,
                got: minutes,
            });
        }
        Ok(minutes as u32)
    }

    /// Restart the countdown from `minutes`. Out-of-range input leaves the
    /// countdown untouched.
    pub fn start(&mut self, minutes: u32, now: Instant) -> Result<(), QuizError> {
        if !(MIN_MINUTES..=MAX_MINUTES).contains(&minutes) {
            return Err(QuizError::TimerOutOfRange {
                min: MIN_MINUTES,
                max: MAX_MINUTES,
                got: minutes as i64,
            });
        }
        self.remaining = minutes * 60;
        self.begin_chain(now);
        Ok(())
    }

    /// Continue ticking from the current value. Returns false when there is
    /// nothing left to count down.
    pub fn resume(&mut self, now: Instant) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.begin_chain(now);
        true
    }

    pub fn pause(&mut self) {
        self.chain = None;
    }

    /// Overwrite the value without ticking, e.g. after loading a session.
    pub fn restore(&mut self, remaining: u32) {
        self.chain = None;
        self.remaining = remaining;
    }

    fn begin_chain(&mut self, now: Instant) {
        self.generation += 1;
        self.chain = Some(TickChain {
            generation: self.generation,
            next_due: now + TICK,
        });
    }

    /// One scheduled second elapsed.
    pub fn tick(&mut self) -> TickOutcome {
        if self.chain.is_none() {
            return TickOutcome::Idle;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.chain = None;
            TickOutcome::Expired
        } else {
            TickOutcome::Ticked
        }
    }

    /// Run every tick whose deadline is at or before `now`.
    pub fn advance(&mut self, now: Instant) -> TickOutcome {
        let mut outcome = TickOutcome::Idle;
        while let Some(chain) = self.chain {
            if now < chain.next_due {
                break;
            }
            outcome = self.tick();
            if let Some(active) = self.chain.as_mut() {
                active.next_due = chain.next_due + TICK;
            }
            if outcome == TickOutcome::Expired {
                break;
            }
        }
        outcome
    }

    pub fn display(&self) -> String {
        format_clock(self.remaining)
    }
}

/// `MM:SS`; minutes are not wrapped into hours.
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
