use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How the engine spaces out status queries for one job instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollPolicy {
    /// Wait before the first status query, and between queries for `Backoff::Fixed`.
    #[serde(with = "humantime_serde")]
    pub interval: Duration,
    pub backoff: Backoff,
    /// Give up after this many status queries.
    pub max_attempts: Option<u32>,
    /// Give up once this much time has passed since the job was launched.
    #[serde(with = "humantime_serde")]
    pub deadline: Option<Duration>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            backoff: Backoff::Fixed,
            max_attempts: None,
            deadline: Some(Duration::from_secs(10 * 60)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum Backoff {
    #[default]
    Fixed,
    Exponential {
        factor: u32,
        #[serde(with = "humantime_serde")]
        max_interval: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PollPolicyError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,
    #[error("max_attempts must allow at least one status query")]
    ZeroAttempts,
    #[error("exponential backoff factor must be at least 1")]
    ZeroFactor,
    #[error("max_interval {max_interval:?} is shorter than interval {interval:?}")]
    MaxIntervalBelowInterval {
        interval: Duration,
        max_interval: Duration,
    },
}

impl PollPolicy {
    /// Rejects policies that would query without pausing or give up before the first query.
    pub fn validate(&self) -> Result<(), PollPolicyError> {
        if self.interval.is_zero() {
            return Err(PollPolicyError::ZeroInterval);
        }
        if self.max_attempts == Some(0) {
            return Err(PollPolicyError::ZeroAttempts);
        }
        if let Backoff::Exponential {
            factor,
            max_interval,
        } = &self.backoff
        {
            if *factor == 0 {
                return Err(PollPolicyError::ZeroFactor);
            }
            if *max_interval < self.interval {
                return Err(PollPolicyError::MaxIntervalBelowInterval {
                    interval: self.interval,
                    max_interval: *max_interval,
                });
            }
        }
        Ok(())
    }

    /// Delay to wait before status query number `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match &self.backoff {
            Backoff::Fixed => self.interval,
            Backoff::Exponential {
                factor,
                max_interval,
            } => {
                let exponent = attempt.saturating_sub(1);
                let scale = factor.max(&1).saturating_pow(exponent);
                self.interval
                    .checked_mul(scale)
                    .map_or(*max_interval, |delay| delay.min(*max_interval))
            }
        }
    }

    /// True once `attempt` queries have been issued and the cap forbids another.
    pub fn attempts_exhausted(&self, attempt: u32) -> bool {
        self.max_attempts.is_some_and(|max| attempt >= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_policy_waits_one_interval() {
        let policy = PollPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(50), Duration::from_secs(1));
        assert!(!policy.attempts_exhausted(10_000));
        assert_eq!(policy.validate(), Ok(()));
    }

    #[test]
    fn exponential_policy_grows_and_caps() {
        let policy = PollPolicy {
            interval: Duration::from_millis(500),
            backoff: Backoff::Exponential {
                factor: 2,
                max_interval: Duration::from_secs(3),
            },
            max_attempts: Some(4),
            deadline: None,
        };
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_secs(1));
        assert_eq!(policy.delay_for(3), Duration::from_secs(2));
        assert_eq!(policy.delay_for(4), Duration::from_secs(3));
        assert_eq!(policy.delay_for(40), Duration::from_secs(3));
        assert!(!policy.attempts_exhausted(3));
        assert!(policy.attempts_exhausted(4));
        assert_eq!(policy.validate(), Ok(()));
    }

    #[test]
    fn degenerate_policies_are_rejected() {
        let zero_interval = PollPolicy {
            interval: Duration::ZERO,
            ..PollPolicy::default()
        };
        assert_eq!(zero_interval.validate(), Err(PollPolicyError::ZeroInterval));

        let zero_attempts = PollPolicy {
            max_attempts: Some(0),
            ..PollPolicy::default()
        };
        assert_eq!(zero_attempts.validate(), Err(PollPolicyError::ZeroAttempts));

        let zero_factor = PollPolicy {
            backoff: Backoff::Exponential {
                factor: 0,
                max_interval: Duration::from_secs(5),
            },
            ..PollPolicy::default()
        };
        assert_eq!(zero_factor.validate(), Err(PollPolicyError::ZeroFactor));

        let inverted = PollPolicy {
            interval: Duration::from_secs(2),
            backoff: Backoff::Exponential {
                factor: 2,
                max_interval: Duration::from_secs(1),
            },
            ..PollPolicy::default()
        };
        assert!(matches!(
            inverted.validate(),
            Err(PollPolicyError::MaxIntervalBelowInterval { .. })
        ));
    }
}
