//! Coordination-free 64-bit identifiers.
//!
//! Every node packs the current millisecond, its own node id and a per-millisecond
//! counter into one `u64` (see [`layout`]). Identifiers from one generator are
//! strictly increasing in call order; identifiers from different nodes never
//! collide as long as node ids are unique.
//!
//! ```no_run
//! use nodeuid::IdGenerator;
//!
//! let generator = IdGenerator::with_node_id(42)?;
//! let a = generator.next_id()?;
//! let b = generator.next_id()?;
//! assert!(a < b);
//! # Ok::<(), nodeuid::GeneratorError>(())
//! ```
//!
//! State is not persisted: a node restarted within the millisecond it last issued
//! identifiers in can issue them again.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tracing::{debug, info, warn};

pub mod clock;
pub mod config;
pub mod error;
pub mod layout;
pub mod node;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{GeneratorConfig, GeneratorOptions, RegressionPolicy};
pub use error::{GeneratorError, Result};
pub use node::{EnvNodeId, NodeIdentity};

use layout::{
    compose, counter_of, timestamp_of, MAX_ASSIGNABLE_NODE_ID, MAX_COUNTER, MAX_NODE_ID,
    MAX_TIMESTAMP,
};

struct GeneratorState {
    /// `None` until the first identifier is issued.
    last_id: Option<u64>,
}

pub struct IdGenerator<C: Clock = SystemClock> {
    node_id: u16,
    clock: C,
    options: GeneratorOptions,
    state: Mutex<GeneratorState>,
}

impl IdGenerator<SystemClock> {
    pub fn with_node_id(node_id: u16) -> Result<Self> {
        Self::new(node_id, SystemClock, GeneratorOptions::default())
    }

    pub fn from_config(config: &GeneratorConfig) -> Result<Self> {
        let node_id = config.resolve_node_id()?;
        Self::new(node_id, SystemClock, config.options())
    }
}

impl<C: Clock> IdGenerator<C> {
    /// Reads the node identity once and checks that the clock is representable.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::NodeIdOutOfRange`] if the node id exceeds 8191, and any
    /// error from reading the identity or the clock.
    pub fn new(node: impl NodeIdentity, clock: C, options: GeneratorOptions) -> Result<Self> {
        let raw_node_id = node.node_id()?;
        if raw_node_id > u32::from(MAX_NODE_ID) {
            return Err(GeneratorError::NodeIdOutOfRange(raw_node_id));
        }
        let node_id = raw_node_id as u16;
        if node_id > MAX_ASSIGNABLE_NODE_ID {
            warn!(
                node_id,
                "node id lies in the reserved range above {}", MAX_ASSIGNABLE_NODE_ID
            );
        }

        let generator = IdGenerator {
            node_id,
            clock,
            options,
            state: Mutex::new(GeneratorState { last_id: None }),
        };
        let seed_bucket = generator.current_bucket()?;

        info!(
            node_id,
            epoch_millis = options.epoch_millis,
            seed_bucket,
            regression = ?options.regression,
            "identifier generator ready"
        );
        Ok(generator)
    }

    /// Issues the next identifier.
    ///
    /// Holds the generator lock for the whole decision, including any wait for the
    /// next millisecond once 128 identifiers were issued in the current one.
    ///
    /// # Errors
    ///
    /// [`GeneratorError::ClockRegression`] when the clock moved backwards and the
    /// [`RegressionPolicy`] does not allow waiting it out.
    /// [`GeneratorError::ClockBeforeEpoch`] and [`GeneratorError::TimestampOverflow`]
    /// when the clock reading does not fit the timestamp field.
    pub fn next_id(&self) -> Result<u64> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let bucket = self.current_bucket()?;

        let id = match state.last_id {
            None => compose(bucket, self.node_id, 0),
            Some(last_id) => {
                let last_bucket = timestamp_of(last_id);
                let bucket = if bucket < last_bucket {
                    self.recover_from_regression(last_bucket, bucket)?
                } else {
                    bucket
                };

                if bucket > last_bucket {
                    compose(bucket, self.node_id, 0)
                } else {
                    let counter = counter_of(last_id);
                    if counter < MAX_COUNTER {
                        compose(bucket, self.node_id, counter + 1)
                    } else {
                        debug!(bucket, "counter exhausted, waiting for next millisecond");
                        let next_bucket = self.wait_until(last_bucket + 1, last_bucket)?;
                        compose(next_bucket, self.node_id, 0)
                    }
                }
            }
        };

        state.last_id = Some(id);
        Ok(id)
    }

    pub fn node_id(&self) -> u16 {
        self.node_id
    }

    pub fn epoch_millis(&self) -> u64 {
        self.options.epoch_millis
    }

    /// Milliseconds since the generator epoch, checked against the timestamp field.
    fn current_bucket(&self) -> Result<u64> {
        let now = self.clock.now_millis();
        let epoch = self.options.epoch_millis;
        let bucket = now
            .checked_sub(epoch)
            .ok_or(GeneratorError::ClockBeforeEpoch { now, epoch })?;
        if bucket > MAX_TIMESTAMP {
            return Err(GeneratorError::TimestampOverflow(bucket));
        }
        Ok(bucket)
    }

    /// Returns a bucket no smaller than `last_bucket`, or rejects the regression.
    fn recover_from_regression(&self, last_bucket: u64, bucket: u64) -> Result<u64> {
        warn!(
            last_bucket,
            bucket,
            behind = last_bucket - bucket,
            "clock moved backwards"
        );
        self.check_regression(last_bucket, bucket)?;
        self.wait_until(last_bucket, last_bucket)
    }

    /// Accepts a bucket behind `last_bucket` only while the policy allows waiting it out.
    fn check_regression(&self, last_bucket: u64, bucket: u64) -> Result<()> {
        match self.options.regression {
            RegressionPolicy::Wait { max_wait_ms } if last_bucket - bucket <= max_wait_ms => {
                Ok(())
            }
            _ => Err(GeneratorError::ClockRegression {
                last: last_bucket,
                now: bucket,
            }),
        }
    }

    /// Polls the clock until it reaches `target`. A reading behind `last_bucket`
    /// goes through the regression policy on every poll.
    fn wait_until(&self, target: u64, last_bucket: u64) -> Result<u64> {
        loop {
            let bucket = self.current_bucket()?;
            if bucket >= target {
                return Ok(bucket);
            }
            if bucket < last_bucket {
                self.check_regression(last_bucket, bucket)?;
            }
            pause(self.options.poll_interval);
        }
    }
}

fn pause(interval: Duration) {
    if interval.is_zero() {
        std::thread::yield_now();
    } else {
        std::thread::sleep(interval);
    }
}
