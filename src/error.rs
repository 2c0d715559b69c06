use thiserror::Error;

pub type Result<T> = std::result::Result<T, GeneratorError>;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("node id {0} does not fit the 13-bit node field (max 8191)")]
    NodeIdOutOfRange(u32),

    #[error("configuration error: {0}")]
    Configuration(String),

    /// The clock reported a bucket behind the last issued one.
    #[error("clock moved backwards: last bucket {last}, now {now}")]
    ClockRegression { last: u64, now: u64 },

    #[error("clock reading {now} ms is before the generator epoch {epoch} ms")]
    ClockBeforeEpoch { now: u64, epoch: u64 },

    #[error("timestamp {0} ms does not fit the 43-bit timestamp field")]
    TimestampOverflow(u64),

    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
