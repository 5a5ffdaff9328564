pub mod epoch_stats;

pub use epoch_stats::EpochStats;
