use serde::Serialize;

use crate::api::types::{BlockRecord, BlockType};

/// Atomic units per XEL.
pub const ATOMIC_PER_XEL: f64 = 1e8;
/// Assumed block time when fewer than two blocks were seen.
pub const DEFAULT_BLOCK_TIME_SECS: f64 = 15.0;

/// Network figures reduced from one window of blocks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NetworkStats {
    pub total_blocks: u64,
    pub normal_blocks: u64,
    pub side_blocks: u64,
    pub blocks_per_day: u64,
    pub avg_difficulty: f64,
    pub avg_block_time_secs: f64,
    /// Hashes per second, `avg_difficulty / avg_block_time_secs`.
    pub network_hashrate: f64,
    /// Whole XEL.
    pub total_rewards: f64,
}

impl NetworkStats {
    /// Stats for a window with no blocks. Zeroed rather than NaN.
    pub fn empty() -> Self {
        Self {
            total_blocks: 0,
            normal_blocks: 0,
            side_blocks: 0,
            blocks_per_day: 0,
            avg_difficulty: 0.0,
            avg_block_time_secs: DEFAULT_BLOCK_TIME_SECS,
            network_hashrate: 0.0,
            total_rewards: 0.0,
        }
    }

    pub fn from_blocks(blocks: &[BlockRecord]) -> Self {
        if blocks.is_empty() {
            return Self::empty();
        }

        let (mut normal, mut side) = (0u64, 0u64);
        let (mut normal_rewards, mut side_rewards) = (0.0f64, 0.0f64);
        let mut difficulty_sum = 0.0f64;
        let mut first_ts = u64::MAX;
        let mut last_ts = 0u64;

        for b in blocks {
            let reward = b.reward as f64 / ATOMIC_PER_XEL;
            match b.block_type {
                BlockType::Side => {
                    side += 1;
                    side_rewards += reward;
                }
                BlockType::Normal => {
                    normal += 1;
                    normal_rewards += reward;
                }
            }
            difficulty_sum += b.difficulty;
            first_ts = first_ts.min(b.timestamp);
            last_ts = last_ts.max(b.timestamp);
        }

        let total = blocks.len() as u64;
        let avg_difficulty = difficulty_sum / total as f64;
        let avg_block_time_secs = if total > 1 {
            (last_ts - first_ts) as f64 / 1000.0 / (total - 1) as f64
        } else {
            DEFAULT_BLOCK_TIME_SECS
        };

        Self {
            total_blocks: total,
            normal_blocks: normal,
            side_blocks: side,
            // the window is a day long, so the count is the daily rate
            blocks_per_day: total,
            avg_difficulty,
            avg_block_time_secs,
            network_hashrate: avg_difficulty / avg_block_time_secs,
            total_rewards: normal_rewards + side_rewards,
        }
    }

    /// True when the stats can't support a profitability estimate.
    pub fn is_degenerate(&self) -> bool {
        self.total_blocks == 0 || !self.network_hashrate.is_finite() || self.network_hashrate <= 0.0
    }

    pub fn avg_reward_per_block(&self) -> Option<f64> {
        (self.total_blocks > 0).then(|| self.total_rewards / self.total_blocks as f64)
    }
}
