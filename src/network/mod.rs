pub mod stats;
pub mod window;

pub use stats::NetworkStats;
pub use window::{TopoRanges, WindowConfig};

use crate::api::types::BlockRecord;
use crate::api::LedgerSource;
use crate::error::LedgerError;
use tracing::{debug, info};

/// Network stats for the 24 hours ending now.
pub async fn aggregate_24h<L>(ledger: &L, cfg: WindowConfig) -> Result<NetworkStats, LedgerError>
where
    L: LedgerSource + Clone + 'static,
{
    let now_ms = u64::try_from(chrono::Utc::now().timestamp_millis()).unwrap_or(0);
    aggregate_window(ledger, cfg, now_ms).await
}

/// Network stats for the window of `cfg.window_secs` ending at `now_ms`.
pub async fn aggregate_window<L>(ledger: &L, cfg: WindowConfig, now_ms: u64) -> Result<NetworkStats, LedgerError>
where
    L: LedgerSource + Clone + 'static,
{
    let blocks = collect_window(ledger, cfg, now_ms).await?;
    Ok(NetworkStats::from_blocks(&blocks))
}

/// Pages backwards from the tip, `max_workers` ranges at a time, until a
/// block older than the cutoff shows up or genesis is reached.
///
/// Ranges of a group are fetched concurrently but inspected in the order
/// they were generated. Blocks are taken in the order the node returned
/// them; the first one older than the cutoff ends the walk. The rest of
/// that group is dropped and no further group is requested.
pub async fn collect_window<L>(ledger: &L, cfg: WindowConfig, now_ms: u64) -> Result<Vec<BlockRecord>, LedgerError>
where
    L: LedgerSource + Clone + 'static,
{
    let tip = ledger.chain_height().await?;
    let cutoff = cfg.cutoff_ms(now_ms);
    info!(tip, cutoff, workers = cfg.max_workers, batch = cfg.batch_size, "collecting window");

    let mut ranges = TopoRanges::new(tip, cfg.batch_size);
    let mut collected: Vec<BlockRecord> = Vec::new();

    loop {
        let group: Vec<(u64, u64)> = ranges.by_ref().take(cfg.max_workers).collect();
        let (Some(&(_, newest)), Some(&(oldest, _))) = (group.first(), group.last()) else {
            break;
        };

        let mut tasks = Vec::with_capacity(group.len());
        for &(start, end) in &group {
            let ledger = ledger.clone();
            tasks.push(tokio::spawn(async move { ledger.blocks_in_range(start, end).await }));
        }

        // the whole group lands before anything is inspected
        let mut batches = Vec::with_capacity(tasks.len());
        for t in tasks {
            let batch = t.await.map_err(|e| LedgerError::Task(e.to_string()))??;
            batches.push(batch);
        }

        for block in batches.into_iter().flatten() {
            if block.timestamp < cutoff {
                info!(blocks = collected.len(), topoheight = block.topoheight, "reached cutoff");
                return Ok(collected);
            }
            collected.push(block);
        }

        debug!(from = newest, to = oldest, blocks = collected.len(), "group done");
    }

    info!(blocks = collected.len(), "reached genesis before cutoff");
    Ok(collected)
}
