use std::fmt;

use serde::Serialize;

use crate::api::PriceQuote;
use crate::format::{format_grouped, format_hashrate, format_usd, format_xel};
use crate::network::NetworkStats;
use crate::profit::{Horizon, MinerProfile, ProfitabilityResult};

/// Everything one `calc` run produced; printed as text or JSON.
#[derive(Clone, Debug, Serialize)]
pub struct CalcReport {
    pub price: PriceQuote,
    pub profile: MinerProfile,
    pub stats: NetworkStats,
    pub result: ProfitabilityResult,
}

/// Terminal view of the 24h network section.
pub struct StatsView<'a>(pub &'a NetworkStats);

impl fmt::Display for StatsView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.0;
        writeln!(f, "=== Network Statistics (Last 24 Hours) ===")?;
        writeln!(f, "Network hashrate : {}", format_hashrate(s.network_hashrate))?;
        writeln!(f, "Avg difficulty   : {}", format_grouped(s.avg_difficulty))?;
        writeln!(f, "Avg block time   : {:.1}s", s.avg_block_time_secs)?;
        writeln!(f, "Blocks (24h)     : {} ({} normal, {} side)", s.total_blocks, s.normal_blocks, s.side_blocks)?;
        writeln!(f, "Total rewards    : {}", format_xel(s.total_rewards, 2))
    }
}

impl fmt::Display for CalcReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let r = &self.result;
        let p = &self.profile;

        write!(f, "{}", StatsView(&self.stats))?;
        writeln!(f)?;

        writeln!(f, "=== Your Mining Statistics ===")?;
        writeln!(f, "Your hashrate      : {}", format_hashrate(p.hashrate_khs * 1000.0))?;
        writeln!(f, "Network share      : {:.6}%", r.share_pct)?;
        writeln!(f, "Expected blocks/day: {:.4}", r.expected_blocks)?;
        writeln!(f, "Power usage        : {} W", p.power_watts)?;
        writeln!(f, "Electricity cost   : ${}/kWh", p.electricity_cost_kwh)?;
        writeln!(f)?;

        writeln!(f, "=== Estimated Revenue (Before Electricity) ===")?;
        for h in Horizon::ALL {
            let decimals = if h == Horizon::Daily { 4 } else { 2 };
            writeln!(
                f,
                "{:<8}: {:>18}  {:>12}",
                h.label(),
                format_xel(r.xel_for(h), decimals),
                format_usd(r.revenue_for(h))
            )?;
        }
        writeln!(f)?;

        writeln!(f, "=== Estimated Profit (After Electricity) ===")?;
        writeln!(f, "{}", if r.is_profitable() { "PROFITABLE" } else { "NOT PROFITABLE" })?;
        for h in Horizon::ALL {
            writeln!(
                f,
                "{:<8}: {:>12}  (electricity {})",
                h.label(),
                format_usd(r.profit_for(h)),
                format_usd(r.cost_for(h))
            )?;
        }

        let break_even = r
            .break_even_price()
            .map(|v| format!("${v:.4}"))
            .unwrap_or_else(|| "n/a".into());
        write!(f, "Break-even XEL price: {break_even} | Current XEL price: ${:.4}", self.price.usd)?;
        if self.price.used_fallback {
            write!(f, " (fallback, quote unavailable)")?;
        }
        writeln!(f)
    }
}
