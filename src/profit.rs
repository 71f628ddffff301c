use serde::Serialize;

use crate::error::CalcError;
use crate::network::NetworkStats;

/// What the user brings to the network.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MinerProfile {
    pub hashrate_khs: f64,
    pub power_watts: f64,
    /// USD per kWh.
    pub electricity_cost_kwh: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Horizon {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Horizon {
    pub const ALL: [Horizon; 4] = [Horizon::Daily, Horizon::Weekly, Horizon::Monthly, Horizon::Yearly];

    pub fn days(self) -> f64 {
        match self {
            Horizon::Daily => 1.0,
            Horizon::Weekly => 7.0,
            Horizon::Monthly => 30.0,
            Horizon::Yearly => 365.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Horizon::Daily => "Daily",
            Horizon::Weekly => "Weekly",
            Horizon::Monthly => "Monthly",
            Horizon::Yearly => "Yearly",
        }
    }
}

/// Revenue and cost projection. Values are unrounded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProfitabilityResult {
    pub share_pct: f64,
    pub expected_blocks: f64,
    pub daily_xel: f64,
    pub weekly_xel: f64,
    pub monthly_xel: f64,
    pub yearly_xel: f64,
    pub daily_revenue: f64,
    pub weekly_revenue: f64,
    pub monthly_revenue: f64,
    pub yearly_revenue: f64,
    pub daily_cost: f64,
    pub weekly_cost: f64,
    pub monthly_cost: f64,
    pub yearly_cost: f64,
    pub daily_profit: f64,
}

impl ProfitabilityResult {
    pub fn xel_for(&self, h: Horizon) -> f64 {
        match h {
            Horizon::Daily => self.daily_xel,
            Horizon::Weekly => self.weekly_xel,
            Horizon::Monthly => self.monthly_xel,
            Horizon::Yearly => self.yearly_xel,
        }
    }

    pub fn revenue_for(&self, h: Horizon) -> f64 {
        match h {
            Horizon::Daily => self.daily_revenue,
            Horizon::Weekly => self.weekly_revenue,
            Horizon::Monthly => self.monthly_revenue,
            Horizon::Yearly => self.yearly_revenue,
        }
    }

    pub fn cost_for(&self, h: Horizon) -> f64 {
        match h {
            Horizon::Daily => self.daily_cost,
            Horizon::Weekly => self.weekly_cost,
            Horizon::Monthly => self.monthly_cost,
            Horizon::Yearly => self.yearly_cost,
        }
    }

    /// Daily profit scaled by the horizon length.
    pub fn profit_for(&self, h: Horizon) -> f64 {
        self.daily_profit * h.days()
    }

    fn all_finite(&self) -> bool {
        [
            self.share_pct,
            self.expected_blocks,
            self.daily_xel,
            self.weekly_xel,
            self.monthly_xel,
            self.yearly_xel,
            self.daily_revenue,
            self.weekly_revenue,
            self.monthly_revenue,
            self.yearly_revenue,
            self.daily_cost,
            self.weekly_cost,
            self.monthly_cost,
            self.yearly_cost,
            self.daily_profit,
        ]
        .iter()
        .all(|v| v.is_finite())
    }

    pub fn is_profitable(&self) -> bool {
        self.daily_profit > 0.0
    }

    /// Coin price at which revenue covers electricity. None without any yield.
    pub fn break_even_price(&self) -> Option<f64> {
        (self.daily_xel > 0.0).then(|| self.daily_cost / self.daily_xel)
    }
}

fn check_stats(stats: &NetworkStats) -> Result<(), CalcError> {
    if stats.total_blocks == 0 {
        return Err(CalcError::InvalidStats("no blocks in window".into()));
    }
    if !stats.network_hashrate.is_finite() || stats.network_hashrate <= 0.0 {
        return Err(CalcError::InvalidStats(format!("network hashrate {}", stats.network_hashrate)));
    }
    if !stats.total_rewards.is_finite() || stats.total_rewards < 0.0 {
        return Err(CalcError::InvalidStats(format!("total rewards {}", stats.total_rewards)));
    }
    Ok(())
}

fn check_non_negative(name: &str, v: f64) -> Result<(), CalcError> {
    if !v.is_finite() || v < 0.0 {
        return Err(CalcError::InvalidInput(format!("{name} must be a non-negative number, got {v}")));
    }
    Ok(())
}

fn check_input(profile: &MinerProfile, xel_price_usd: f64) -> Result<(), CalcError> {
    if !profile.hashrate_khs.is_finite() || profile.hashrate_khs <= 0.0 {
        return Err(CalcError::InvalidInput(format!(
            "hashrate must be positive, got {}",
            profile.hashrate_khs
        )));
    }
    check_non_negative("power", profile.power_watts)?;
    check_non_negative("electricity cost", profile.electricity_cost_kwh)?;
    check_non_negative("coin price", xel_price_usd)
}

/// Expected yield, revenue and electricity cost for `profile` on a network
/// described by `stats`.
pub fn estimate(
    profile: &MinerProfile,
    stats: &NetworkStats,
    xel_price_usd: f64,
) -> Result<ProfitabilityResult, CalcError> {
    check_stats(stats)?;
    check_input(profile, xel_price_usd)?;

    let user_hs = profile.hashrate_khs * 1000.0;
    if !user_hs.is_finite() {
        return Err(CalcError::InvalidInput(format!("hashrate {} KH/s is out of range", profile.hashrate_khs)));
    }
    let share = user_hs / stats.network_hashrate;
    let expected_blocks = stats.blocks_per_day as f64 * share;
    if !share.is_finite() || !expected_blocks.is_finite() {
        return Err(CalcError::InvalidStats(format!(
            "network hashrate {} gives an unbounded share",
            stats.network_hashrate
        )));
    }
    let avg_reward = stats
        .avg_reward_per_block()
        .ok_or_else(|| CalcError::InvalidStats("no blocks in window".into()))?;
    let daily_xel = expected_blocks * avg_reward;

    let daily_kwh = (profile.power_watts / 1000.0) * 24.0;
    let daily_cost = daily_kwh * profile.electricity_cost_kwh;
    let daily_revenue = daily_xel * xel_price_usd;

    let result = ProfitabilityResult {
        share_pct: share * 100.0,
        expected_blocks,
        daily_xel,
        weekly_xel: daily_xel * 7.0,
        monthly_xel: daily_xel * 30.0,
        yearly_xel: daily_xel * 365.0,
        daily_revenue,
        weekly_revenue: daily_revenue * 7.0,
        monthly_revenue: daily_revenue * 30.0,
        yearly_revenue: daily_revenue * 365.0,
        daily_cost,
        weekly_cost: daily_cost * 7.0,
        monthly_cost: daily_cost * 30.0,
        yearly_cost: daily_cost * 365.0,
        daily_profit: daily_revenue - daily_cost,
    };
    if !result.all_finite() {
        return Err(CalcError::InvalidInput("inputs overflow the projection".into()));
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> NetworkStats {
        NetworkStats {
            total_blocks: 100,
            normal_blocks: 95,
            side_blocks: 5,
            blocks_per_day: 100,
            avg_difficulty: 15_000_000.0,
            avg_block_time_secs: 15.0,
            network_hashrate: 1_000_000.0,
            total_rewards: 500.0,
        }
    }

    fn profile() -> MinerProfile {
        MinerProfile { hashrate_khs: 1.0, power_watts: 100.0, electricity_cost_kwh: 0.10 }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn reference_scenario() {
        let r = estimate(&profile(), &stats(), 2.0).unwrap();

        assert!(close(r.share_pct, 0.1));
        assert!(close(r.expected_blocks, 0.1));
        assert!(close(r.daily_xel, 0.5));
        assert!(close(r.daily_revenue, 1.0));
        assert!(close(r.daily_cost, 0.24));
        assert!(close(r.daily_profit, 0.76));
        assert!(r.is_profitable());
        assert!(close(r.break_even_price().unwrap(), 0.48));
    }

    #[test]
    fn horizons_scale_daily_values() {
        let r = estimate(&profile(), &stats(), 2.0).unwrap();

        for h in Horizon::ALL {
            assert_eq!(r.xel_for(h), r.daily_xel * h.days());
            assert_eq!(r.revenue_for(h), r.daily_revenue * h.days());
            assert_eq!(r.cost_for(h), r.daily_cost * h.days());
        }
        assert_eq!(r.weekly_xel, r.daily_xel * 7.0);
        assert_eq!(r.monthly_revenue, r.daily_revenue * 30.0);
        assert_eq!(r.yearly_cost, r.daily_cost * 365.0);
        assert_eq!(r.profit_for(Horizon::Yearly), r.daily_profit * 365.0);
    }

    #[test]
    fn profit_is_revenue_minus_cost() {
        let r = estimate(
            &MinerProfile { hashrate_khs: 37.3, power_watts: 215.0, electricity_cost_kwh: 0.173 },
            &stats(),
            0.91,
        )
        .unwrap();
        assert_eq!(r.daily_profit, r.daily_revenue - r.daily_cost);
    }

    #[test]
    fn deterministic() {
        let a = estimate(&profile(), &stats(), 3.3).unwrap();
        let b = estimate(&profile(), &stats(), 3.3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.daily_profit.to_bits(), b.daily_profit.to_bits());
    }

    #[test]
    fn unprofitable_when_power_is_expensive() {
        let p = MinerProfile { electricity_cost_kwh: 5.0, ..profile() };
        let r = estimate(&p, &stats(), 2.0).unwrap();
        assert!(!r.is_profitable());
        assert!(r.daily_profit < 0.0);
    }

    #[test]
    fn zero_price_has_no_revenue() {
        let r = estimate(&profile(), &stats(), 0.0).unwrap();
        assert_eq!(r.daily_revenue, 0.0);
        assert!(close(r.daily_profit, -0.24));
    }

    #[test]
    fn rejects_empty_window() {
        let err = estimate(&profile(), &NetworkStats::empty(), 2.0).unwrap_err();
        assert!(matches!(err, CalcError::InvalidStats(_)));
    }

    #[test]
    fn rejects_zero_blocks_even_with_hashrate() {
        let s = NetworkStats { total_blocks: 0, normal_blocks: 0, side_blocks: 0, ..stats() };
        assert!(matches!(estimate(&profile(), &s, 2.0), Err(CalcError::InvalidStats(_))));
    }

    #[test]
    fn rejects_undefined_hashrate() {
        for h in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let s = NetworkStats { network_hashrate: h, ..stats() };
            assert!(matches!(estimate(&profile(), &s, 2.0), Err(CalcError::InvalidStats(_))));
        }
    }

    #[test]
    fn rejects_bad_inputs() {
        let bad = [
            MinerProfile { hashrate_khs: 0.0, ..profile() },
            MinerProfile { hashrate_khs: -5.0, ..profile() },
            MinerProfile { hashrate_khs: f64::NAN, ..profile() },
            MinerProfile { power_watts: -1.0, ..profile() },
            MinerProfile { electricity_cost_kwh: -0.01, ..profile() },
        ];
        for p in bad {
            assert!(matches!(estimate(&p, &stats(), 2.0), Err(CalcError::InvalidInput(_))));
        }
        assert!(matches!(estimate(&profile(), &stats(), -2.0), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn rejects_inputs_that_overflow() {
        let huge_rig = MinerProfile { hashrate_khs: 1e306, power_watts: 1e306, electricity_cost_kwh: 1e10 };
        assert!(matches!(estimate(&huge_rig, &stats(), 2.0), Err(CalcError::InvalidInput(_))));

        let huge_bill = MinerProfile { power_watts: 1e306, electricity_cost_kwh: 1e10, ..profile() };
        assert!(matches!(estimate(&huge_bill, &stats(), 2.0), Err(CalcError::InvalidInput(_))));

        assert!(matches!(estimate(&profile(), &stats(), 1e307), Err(CalcError::InvalidInput(_))));
    }

    #[test]
    fn rejects_subnormal_network_hashrate() {
        let s = NetworkStats { network_hashrate: 5e-324, ..stats() };
        assert!(matches!(estimate(&profile(), &s, 2.0), Err(CalcError::InvalidStats(_))));
    }

    #[test]
    fn no_break_even_without_yield() {
        let s = NetworkStats { total_rewards: 0.0, ..stats() };
        let r = estimate(&profile(), &s, 2.0).unwrap();
        assert_eq!(r.break_even_price(), None);
    }
}
