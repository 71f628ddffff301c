/// Scale a hashes-per-second figure to the largest unit it reaches.
pub fn format_hashrate(hs: f64) -> String {
    const UNITS: &[(f64, &str)] = &[
        (1e12, "TH/s"),
        (1e9, "GH/s"),
        (1e6, "MH/s"),
        (1e3, "KH/s"),
    ];

    for &(threshold, unit) in UNITS {
        if hs >= threshold {
            return format!("{:.2} {}", hs / threshold, unit);
        }
    }
    format!("{:.2} H/s", hs)
}

pub fn format_usd(v: f64) -> String {
    if v < 0.0 {
        format!("-${:.2}", -v)
    } else {
        format!("${:.2}", v)
    }
}

pub fn format_xel(v: f64, decimals: usize) -> String {
    format!("{:.*} XEL", decimals, v)
}

/// Whole part of `v` with comma thousands separators.
pub fn format_grouped(v: f64) -> String {
    let digits = format!("{:.0}", v.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if v < 0.0 && digits != "0" {
        out.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_hashrate() {
        assert_eq!(format_hashrate(0.0), "0.00 H/s");
        assert_eq!(format_hashrate(999.0), "999.00 H/s");
        assert_eq!(format_hashrate(1_000.0), "1.00 KH/s");
        assert_eq!(format_hashrate(1_500_000.0), "1.50 MH/s");
        assert_eq!(format_hashrate(1e9), "1.00 GH/s");
        assert_eq!(format_hashrate(2.5e12), "2.50 TH/s");
        assert_eq!(format_hashrate(4.2e15), "4200.00 TH/s");
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_usd(0.756), "$0.76");
        assert_eq!(format_usd(-1.234), "-$1.23");
        assert_eq!(format_xel(0.5, 4), "0.5000 XEL");
        assert_eq!(format_xel(182.5, 2), "182.50 XEL");
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(1_000.0), "1,000");
        assert_eq!(format_grouped(15_234_567.4), "15,234,567");
        assert_eq!(format_grouped(-4_500.0), "-4,500");
    }
}
