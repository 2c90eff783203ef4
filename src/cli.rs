use clap::Parser;

use crate::utils::version;

#[derive(Parser, Debug)]
#[command(author, version = version(), about)]
pub struct Cli {
    /// Frames per second
    #[arg(short, long, value_name = "FLOAT", default_value_t = 60.0, value_parser = parse_rate)]
    pub frame_rate: f64,

    /// Seed for the pipe gap generator, random when omitted
    #[arg(short, long, value_name = "U64")]
    pub seed: Option<u64>,
}

/// Rates become interval lengths, so they must be finite and positive.
fn parse_rate(raw: &str) -> Result<f64, String> {
    let rate: f64 = raw.parse().map_err(|e| format!("`{raw}` is not a number: {e}"))?;
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(format!("`{raw}` must be a finite number greater than 0"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["funkybird"]);
        assert_eq!(cli.frame_rate, 60.0);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["funkybird", "-f", "24", "--seed", "7"]);
        assert_eq!(cli.frame_rate, 24.0);
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_rejects_unusable_frame_rates() {
        for rate in ["0", "-5", "inf", "NaN", "fast"] {
            assert!(Cli::try_parse_from(["funkybird", "--frame-rate", rate]).is_err(), "accepted {rate}");
        }
        assert!(Cli::try_parse_from(["funkybird", "--frame-rate=-5"]).is_err());
    }

    #[test]
    fn test_tick_rate_is_not_a_flag() {
        assert!(Cli::try_parse_from(["funkybird", "--tick-rate", "30"]).is_err());
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(Cli::try_parse_from(["funkybird", "--seed", "-3"]).is_err());
    }
}
