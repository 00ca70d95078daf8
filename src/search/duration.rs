use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static DURATION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("duration pattern is valid")
});

/// Converts a `PT#H#M#S` duration token into minutes.
///
/// Missing components count as zero. Tokens that do not start with `PT`
/// yield `0.0` rather than an error.
pub fn parse_duration_minutes(token: &str) -> f64 {
    let Some(captures) = DURATION_PATTERN.captures(token) else {
        debug!("Unrecognised duration token: {:?}", token);
        return 0.0;
    };

    let component = |index: usize| -> f64 {
        captures
            .get(index)
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0.0)
    };

    let hours = component(1);
    let minutes = component(2);
    let seconds = component(3);

    hours * 60.0 + minutes + seconds / 60.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_minutes(token: &str, expected: f64) {
        let actual = parse_duration_minutes(token);
        assert!(
            (actual - expected).abs() < 1e-9,
            "{token}: expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_full_token() {
        assert_minutes("PT1H2M30S", 62.5);
    }

    #[test]
    fn test_partial_tokens() {
        assert_minutes("PT4M13S", 4.0 + 13.0 / 60.0);
        assert_minutes("PT2H", 120.0);
        assert_minutes("PT45S", 0.75);
        assert_minutes("PT1H30S", 60.5);
        assert_minutes("PT10M", 10.0);
    }

    #[test]
    fn test_components_combine_for_all_subsets() {
        for (h, m, s) in [(0u64, 0u64, 0u64), (3, 0, 7), (0, 59, 59), (12, 1, 0)] {
            let mut token = String::from("PT");
            if h > 0 {
                token.push_str(&format!("{h}H"));
            }
            if m > 0 {
                token.push_str(&format!("{m}M"));
            }
            if s > 0 {
                token.push_str(&format!("{s}S"));
            }
            assert_minutes(&token, (h * 60 + m) as f64 + s as f64 / 60.0);
        }
    }

    #[test]
    fn test_oversized_components_do_not_overflow() {
        let minutes = parse_duration_minutes("PT1000000000000000000H");
        assert!((minutes - 6e19).abs() / 6e19 < 1e-12);

        let minutes = parse_duration_minutes("PT99999999999999999999H5M");
        let expected = 99999999999999999999.0 * 60.0 + 5.0;
        assert!((minutes - expected).abs() / expected < 1e-12);
        assert!(minutes > 5.0);
    }

    #[test]
    fn test_bare_prefix_is_zero() {
        assert_eq!(parse_duration_minutes("PT"), 0.0);
    }

    #[test]
    fn test_malformed_tokens_are_zero() {
        assert_eq!(parse_duration_minutes(""), 0.0);
        assert_eq!(parse_duration_minutes("4M13S"), 0.0);
        assert_eq!(parse_duration_minutes("P1D"), 0.0);
        assert_eq!(parse_duration_minutes("garbage"), 0.0);
    }

    #[test]
    fn test_day_component_is_not_counted() {
        // Only the leading time components are read.
        assert_eq!(parse_duration_minutes("P1DT2H"), 0.0);
    }
}
