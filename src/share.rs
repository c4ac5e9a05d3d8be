//! Share text for a finished day

use crate::daily::DateKey;

/// Site shown at the top of the shared result
pub const SHARE_URL: &str = "blindglobe.terpscoops.com";

/// Fixed share template embedding the day and final score
pub fn share_text(total_score: i32, date: &DateKey) -> String {
    format!(
        "{SHARE_URL}\n🙈🌍{date}\n🏆 Score: {total_score}\n\nCan you top my geo-spatial awareness today?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_template() {
        let date = DateKey::parse("2024-01-02").unwrap();
        assert_eq!(
            share_text(12345, &date),
            "blindglobe.terpscoops.com\n🙈🌍2024-01-02\n🏆 Score: 12345\n\nCan you top my geo-spatial awareness today?"
        );
    }

    #[test]
    fn test_share_negative_score() {
        let date = DateKey::parse("2024-01-02").unwrap();
        assert!(share_text(-700, &date).contains("Score: -700"));
    }
}
