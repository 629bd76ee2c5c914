//! Time-related utilities.

use chrono::{DateTime, SecondsFormat, Utc};

/// Get current Unix timestamp in UTC (milliseconds)
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Convert Unix timestamp (milliseconds) to RFC 3339 format in UTC
///
/// Out-of-range timestamps fall back to the Unix epoch.
pub fn timestamp_to_rfc3339(timestamp_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(timestamp_millis)
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_millis_is_recent() {
        // テスト項目: 現在時刻が 2020 年以降のミリ秒で返される
        let now = now_millis();
        assert!(now > 1_577_836_800_000);
    }

    #[test]
    fn test_timestamp_to_rfc3339() {
        // テスト項目: ミリ秒タイムスタンプが UTC の RFC 3339 文字列に変換される
        // given (前提条件): 2024-01-01T00:00:00.123Z
        let timestamp = 1_704_067_200_123;

        // when (操作):
        let formatted = timestamp_to_rfc3339(timestamp);

        // then (期待する結果):
        assert_eq!(formatted, "2024-01-01T00:00:00.123Z");
    }

    #[test]
    fn test_timestamp_to_rfc3339_epoch() {
        assert_eq!(timestamp_to_rfc3339(0), "1970-01-01T00:00:00.000Z");
    }
}
