//! Timestamp and ID helpers

use rand::Rng;

/// Current UTC time as Unix milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Milliseconds since the custom epoch (2024-01-01 00:00:00 UTC).
const ID_EPOCH_MS: i64 = 1_704_067_200_000;

/// Snowflake-style resource ID.
///
/// 53 bits so the value survives a round trip through JavaScript's
/// Number type: 41 bits of milliseconds since [`ID_EPOCH_MS`] (~69 years)
/// followed by 12 random bits (4096 values per millisecond).
pub fn snowflake_id() -> i64 {
    let elapsed = (now_millis() - ID_EPOCH_MS) & 0x1FF_FFFF_FFFF;
    let noise: i64 = rand::thread_rng().gen_range(0..0x1000);
    (elapsed << 12) | noise
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_stay_in_js_safe_range() {
        for _ in 0..100 {
            let id = snowflake_id();
            assert!(id > 0);
            assert!(id < (1_i64 << 53));
        }
    }

    #[test]
    fn test_ids_are_time_ordered_across_millis() {
        let a = snowflake_id();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let b = snowflake_id();
        assert!(b > a);
    }
}
