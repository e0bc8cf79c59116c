//! Wall-clock helpers shared by host contracts and adapters.

#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

/// Returns the current unix timestamp in milliseconds.
pub fn unix_time_ms_now() -> u64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Date::now().max(0.0) as u64
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64
    }
}

/// Milliseconds elapsed from `started_ms` to `now_ms`, saturating at zero on clock skew.
pub const fn elapsed_ms(started_ms: u64, now_ms: u64) -> u64 {
    now_ms.saturating_sub(started_ms)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_never_underflows() {
        assert_eq!(elapsed_ms(1_000, 4_500), 3_500);
        assert_eq!(elapsed_ms(5_000, 4_500), 0);
        assert!(unix_time_ms_now() > 0);
    }
}
