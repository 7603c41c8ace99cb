//! AI service status as shown on the dashboard.

use serde::Serialize;

use crate::domain::foundation::Timestamp;

/// Response time shown before the first measurement.
const INITIAL_RESPONSE_TIME_MS: u64 = 1200;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiStatus {
    pub is_online: bool,
    pub last_ping: Timestamp,
    /// Milliseconds.
    pub response_time: u64,
    pub model_version: String,
    pub api_calls: u64,
    pub errors: u64,
    /// Percentage of successful health checks, one decimal.
    pub uptime: f64,
    #[serde(skip)]
    checks_total: u64,
    #[serde(skip)]
    checks_ok: u64,
}

impl AiStatus {
    pub fn new(model_version: impl Into<String>) -> Self {
        Self {
            is_online: true,
            last_ping: Timestamp::now(),
            response_time: INITIAL_RESPONSE_TIME_MS,
            model_version: model_version.into(),
            api_calls: 0,
            errors: 0,
            uptime: 100.0,
            checks_total: 0,
            checks_ok: 0,
        }
    }

    /// A submission returned a report. Keeps the previous response time when
    /// the report's processing time is unreadable.
    pub fn record_call(&mut self, response_time_ms: Option<u64>) {
        self.api_calls += 1;
        self.last_ping = Timestamp::now();
        if let Some(ms) = response_time_ms {
            self.response_time = ms;
        }
    }

    pub fn record_error(&mut self) {
        self.errors += 1;
        self.last_ping = Timestamp::now();
    }

    /// A health probe completed; `online` is whether the service answered.
    pub fn record_check(&mut self, online: bool, response_time_ms: u64) {
        self.is_online = online;
        self.last_ping = Timestamp::now();
        self.response_time = response_time_ms;
        self.api_calls += 1;
        self.push_check(online);
    }

    /// A health probe could not be made at all.
    pub fn record_check_failure(&mut self) {
        self.is_online = false;
        self.errors += 1;
        self.last_ping = Timestamp::now();
        self.push_check(false);
    }

    fn push_check(&mut self, ok: bool) {
        self.checks_total += 1;
        if ok {
            self.checks_ok += 1;
        }
        let pct = self.checks_ok as f64 * 100.0 / self.checks_total as f64;
        self.uptime = (pct * 10.0).round() / 10.0;
    }
}

/// Reads `"2300ms"`, `"2.3 seconds"` or a bare number of milliseconds.
pub fn parse_processing_ms(processing_time: &str) -> Option<u64> {
    let text = processing_time.trim();

    let (number, scale) = if let Some(n) = text.strip_suffix("ms") {
        (n, 1.0)
    } else if let Some(n) = text
        .strip_suffix("seconds")
        .or_else(|| text.strip_suffix("second"))
        .or_else(|| text.strip_suffix('s'))
    {
        (n, 1000.0)
    } else {
        (text, 1.0)
    };

    let value: f64 = number.trim().parse().ok()?;
    (value.is_finite() && value >= 0.0).then(|| (value * scale).round() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_processing_time_formats() {
        assert_eq!(parse_processing_ms("2300ms"), Some(2300));
        assert_eq!(parse_processing_ms("2.3 seconds"), Some(2300));
        assert_eq!(parse_processing_ms("0.5 seconds"), Some(500));
        assert_eq!(parse_processing_ms("1s"), Some(1000));
        assert_eq!(parse_processing_ms("750"), Some(750));
        assert_eq!(parse_processing_ms("soon"), None);
        assert_eq!(parse_processing_ms(""), None);
    }

    #[test]
    fn uptime_tracks_successful_checks() {
        let mut status = AiStatus::new("gemini-1.5-flash");
        assert_eq!(status.uptime, 100.0);

        status.record_check(true, 800);
        status.record_check(true, 900);
        status.record_check_failure();

        assert_eq!(status.uptime, 66.7);
        assert!(!status.is_online);
        assert_eq!(status.errors, 1);
        assert_eq!(status.api_calls, 2);
        assert_eq!(status.response_time, 900);
    }

    #[test]
    fn unreadable_processing_time_keeps_previous_value() {
        let mut status = AiStatus::new("m");
        status.record_call(None);
        assert_eq!(status.response_time, INITIAL_RESPONSE_TIME_MS);
        assert_eq!(status.api_calls, 1);
    }

    #[test]
    fn counters_are_not_serialized() {
        let wire = serde_json::to_value(AiStatus::new("m")).unwrap();
        assert!(wire.get("checksTotal").is_none());
        assert_eq!(wire["modelVersion"], "m");
        assert_eq!(wire["isOnline"], true);
    }
}
