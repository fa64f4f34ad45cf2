pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// `quest-tester-report-<UTC timestamp>.<ext>`, for callers that want a
/// default artifact name.
pub fn timestamped_name(ext: &str) -> String {
    let ts = chrono::Utc::now().format("%Y%m%dT%H%M%S");
    format!("quest-tester-report-{ts}.{ext}")
}
