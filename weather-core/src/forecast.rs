use crate::model::ForecastEntry;

/// Time-of-day marker of the one slot per day that is kept.
pub const NOON: &str = "12:00:00";

/// Keep only the midday slot of each day, in the order the API delivered them.
///
/// A day whose 12:00 slot is missing simply has no entry.
pub fn noon_snapshots(entries: impl IntoIterator<Item = ForecastEntry>) -> Vec<ForecastEntry> {
    entries
        .into_iter()
        .filter(|e| e.timestamp.contains(NOON))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts: &str) -> ForecastEntry {
        ForecastEntry {
            timestamp: ts.to_string(),
            temperature_c: 21.0,
            condition_icon: "02d".into(),
            condition_description: "few clouds".into(),
        }
    }

    fn timestamps(entries: &[ForecastEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.timestamp.as_str()).collect()
    }

    #[test]
    fn keeps_only_noon_entries_in_order() {
        let input = vec![
            entry("2024-01-01 00:00:00"),
            entry("2024-01-01 12:00:00"),
            entry("2024-01-02 12:00:00"),
        ];

        let out = noon_snapshots(input);
        assert_eq!(
            timestamps(&out),
            vec!["2024-01-01 12:00:00", "2024-01-02 12:00:00"]
        );
    }

    #[test]
    fn filtering_is_idempotent() {
        let input: Vec<_> = (1..=5)
            .flat_map(|d| {
                ["00", "03", "06", "09", "12", "15", "18", "21"]
                    .into_iter()
                    .map(move |h| entry(&format!("2024-03-0{d} {h}:00:00")))
            })
            .collect();

        let once = noon_snapshots(input);
        let twice = noon_snapshots(once.clone());

        assert_eq!(once.len(), 5);
        assert_eq!(once, twice);
    }

    #[test]
    fn day_without_midday_slot_is_skipped() {
        let input = vec![
            entry("2024-01-01 09:00:00"),
            entry("2024-01-01 15:00:00"),
            entry("2024-01-02 12:00:00"),
        ];

        assert_eq!(timestamps(&noon_snapshots(input)), vec!["2024-01-02 12:00:00"]);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(noon_snapshots(Vec::new()).is_empty());
    }
}
