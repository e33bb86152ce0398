//! Pick a single source for a component.

use fm_types::{DATABASE_SOURCE, MERGED_SOURCE};

use crate::quality::QualityTable;

/// Components whose management-address value must never replace the
/// device's own value.
const MANAGEMENT_IGNORED: &[&str] = &["hostname"];

/// The most trusted source for `component` among `sources`.
///
/// A `"merged"` source always wins. Otherwise configured scores are scanned
/// first, then the scores probes announced for themselves; a candidate only
/// replaces the current pick with a strictly higher score above zero. A
/// configured source therefore keeps ties against announced ones, and among
/// equals of the same kind the earliest wins.
///
/// When nothing scores above zero, or when the scan came through a
/// management address and the component is host-identifying, the baseline
/// `"database"` is chosen; the caller decides what to do if it is absent.
pub fn best_source<'a, S: AsRef<str>>(
    table: &QualityTable,
    component: &str,
    sources: &'a [S],
    is_management: bool,
) -> &'a str {
    if let Some(merged) = sources.iter().find(|s| s.as_ref() == MERGED_SOURCE) {
        return merged.as_ref();
    }
    let mut top: Option<&'a str> = None;
    let mut top_quality = 0;
    let passes: [fn(&QualityTable, &str, &str) -> Option<i32>; 2] =
        [QualityTable::configured_quality, QualityTable::announced_quality];
    for score in passes {
        for source in sources {
            let quality = score(table, source.as_ref(), component).unwrap_or(0);
            if quality > top_quality {
                top_quality = quality;
                top = Some(source.as_ref());
            }
        }
    }
    match top {
        Some(source) if !(is_management && MANAGEMENT_IGNORED.contains(&component)) => source,
        _ => DATABASE_SOURCE,
    }
}

#[cfg(test)]
mod tests {
    use fm_config::{QualityScores, ReconConfig};

    use super::*;

    fn table() -> QualityTable {
        QualityTable::from_config(
            &ReconConfig::empty()
                .with_quality("puppet", "hostname", 52)
                .with_quality("ssh_linux", "hostname", 50)
                .with_quality("ipmi", "model_name", 40)
                .with_quality("idrac", "model_name", 40),
        )
    }

    #[test]
    fn merged_wins_outright() {
        assert_eq!(best_source(&table(), "hostname", &["puppet", "merged"], false), "merged");
    }

    #[test]
    fn highest_quality_wins() {
        assert_eq!(
            best_source(&table(), "hostname", &["ssh_linux", "puppet", "database"], false),
            "puppet"
        );
    }

    #[test]
    fn ties_pick_earliest() {
        assert_eq!(best_source(&table(), "model_name", &["idrac", "ipmi"], false), "idrac");
        assert_eq!(best_source(&table(), "model_name", &["ipmi", "idrac"], false), "ipmi");
    }

    #[test]
    fn unscored_falls_back_to_database() {
        assert_eq!(best_source(&table(), "memory", &["puppet", "ssh_linux"], false), "database");
    }

    #[test]
    fn management_hostname_uses_database() {
        assert_eq!(best_source(&table(), "hostname", &["puppet"], true), "database");
        assert_eq!(best_source(&table(), "model_name", &["ipmi"], true), "ipmi");
    }

    fn announced(entries: &[(&str, &str, i32)]) -> QualityScores {
        let mut scores = QualityScores::new();
        for (source, component, quality) in entries {
            scores
                .entry(source.to_string())
                .or_default()
                .insert(component.to_string(), *quality);
        }
        scores
    }

    #[test]
    fn configured_source_keeps_tie_against_announced() {
        let t = table().with_external(announced(&[("donpedro", "hostname", 52)]));
        assert_eq!(best_source(&t, "hostname", &["donpedro", "puppet"], false), "puppet");
        assert_eq!(best_source(&t, "hostname", &["puppet", "donpedro"], false), "puppet");
    }

    #[test]
    fn higher_announced_score_wins() {
        let t = table().with_external(announced(&[("donpedro", "hostname", 80)]));
        assert_eq!(best_source(&t, "hostname", &["puppet", "donpedro"], false), "donpedro");
    }

    #[test]
    fn announced_score_can_lift_a_configured_source() {
        let t = table().with_external(announced(&[("ssh_linux", "hostname", 90)]));
        assert_eq!(best_source(&t, "hostname", &["puppet", "ssh_linux"], false), "ssh_linux");
    }
}
