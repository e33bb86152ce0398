use fm_match::{find_match_index, identity_lookup};
use fm_rank::QualityTable;
use fm_types::{is_reserved_source, BySource, FieldGroup, Facts, Record, DATABASE_SOURCE};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{MergeError, MergeResult};
use crate::fields::merge_fields_into;

/// Counters describing one component's merge pass.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    /// Records seeded from the baseline.
    pub seeded: usize,
    /// Probe records folded into an existing result record.
    pub matched: usize,
    /// Probe records appended because no result record matched.
    pub appended: usize,
    /// Appended records that satisfied no unique field group.
    pub unmatchable: usize,
}

/// Folds per-source record tables into one canonical table.
#[derive(Clone, Debug)]
pub struct Merger {
    quality: QualityTable,
}

impl Merger {
    /// Create a merger ranking sources with `quality`.
    pub fn new(quality: QualityTable) -> Self {
        Self { quality }
    }

    /// The quality table sources are ranked with.
    pub fn quality(&self) -> &QualityTable {
        &self.quality
    }

    /// Merge `by_source` for `component` into a canonical table.
    ///
    /// See [`Merger::merge_with_stats`].
    pub fn merge(
        &self,
        component: &str,
        by_source: &BySource,
        unique_fields: &[FieldGroup],
    ) -> MergeResult<Vec<Record>> {
        self.merge_with_stats(component, by_source, unique_fields)
            .map(|(records, _)| records)
    }

    /// Merge `by_source` for `component` and report what happened.
    ///
    /// 1. The `"database"` table, if any, seeds the result verbatim.
    /// 2. Every other non-reserved source is applied in ascending quality.
    /// 3. Each record is keyed by the first fully satisfied unique field
    ///    group and looked up in the accumulated result. A match is
    ///    overwritten field by field and keeps its position; anything else,
    ///    unmatchable records included, is appended.
    ///
    /// Inputs are never mutated. Non-table payloads are skipped.
    pub fn merge_with_stats(
        &self,
        component: &str,
        by_source: &BySource,
        unique_fields: &[FieldGroup],
    ) -> MergeResult<(Vec<Record>, MergeStats)> {
        if unique_fields.is_empty() {
            return Err(MergeError::NotRecordTable(component.to_string()));
        }

        let mut stats = MergeStats::default();
        let mut result: Vec<Record> = match by_source.get(DATABASE_SOURCE) {
            Some(Facts::Table(rows)) => rows.clone(),
            Some(other) => {
                warn!(component, shape = other.shape(), "baseline is not a table; ignoring it");
                Vec::new()
            }
            None => Vec::new(),
        };
        stats.seeded = result.len();

        let probes: Vec<&str> = by_source
            .iter()
            .filter(|(source, _)| !is_reserved_source(source))
            .filter_map(|(source, facts)| {
                if facts.as_table().is_none() {
                    warn!(component, source = %source, shape = facts.shape(), "skipping non-table facts");
                    return None;
                }
                Some(source.as_str())
            })
            .collect();
        let ranked = self.quality.rank_sources(&probes, component);
        debug!(
            component,
            order = ?ranked.iter().map(|r| r.source.as_str()).collect::<Vec<_>>(),
            "merge order (lowest trust first)"
        );

        for ranked_source in &ranked {
            let rows = by_source
                .get(&ranked_source.source)
                .and_then(Facts::as_table)
                .unwrap_or(&[]);
            for row in rows {
                let Some(lookup) = identity_lookup(row, unique_fields) else {
                    stats.unmatchable += 1;
                    stats.appended += 1;
                    result.push(row.clone());
                    continue;
                };
                match find_match_index(&result, &lookup) {
                    Some(index) => {
                        merge_fields_into(&mut result[index], row);
                        stats.matched += 1;
                    }
                    None => {
                        result.push(row.clone());
                        stats.appended += 1;
                    }
                }
            }
        }

        debug!(
            component,
            seeded = stats.seeded,
            matched = stats.matched,
            appended = stats.appended,
            unmatchable = stats.unmatchable,
            total = result.len(),
            "component merged"
        );
        Ok((result, stats))
    }
}

#[cfg(test)]
mod tests {
    use fm_config::ReconConfig;
    use fm_types::{groups, record, Value};
    use proptest::prelude::*;

    use super::*;

    fn merger(ranks: &[(&str, i32)]) -> Merger {
        let mut config = ReconConfig::empty();
        for (probe, quality) in ranks {
            config = config.with_quality(*probe, "foo", *quality);
        }
        Merger::new(QualityTable::from_config(&config))
    }

    fn table(rows: Vec<Record>) -> Facts {
        Facts::Table(rows)
    }

    fn by_source(entries: Vec<(&str, Vec<Record>)>) -> BySource {
        entries.into_iter().map(|(s, rows)| (s.to_string(), table(rows))).collect()
    }

    #[test]
    fn single_serial_scenario() {
        let input = by_source(vec![
            ("database", vec![record! { "serial_number" => "sn1", "param_1" => "v1_0", "param_db" => "only_db" }]),
            ("plugin_1", vec![record! { "serial_number" => "sn1", "param_1" => "v1_1", "param_2" => "v2_1" }]),
            ("plugin_2", vec![record! { "serial_number" => "sn1", "param_1" => "v1_2" }]),
        ]);
        let merged = merger(&[("plugin_2", 10), ("plugin_1", 20)])
            .merge("foo", &input, &groups(&[&["serial_number"]]))
            .unwrap();
        assert_eq!(
            merged,
            vec![record! {
                "serial_number" => "sn1",
                "param_1" => "v1_1",
                "param_2" => "v2_1",
                "param_db" => "only_db",
            }]
        );
    }

    fn full_sample() -> BySource {
        by_source(vec![
            (
                "database",
                vec![
                    record! { "serial_number" => "sn1", "param_1" => "value 1 0", "param_db" => "only in db" },
                    record! { "serial_number" => "sn5", "param_1" => "value 1 0", "param_2" => "value 2 0" },
                ],
            ),
            (
                "plugin_1",
                vec![
                    record! { "serial_number" => "sn1", "param_1" => "value 1 1", "param_2" => "value 2 1" },
                    record! { "device" => "dev_1", "index" => "1", "param_1" => "value 1 1", "param_2" => "value 2 1" },
                    record! { "device" => "dev_1", "index" => "2", "param_1" => "value 1 1", "param_2" => "value 2 1" },
                    record! { "serial_number" => "sn4", "device" => "dev_1", "index" => "3", "param_1" => "value 1 1", "param_2" => "value 2 1" },
                ],
            ),
            (
                "plugin_2",
                vec![
                    record! { "serial_number" => "sn1", "param_1" => "value 1 2", "param_2" => "value 2 2" },
                    record! { "serial_number" => "sn2", "param_1" => "value 1 2", "param_2" => "value 2 2" },
                    record! { "serial_number" => "sn3", "param_1" => "value 1 2", "param_2" => "value 2 2" },
                    record! { "serial_number" => "sn4", "param_1" => "value 1 2", "param_2" => "value 2 2", "param_3" => "value 3 2" },
                ],
            ),
            (
                "plugin_3",
                vec![
                    record! { "serial_number" => "sn1", "param_1" => "value 1 3", "param_2" => "value 2 3" },
                    record! { "param_1" => "value 1 3 1", "param_2" => "value 2 3 1" },
                    record! { "serial_number" => "sn3", "param_1" => "value 1 3", "param_2" => "value 2 3" },
                    record! { "device" => "dev_1", "index" => "1", "param_1" => "value 1 3", "param_2" => "value 2 3", "param_3" => "value 3 3" },
                ],
            ),
        ])
    }

    #[test]
    fn multi_probe_multi_group_merge() {
        let m = merger(&[("plugin_2", 10), ("plugin_3", 20), ("plugin_1", 30)]);
        let (merged, stats) = m
            .merge_with_stats("foo", &full_sample(), &groups(&[&["serial_number"], &["device", "index"]]))
            .unwrap();

        assert_eq!(
            merged,
            vec![
                record! { "serial_number" => "sn1", "param_1" => "value 1 1", "param_2" => "value 2 1", "param_db" => "only in db" },
                record! { "serial_number" => "sn5", "param_1" => "value 1 0", "param_2" => "value 2 0" },
                record! { "serial_number" => "sn2", "param_1" => "value 1 2", "param_2" => "value 2 2" },
                record! { "serial_number" => "sn3", "param_1" => "value 1 3", "param_2" => "value 2 3" },
                record! {
                    "serial_number" => "sn4", "device" => "dev_1", "index" => "3",
                    "param_1" => "value 1 1", "param_2" => "value 2 1", "param_3" => "value 3 2",
                },
                record! { "param_1" => "value 1 3 1", "param_2" => "value 2 3 1" },
                record! {
                    "device" => "dev_1", "index" => "1",
                    "param_1" => "value 1 1", "param_2" => "value 2 1", "param_3" => "value 3 3",
                },
                record! { "device" => "dev_1", "index" => "2", "param_1" => "value 1 1", "param_2" => "value 2 1" },
            ]
        );
        assert_eq!(stats.seeded, 2);
        assert_eq!(stats.unmatchable, 1);
        assert_eq!(stats.appended, 6);
        assert_eq!(stats.matched, 6);
    }

    #[test]
    fn no_groups_is_error() {
        let err = merger(&[]).merge("model_name", &BySource::new(), &[]).unwrap_err();
        assert_eq!(err, MergeError::NotRecordTable("model_name".into()));
    }

    #[test]
    fn empty_input_yields_empty_table() {
        let merged = merger(&[]).merge("foo", &BySource::new(), &groups(&[&["sn"]])).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn baseline_only_passes_through() {
        let input = by_source(vec![("database", vec![record! { "sn" => "a" }, record! { "x" => 1 }])]);
        let merged = merger(&[]).merge("foo", &input, &groups(&[&["sn"]])).unwrap();
        assert_eq!(merged, vec![record! { "sn" => "a" }, record! { "x" => 1 }]);
    }

    #[test]
    fn merged_source_is_ignored() {
        let input = by_source(vec![
            ("merged", vec![record! { "sn" => "stale" }]),
            ("probe", vec![record! { "sn" => "fresh" }]),
        ]);
        let merged = merger(&[]).merge("foo", &input, &groups(&[&["sn"]])).unwrap();
        assert_eq!(merged, vec![record! { "sn" => "fresh" }]);
    }

    #[test]
    fn non_table_facts_skipped() {
        let mut input = by_source(vec![("probe", vec![record! { "sn" => "a" }])]);
        input.insert("odd".into(), Facts::Scalar(Value::from("x")));
        input.insert("database".into(), Facts::List(vec![Value::from("y")]));
        let merged = merger(&[]).merge("foo", &input, &groups(&[&["sn"]])).unwrap();
        assert_eq!(merged, vec![record! { "sn" => "a" }]);
    }

    #[test]
    fn lookup_ignores_surrounding_whitespace() {
        let input = by_source(vec![
            ("database", vec![record! { "sn" => "abc", "size" => 1 }]),
            ("probe", vec![record! { "sn" => " abc ", "size" => 2 }]),
        ]);
        let merged = merger(&[]).merge("foo", &input, &groups(&[&["sn"]])).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged[0].get("size"), Some(&Value::Int(2)));
    }

    #[test]
    fn same_identity_twice_in_one_source_collapses() {
        // Rows of one source fold into the accumulated result too, so a
        // repeated identity overwrites the earlier row's fields.
        let by = by_source(vec![(
            "ssh_linux",
            vec![
                record! { "device" => "d", "index" => 0, "size" => 4096, "speed" => 1600 },
                record! { "device" => "d", "index" => 0, "size" => 8192 },
            ],
        )]);
        let (rows, stats) = merger(&[])
            .merge_with_stats("foo", &by, &groups(&[&["device", "index"]]))
            .unwrap();
        assert_eq!(
            rows,
            vec![record! { "device" => "d", "index" => 0, "size" => 8192, "speed" => 1600 }]
        );
        assert_eq!(stats.appended, 1);
        assert_eq!(stats.matched, 1);
    }

    #[test]
    fn input_not_mutated() {
        let input = full_sample();
        let before = input.clone();
        let _ = merger(&[]).merge("foo", &input, &groups(&[&["serial_number"]])).unwrap();
        assert_eq!(input, before);
    }

    proptest! {
        #[test]
        fn higher_quality_value_wins(low in 1i32..50, high in 51i32..100, a in "[a-z]{1,4}", b in "[a-z]{1,4}") {
            let input = by_source(vec![
                ("p_low", vec![record! { "sn" => "x", "f" => a.as_str() }]),
                ("p_high", vec![record! { "sn" => "x", "f" => b.as_str() }]),
            ]);
            let merged = merger(&[("p_low", low), ("p_high", high)])
                .merge("foo", &input, &groups(&[&["sn"]]))
                .unwrap();
            prop_assert_eq!(merged.len(), 1);
            prop_assert_eq!(merged[0].text("f"), Some(b.clone()));
        }

        #[test]
        fn baseline_only_fields_survive(db_value in "[a-z]{1,6}", probe_value in "[a-z]{1,6}") {
            let input = by_source(vec![
                ("database", vec![record! { "sn" => "x", "db_only" => db_value.as_str() }]),
                ("probe", vec![record! { "sn" => "x", "shared" => probe_value.as_str() }]),
            ]);
            let merged = merger(&[]).merge("foo", &input, &groups(&[&["sn"]])).unwrap();
            prop_assert_eq!(merged[0].text("db_only"), Some(db_value.clone()));
        }

        #[test]
        fn unmatchable_records_never_dropped(n in 0usize..8) {
            let rows: Vec<Record> = (0..n).map(|i| record! { "param" => i as i64 }).collect();
            let input = by_source(vec![("probe", rows)]);
            let merged = merger(&[]).merge("foo", &input, &groups(&[&["sn"]])).unwrap();
            prop_assert_eq!(merged.len(), n);
        }
    }
}
