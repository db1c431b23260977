use crate::error::AnalyticsError;
use crate::report::{
    CountrySalary, DashboardReport, HistogramBin, KpiBundle, RemoteModeCount, RoleSalary,
    YearSalary,
};
use core_types::{Dimension, FilterSelection, SalaryRecord};
use rust_decimal::Decimal;
use rust_decimal::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

/// A stateless calculator for deriving dashboard metrics from salary records.
///
/// Every operation is a pure, synchronous function of its inputs: the raw
/// dataset is never mutated, and filtering copies the matching records into a
/// fresh view so repeated filter changes can reuse the same raw table.
#[derive(Debug, Default)]
pub struct DashboardEngine {}

/// Tunable parameters for one report pass.
///
/// The defaults reproduce the dashboard's stock charts: ten top roles, a
/// thirty-bin histogram, and a choropleth restricted to data scientists.
#[derive(Debug, Clone)]
pub struct ReportParams {
    pub top_roles: usize,
    pub histogram_bins: usize,
    pub choropleth_role: String,
}

impl Default for ReportParams {
    fn default() -> Self {
        Self {
            top_roles: 10,
            histogram_bins: 30,
            choropleth_role: "Data Scientist".to_string(),
        }
    }
}

impl DashboardEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sorted, duplicate-free values a dimension takes across
    /// the dataset. Used to populate filter widgets and to build the
    /// fully-inclusive default selection.
    pub fn available_values(&self, records: &[SalaryRecord], dimension: Dimension) -> Vec<String> {
        match dimension {
            // Years sort numerically before being rendered as strings.
            Dimension::Year => {
                let years: BTreeSet<i32> = records.iter().map(|r| r.year).collect();
                years.into_iter().map(|year| year.to_string()).collect()
            }
            _ => {
                let values: BTreeSet<String> =
                    records.iter().map(|r| dimension.extract(r)).collect();
                values.into_iter().collect()
            }
        }
    }

    /// Returns exactly the records whose four dimension values are each
    /// members of the corresponding selection set, in original relative
    /// order. An empty set in any dimension yields an empty view.
    pub fn apply_filters(
        &self,
        records: &[SalaryRecord],
        selection: &FilterSelection,
    ) -> Vec<SalaryRecord> {
        records
            .iter()
            .filter(|record| selection.matches(record))
            .cloned()
            .collect()
    }

    /// Computes the scalar KPI bundle over a filtered view.
    ///
    /// An empty view returns the zeroed bundle rather than an error. Among
    /// roles sharing the maximum occurrence count, the lexically smallest
    /// wins.
    pub fn compute_kpis(&self, view: &[SalaryRecord]) -> KpiBundle {
        let mut bundle = KpiBundle::new();
        if view.is_empty() {
            return bundle;
        }

        let mut total = Decimal::ZERO;
        let mut max = view[0].salary_usd;
        let mut min = view[0].salary_usd;
        let mut role_counts: BTreeMap<&str, usize> = BTreeMap::new();

        for record in view {
            total += record.salary_usd;
            max = max.max(record.salary_usd);
            min = min.min(record.salary_usd);
            *role_counts.entry(record.role.as_str()).or_insert(0) += 1;
        }

        bundle.record_count = view.len();
        bundle.mean_salary = total / Decimal::from(view.len());
        bundle.max_salary = max;
        bundle.min_salary = min;

        // BTreeMap iterates roles in ascending order, so keeping only a
        // strictly greater count leaves the lexically smallest role on ties.
        let mut best: Option<(&str, usize)> = None;
        for (role, count) in role_counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((role, count));
            }
        }
        bundle.top_role = best.map(|(role, _)| role.to_string()).unwrap_or_default();

        bundle
    }

    /// The `n` roles with the largest mean salary, re-sorted ascending by
    /// mean so a horizontal bar chart draws the largest at the top.
    ///
    /// Fewer than `n` distinct roles returns all of them; an empty view
    /// returns an empty sequence.
    pub fn top_roles_by_salary(&self, view: &[SalaryRecord], n: usize) -> Vec<RoleSalary> {
        let mut rows: Vec<RoleSalary> = group_mean(view, |r| r.role.clone())
            .into_iter()
            .map(|(role, mean_salary)| RoleSalary { role, mean_salary })
            .collect();

        // Select the n largest, with the role name as a deterministic
        // secondary key on mean-salary ties.
        rows.sort_by(|a, b| {
            b.mean_salary
                .cmp(&a.mean_salary)
                .then_with(|| a.role.cmp(&b.role))
        });
        rows.truncate(n);
        rows.sort_by(|a, b| {
            a.mean_salary
                .cmp(&b.mean_salary)
                .then_with(|| a.role.cmp(&b.role))
        });
        rows
    }

    /// Partitions the view's salary range into `bins` equal-width intervals
    /// and counts records per interval, zero-count bins included.
    ///
    /// The top edge is inclusive: records at the maximum land in the last
    /// bin. A single-valued range collapses to one bin holding every record.
    /// An empty view yields an empty sequence.
    pub fn salary_histogram(
        &self,
        view: &[SalaryRecord],
        bins: usize,
    ) -> Result<Vec<HistogramBin>, AnalyticsError> {
        if bins == 0 {
            return Err(AnalyticsError::InvalidParameter(
                "histogram bin count must be at least 1".to_string(),
            ));
        }
        if view.is_empty() {
            return Ok(Vec::new());
        }

        let mut min = view[0].salary_usd;
        let mut max = view[0].salary_usd;
        for record in view {
            min = min.min(record.salary_usd);
            max = max.max(record.salary_usd);
        }

        if min == max {
            return Ok(vec![HistogramBin {
                lower: min,
                upper: max,
                count: view.len(),
            }]);
        }

        let width = (max - min) / Decimal::from(bins);
        let mut counts = vec![0usize; bins];
        for record in view {
            let offset = (record.salary_usd - min) / width;
            let index = offset.to_usize().ok_or_else(|| {
                AnalyticsError::InternalError(format!(
                    "failed to place salary {} into a histogram bin",
                    record.salary_usd
                ))
            })?;
            counts[index.min(bins - 1)] += 1;
        }

        Ok(counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: min + width * Decimal::from(i),
                upper: if i + 1 == bins {
                    max
                } else {
                    min + width * Decimal::from(i + 1)
                },
                count,
            })
            .collect())
    }

    /// Mean salary per distinct year present in the view, ascending by year.
    pub fn salary_by_year(&self, view: &[SalaryRecord]) -> Vec<YearSalary> {
        group_mean(view, |r| r.year)
            .into_iter()
            .map(|(year, mean_salary)| YearSalary { year, mean_salary })
            .collect()
    }

    /// Record count per remote-work mode. Order is not semantically
    /// significant but is emitted lexically for determinism.
    pub fn remote_mode_distribution(&self, view: &[SalaryRecord]) -> Vec<RemoteModeCount> {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();
        for record in view {
            *counts.entry(record.remote.clone()).or_insert(0) += 1;
        }
        counts
            .into_iter()
            .map(|(mode, count)| RemoteModeCount { mode, count })
            .collect()
    }

    /// Mean salary per employer country (alpha-3) for records matching
    /// `role`.
    ///
    /// Records whose alpha-2 code has no ISO mapping cannot be located on a
    /// choropleth and are dropped before grouping.
    pub fn country_salary_by_role(&self, view: &[SalaryRecord], role: &str) -> Vec<CountrySalary> {
        let mut groups: BTreeMap<String, (Decimal, usize)> = BTreeMap::new();
        for record in view.iter().filter(|r| r.role == role) {
            match countries::alpha2_to_alpha3(&record.company_location) {
                Some(alpha3) => {
                    let entry = groups
                        .entry(alpha3.to_string())
                        .or_insert((Decimal::ZERO, 0));
                    entry.0 += record.salary_usd;
                    entry.1 += 1;
                }
                None => {
                    tracing::debug!(
                        code = %record.company_location,
                        "dropping record with unmappable country code"
                    );
                }
            }
        }
        groups
            .into_iter()
            .map(|(country, (sum, count))| CountrySalary {
                country,
                mean_salary: sum / Decimal::from(count),
            })
            .collect()
    }

    /// The main entry point for one dashboard render pass.
    ///
    /// # Arguments
    ///
    /// * `view` - The already-filtered records (see [`Self::apply_filters`]).
    /// * `params` - Chart parameters, typically from the configuration layer.
    ///
    /// # Returns
    ///
    /// A `Result` containing the `DashboardReport` or an `AnalyticsError`.
    pub fn build_report(
        &self,
        view: &[SalaryRecord],
        params: &ReportParams,
    ) -> Result<DashboardReport, AnalyticsError> {
        let mut report = DashboardReport::new();
        report.kpis = self.compute_kpis(view);
        report.top_roles = self.top_roles_by_salary(view, params.top_roles);
        report.salary_histogram = self.salary_histogram(view, params.histogram_bins)?;
        report.salary_by_year = self.salary_by_year(view);
        report.remote_modes = self.remote_mode_distribution(view);
        report.country_salaries = self.country_salary_by_role(view, &params.choropleth_role);
        Ok(report)
    }
}

/// A helper function to compute the mean salary per group of records.
fn group_mean<K, F>(view: &[SalaryRecord], key: F) -> BTreeMap<K, Decimal>
where
    K: Ord,
    F: Fn(&SalaryRecord) -> K,
{
    let mut groups: BTreeMap<K, (Decimal, usize)> = BTreeMap::new();
    for record in view {
        let entry = groups.entry(key(record)).or_insert((Decimal::ZERO, 0));
        entry.0 += record.salary_usd;
        entry.1 += 1;
    }
    groups
        .into_iter()
        .map(|(key, (sum, count))| (key, sum / Decimal::from(count)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn record(
        year: i32,
        seniority: &str,
        role: &str,
        country: &str,
        remote: &str,
        salary: Decimal,
    ) -> SalaryRecord {
        SalaryRecord {
            year,
            seniority: seniority.to_string(),
            contract: "CLT".to_string(),
            company_size: if seniority == "senior" { "large" } else { "small" }.to_string(),
            role: role.to_string(),
            company_location: country.to_string(),
            remote: remote.to_string(),
            salary_usd: salary,
        }
    }

    fn sample_dataset() -> Vec<SalaryRecord> {
        vec![
            record(2023, "junior", "Data Scientist", "US", "remote", dec!(90000)),
            record(2023, "senior", "Data Scientist", "US", "hybrid", dec!(150000)),
            record(2022, "junior", "Data Analyst", "BR", "remote", dec!(45000)),
            record(2022, "senior", "Data Engineer", "DE", "on-site", dec!(110000)),
        ]
    }

    #[test]
    fn full_selection_returns_entire_dataset_in_order() {
        let engine = DashboardEngine::new();
        let records = sample_dataset();
        let selection = FilterSelection::all(&records);
        let view = engine.apply_filters(&records, &selection);
        assert_eq!(view, records);
    }

    #[test]
    fn filtered_view_is_subset_satisfying_all_predicates() {
        let engine = DashboardEngine::new();
        let records = sample_dataset();
        let mut selection = FilterSelection::all(&records);
        selection.years.remove(&2022);
        selection.seniorities.remove("junior");

        let view = engine.apply_filters(&records, &selection);
        assert!(view.len() <= records.len());
        for record in &view {
            assert!(selection.matches(record));
        }
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].salary_usd, dec!(150000));
    }

    #[test]
    fn empty_set_in_one_dimension_yields_empty_view() {
        let engine = DashboardEngine::new();
        let records = sample_dataset();
        let mut selection = FilterSelection::all(&records);
        selection.contracts.clear();
        assert!(engine.apply_filters(&records, &selection).is_empty());
    }

    #[test]
    fn available_values_are_sorted_and_distinct() {
        let engine = DashboardEngine::new();
        let records = sample_dataset();
        assert_eq!(
            engine.available_values(&records, Dimension::Year),
            vec!["2022", "2023"]
        );
        assert_eq!(
            engine.available_values(&records, Dimension::Seniority),
            vec!["junior", "senior"]
        );
        assert!(engine.available_values(&[], Dimension::Contract).is_empty());
    }

    #[test]
    fn kpis_on_empty_view_are_the_degenerate_bundle() {
        let engine = DashboardEngine::new();
        let bundle = engine.compute_kpis(&[]);
        assert_eq!(bundle.mean_salary, Decimal::ZERO);
        assert_eq!(bundle.max_salary, Decimal::ZERO);
        assert_eq!(bundle.min_salary, Decimal::ZERO);
        assert_eq!(bundle.record_count, 0);
        assert_eq!(bundle.top_role, "");
    }

    #[test]
    fn kpis_on_uniform_salaries() {
        let engine = DashboardEngine::new();
        let view = vec![
            record(2023, "junior", "Data Analyst", "US", "remote", dec!(1000)),
            record(2023, "senior", "Data Analyst", "US", "remote", dec!(1000)),
            record(2022, "junior", "Data Analyst", "BR", "hybrid", dec!(1000)),
        ];
        let bundle = engine.compute_kpis(&view);
        assert_eq!(bundle.mean_salary, dec!(1000));
        assert_eq!(bundle.max_salary, dec!(1000));
        assert_eq!(bundle.min_salary, dec!(1000));
        assert_eq!(bundle.record_count, 3);
        assert_eq!(bundle.top_role, "Data Analyst");
    }

    #[test]
    fn top_role_ties_break_to_lexically_smallest() {
        let engine = DashboardEngine::new();
        // Two roles with the same count, inserted largest-name first.
        let view = vec![
            record(2023, "junior", "ML Engineer", "US", "remote", dec!(100)),
            record(2023, "junior", "Data Analyst", "US", "remote", dec!(100)),
            record(2023, "senior", "ML Engineer", "US", "remote", dec!(100)),
            record(2023, "senior", "Data Analyst", "US", "remote", dec!(100)),
        ];
        assert_eq!(engine.compute_kpis(&view).top_role, "Data Analyst");
    }

    #[test]
    fn top_roles_is_bounded_and_non_decreasing() {
        let engine = DashboardEngine::new();
        let view: Vec<SalaryRecord> = (0..15)
            .map(|i| {
                record(
                    2023,
                    "senior",
                    &format!("Role {i:02}"),
                    "US",
                    "remote",
                    Decimal::from(50_000 + i * 10_000),
                )
            })
            .collect();

        let top = engine.top_roles_by_salary(&view, 10);
        assert_eq!(top.len(), 10);
        for pair in top.windows(2) {
            assert!(pair[0].mean_salary <= pair[1].mean_salary);
        }
        // The five smallest means were cut.
        assert_eq!(top[0].role, "Role 05");
        assert_eq!(top[9].role, "Role 14");
    }

    #[test]
    fn top_roles_with_fewer_distinct_roles_returns_all() {
        let engine = DashboardEngine::new();
        let view = vec![
            record(2023, "junior", "Data Analyst", "US", "remote", dec!(45000)),
            record(2023, "senior", "Data Scientist", "US", "remote", dec!(150000)),
        ];
        let top = engine.top_roles_by_salary(&view, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].role, "Data Analyst");
        assert_eq!(top[1].role, "Data Scientist");
        assert!(engine.top_roles_by_salary(&[], 10).is_empty());
    }

    #[test]
    fn histogram_partitions_the_range_with_inclusive_top_edge() {
        let engine = DashboardEngine::new();
        let view: Vec<SalaryRecord> = [dec!(0), dec!(10), dec!(20), dec!(30)]
            .into_iter()
            .map(|s| record(2023, "junior", "Data Analyst", "US", "remote", s))
            .collect();

        let bins = engine.salary_histogram(&view, 3).unwrap();
        assert_eq!(bins.len(), 3);
        assert_eq!(bins[0].lower, dec!(0));
        assert_eq!(bins[2].upper, dec!(30));
        // The record at the maximum lands in the last bin.
        let counts: Vec<usize> = bins.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![1, 1, 2]);
        assert_eq!(counts.iter().sum::<usize>(), view.len());
    }

    #[test]
    fn histogram_single_valued_range_collapses_to_one_bin() {
        let engine = DashboardEngine::new();
        let view = vec![
            record(2023, "junior", "Data Analyst", "US", "remote", dec!(1000)),
            record(2023, "senior", "Data Analyst", "US", "remote", dec!(1000)),
        ];
        let bins = engine.salary_histogram(&view, 30).unwrap();
        assert_eq!(bins.len(), 1);
        assert_eq!(bins[0].lower, dec!(1000));
        assert_eq!(bins[0].upper, dec!(1000));
        assert_eq!(bins[0].count, 2);
    }

    #[test]
    fn histogram_rejects_zero_bins_and_allows_empty_view() {
        let engine = DashboardEngine::new();
        assert!(matches!(
            engine.salary_histogram(&sample_dataset(), 0),
            Err(AnalyticsError::InvalidParameter(_))
        ));
        assert!(engine.salary_histogram(&[], 30).unwrap().is_empty());
    }

    #[test]
    fn salary_by_year_is_distinct_and_ascending() {
        let engine = DashboardEngine::new();
        let records = sample_dataset();
        let by_year = engine.salary_by_year(&records);

        let years: Vec<i32> = by_year.iter().map(|row| row.year).collect();
        assert_eq!(years, vec![2022, 2023]);
        assert_eq!(by_year[0].mean_salary, dec!(77500));
        assert_eq!(by_year[1].mean_salary, dec!(120000));
    }

    #[test]
    fn remote_mode_distribution_counts_every_record() {
        let engine = DashboardEngine::new();
        let records = sample_dataset();
        let modes = engine.remote_mode_distribution(&records);
        assert_eq!(modes.len(), 3);
        assert_eq!(modes.iter().map(|m| m.count).sum::<usize>(), records.len());
        let remote = modes.iter().find(|m| m.mode == "remote").unwrap();
        assert_eq!(remote.count, 2);
    }

    #[test]
    fn country_salary_drops_unmappable_codes() {
        let engine = DashboardEngine::new();
        let view = vec![
            record(2023, "senior", "Data Scientist", "US", "remote", dec!(150000)),
            record(2023, "senior", "Data Scientist", "XX", "remote", dec!(999999)),
            record(2023, "senior", "Data Engineer", "US", "remote", dec!(130000)),
        ];
        let by_country = engine.country_salary_by_role(&view, "Data Scientist");
        assert_eq!(by_country.len(), 1);
        assert_eq!(by_country[0].country, "USA");
        assert_eq!(by_country[0].mean_salary, dec!(150000));
    }

    // The end-to-end scenario: two records, filter to seniors, check every
    // downstream number.
    #[test]
    fn senior_filter_scenario() {
        let engine = DashboardEngine::new();
        let records = vec![
            record(2023, "junior", "Data Scientist", "US", "remote", dec!(90000)),
            record(2023, "senior", "Data Scientist", "US", "hybrid", dec!(150000)),
        ];

        let mut selection = FilterSelection::all(&records);
        selection.seniorities = ["senior".to_string()].into_iter().collect();
        let view = engine.apply_filters(&records, &selection);
        assert_eq!(view.len(), 1);

        let kpis = engine.compute_kpis(&view);
        assert_eq!(kpis.mean_salary, dec!(150000));
        assert_eq!(kpis.max_salary, dec!(150000));
        assert_eq!(kpis.min_salary, dec!(150000));
        assert_eq!(kpis.record_count, 1);
        assert_eq!(kpis.top_role, "Data Scientist");

        let by_country = engine.country_salary_by_role(&view, "Data Scientist");
        assert_eq!(by_country.len(), 1);
        assert_eq!(by_country[0].country, "USA");
        assert_eq!(by_country[0].mean_salary, dec!(150000));
    }

    #[test]
    fn build_report_composes_all_tables() {
        let engine = DashboardEngine::new();
        let records = sample_dataset();
        let report = engine
            .build_report(&records, &ReportParams::default())
            .unwrap();

        assert_eq!(report.kpis.record_count, records.len());
        assert_eq!(report.top_roles.len(), 3);
        assert!(!report.salary_histogram.is_empty());
        assert_eq!(report.salary_by_year.len(), 2);
        assert_eq!(report.remote_modes.len(), 3);
        assert_eq!(report.country_salaries.len(), 1);

        let empty = engine.build_report(&[], &ReportParams::default()).unwrap();
        assert_eq!(empty.kpis, KpiBundle::new());
        assert!(empty.top_roles.is_empty());
        assert!(empty.salary_histogram.is_empty());
    }
}
