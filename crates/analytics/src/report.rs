use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The scalar summary statistics shown at the top of the dashboard.
///
/// Defined only over the filtered view. An empty view yields the zeroed
/// bundle with an empty `top_role` — a defined degenerate value, not an
/// error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiBundle {
    pub mean_salary: Decimal,
    pub max_salary: Decimal,
    pub min_salary: Decimal,
    pub record_count: usize,
    /// The most frequent role in the view. Ties are broken towards the
    /// lexically smallest role so the result never depends on input order.
    pub top_role: String,
}

impl KpiBundle {
    /// Creates a new, zeroed-out KpiBundle.
    /// This is also the defined result for an empty filtered view.
    pub fn new() -> Self {
        Self {
            mean_salary: Decimal::ZERO,
            max_salary: Decimal::ZERO,
            min_salary: Decimal::ZERO,
            record_count: 0,
            top_role: String::new(),
        }
    }
}

impl Default for KpiBundle {
    fn default() -> Self {
        Self::new()
    }
}

/// One row of the top-roles bar chart: a role and its mean salary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleSalary {
    pub role: String,
    pub mean_salary: Decimal,
}

/// One equal-width interval of the salary histogram.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    pub lower: Decimal,
    pub upper: Decimal,
    pub count: usize,
}

/// One point of the salary-over-time line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearSalary {
    pub year: i32,
    pub mean_salary: Decimal,
}

/// One slice of the remote-work-mode proportion chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteModeCount {
    pub mode: String,
    pub count: usize,
}

/// One country of the choropleth: alpha-3 code and mean salary for the
/// selected role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountrySalary {
    pub country: String,
    pub mean_salary: Decimal,
}

/// The complete output of one dashboard render pass.
///
/// This struct is the final output of the `DashboardEngine` and serves as the
/// data transfer object between the engine and whatever presentation layer
/// renders it (terminal tables, JSON, a web page).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub kpis: KpiBundle,
    /// Top roles by mean salary, ascending, so a horizontal bar chart draws
    /// the largest at the top.
    pub top_roles: Vec<RoleSalary>,
    pub salary_histogram: Vec<HistogramBin>,
    pub salary_by_year: Vec<YearSalary>,
    pub remote_modes: Vec<RemoteModeCount>,
    pub country_salaries: Vec<CountrySalary>,
}

impl DashboardReport {
    /// Creates a new, empty DashboardReport.
    /// This is useful as a default or starting point before calculations.
    pub fn new() -> Self {
        Self {
            kpis: KpiBundle::new(),
            top_roles: Vec::new(),
            salary_histogram: Vec::new(),
            salary_by_year: Vec::new(),
            remote_modes: Vec::new(),
            country_salaries: Vec::new(),
        }
    }
}

impl Default for DashboardReport {
    fn default() -> Self {
        Self::new()
    }
}
