use crate::structs::SalaryRecord;

/// The four dimensions a dataset can be filtered on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Year,
    Seniority,
    Contract,
    CompanySize,
}

impl Dimension {
    /// All filterable dimensions, in the order filter widgets present them.
    pub const ALL: [Dimension; 4] = [
        Dimension::Year,
        Dimension::Seniority,
        Dimension::Contract,
        Dimension::CompanySize,
    ];

    /// Returns the human-readable label for this dimension.
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Year => "year",
            Dimension::Seniority => "seniority",
            Dimension::Contract => "contract",
            Dimension::CompanySize => "company size",
        }
    }

    /// Extracts a record's value for this dimension as a display string.
    pub fn extract(&self, record: &SalaryRecord) -> String {
        match self {
            Dimension::Year => record.year.to_string(),
            Dimension::Seniority => record.seniority.clone(),
            Dimension::Contract => record.contract.clone(),
            Dimension::CompanySize => record.company_size.clone(),
        }
    }
}
