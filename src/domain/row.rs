//! Input rows and the key that groups them

use serde::Deserialize;

/// One line item read from the CSV export
///
/// Column names map 1:1 to fields. Missing columns deserialize as empty
/// strings so a sparse export still loads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Row {
    pub name: String,

    /// Subject type, named `type` in the export
    #[serde(rename = "type")]
    pub kind: String,

    pub national_code: String,
    pub mobile: String,
    pub price: String,
    pub test_count: String,
    pub date: String,
    pub discount: String,
    pub test_code: String,
    pub name_rabet_company: String,
    pub family_rabet_company: String,
    pub tariffs_basis: String,

    /// Spreadsheet row number this record came from
    #[serde(skip)]
    pub row_id: u64,
}

impl Row {
    /// Builds the identity key shared by all line items of one subject
    pub fn group_key(&self) -> GroupKey {
        GroupKey {
            kind: self.kind.clone(),
            national_code: self.national_code.clone(),
            name: self.name.clone(),
            mobile: self.mobile.clone(),
            name_rabet_company: self.name_rabet_company.clone(),
            family_rabet_company: self.family_rabet_company.clone(),
        }
    }
}

/// Composite identity of one submission subject
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub kind: String,
    pub national_code: String,
    pub name: String,
    pub mobile: String,
    pub name_rabet_company: String,
    pub family_rabet_company: String,
}

impl GroupKey {
    /// Shared fields as they appear in the request form, in request order
    pub fn form_fields(&self) -> [(&'static str, &str); 6] {
        [
            ("type", self.kind.as_str()),
            ("national_code", self.national_code.as_str()),
            ("name", self.name.as_str()),
            ("mobile", self.mobile.as_str()),
            ("name_rabet_company", self.name_rabet_company.as_str()),
            ("family_rabet_company", self.family_rabet_company.as_str()),
        ]
    }
}
