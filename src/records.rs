use std::iter::FromIterator;

use hashbrown::HashMap;

/// Column key that holds the donation amount, by convention of the CSV
/// files this tool receives. Present in the header or not, nothing is
/// enforced
pub const DONATION_AMOUNT_KEY: &str = "donation_amount";

/// Column key that holds the donor name. An empty or missing value marks
/// the donation as anonymous
pub const DONOR_NAME_KEY: &str = "donor_name";

/// Represents one donation parsed from a CSV data line
///
/// Fields are raw strings keyed by the CSV column keys; the schema is
/// whatever the header declared, so any field may be missing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DonationRecord {
    fields: HashMap<String, String>,
}

impl DonationRecord {
    pub fn new() -> Self {
        Self {
            fields: HashMap::new(),
        }
    }

    /// Value stored under a column key, if the record has one
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(|value| value.as_str())
    }

    /// Insert or replace the value under a column key
    pub fn set(&mut self, key: &str, value: &str) {
        self.fields.insert(key.to_string(), value.to_string());
    }

    /// Number of fields this record carries
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The donation amount as a float
    /// A missing key or a value that does not parse as a whole yields NaN,
    /// which is what the aggregate functions expect to propagate
    pub fn amount(&self) -> f64 {
        self.get(DONATION_AMOUNT_KEY)
            .map_or(f64::NAN, |value| value.parse().unwrap_or(f64::NAN))
    }

    /// A donation is anonymous when the donor name is missing or empty
    pub fn is_anonymous(&self) -> bool {
        self.get(DONOR_NAME_KEY).map_or(true, str::is_empty)
    }
}

impl FromIterator<(String, String)> for DonationRecord {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}
