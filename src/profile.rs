use serde::{Deserialize, Serialize};

/// Seller identity printed in the invoice header. Process-wide defaults
/// exist, but every request works on its own copy: overrides are applied
/// by constructing a new value, never by mutating shared state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyProfile {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub email: String,
    /// Taxpayer identification number, printed as boxed digits.
    pub tax_id: String,
}

impl Default for CompanyProfile {
    fn default() -> Self {
        CompanyProfile {
            name: "SUNRISE TRADERS".to_string(),
            address: "Baneshwor-10, Kathmandu".to_string(),
            phone: "+977 9800000000".to_string(),
            email: "info@sunrisetraders.com.np".to_string(),
            tax_id: "601234567".to_string(),
        }
    }
}

/// Per-request overrides from the upload form. All fields optional;
/// absent fields keep the default.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileOverrides {
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub tax_id: Option<String>,
}

impl CompanyProfile {
    /// Request-scoped profile: defaults with the given overrides applied.
    pub fn with(overrides: ProfileOverrides) -> Self {
        let mut profile = CompanyProfile::default();
        if let Some(name) = overrides.name {
            profile.name = name;
        }
        if let Some(address) = overrides.address {
            profile.address = address;
        }
        if let Some(phone) = overrides.phone {
            profile.phone = phone;
        }
        if let Some(email) = overrides.email {
            profile.email = email;
        }
        if let Some(tax_id) = overrides.tax_id {
            profile.tax_id = tax_id;
        }
        profile
    }
}
