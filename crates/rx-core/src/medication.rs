//! Medication catalog entries. Reference data only; never written by clients.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MedicationForm {
    Tablet,
    Capsule,
    Liquid,
    Injection,
    Cream,
    Inhaler,
}

impl MedicationForm {
    pub const ALL: [MedicationForm; 6] = [
        MedicationForm::Tablet,
        MedicationForm::Capsule,
        MedicationForm::Liquid,
        MedicationForm::Injection,
        MedicationForm::Cream,
        MedicationForm::Inhaler,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MedicationForm::Tablet => "tablet",
            MedicationForm::Capsule => "capsule",
            MedicationForm::Liquid => "liquid",
            MedicationForm::Injection => "injection",
            MedicationForm::Cream => "cream",
            MedicationForm::Inhaler => "inhaler",
        }
    }
}

impl fmt::Display for MedicationForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MedicationForm {
    type Err = crate::RxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|form| form.as_str() == s)
            .ok_or_else(|| crate::RxError::InvalidInput(format!("unknown medication form: {s}")))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generic_name: Option<String>,
    pub strength: String,
    pub form: MedicationForm,
    pub manufacturer: String,
    /// National Drug Code.
    pub ndc: String,
}

impl Medication {
    /// Name and strength as shown on a prescription, e.g. `Amoxicillin 500mg`.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.name, self.strength)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_parses_every_variant() {
        for form in MedicationForm::ALL {
            assert_eq!(form.as_str().parse::<MedicationForm>().unwrap(), form);
        }
        assert!("powder".parse::<MedicationForm>().is_err());
    }
}
