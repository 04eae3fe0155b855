//! Section forms for personal and income information

use super::field::{FieldKind, FormField};
use serde::{Deserialize, Serialize};

/// Employment status options as `(value, label)`
pub const EMPLOYMENT_OPTIONS: &[(&str, &str)] = &[
    ("employed-full", "Employed (Full-time)"),
    ("employed-part", "Employed (Part-time)"),
    ("self-employed", "Self-employed"),
    ("unemployed", "Unemployed"),
    ("retired", "Retired"),
    ("student", "Student"),
    ("other", "Other"),
];

/// Trait for common form operations
pub trait Form {
    fn fields(&self) -> Vec<&FormField>;
    fn field_at_mut(&mut self, index: usize) -> Option<&mut FormField>;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);

    fn field_count(&self) -> usize {
        self.fields().len()
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields().get(index).copied()
    }
    /// A form is complete iff every required field is non-blank
    fn is_complete(&self) -> bool {
        self.fields().iter().all(|f| f.is_satisfied())
    }
}

// Personal Info Form
#[derive(Debug, Clone)]
pub struct PersonalInfoForm {
    pub first_name: FormField,
    pub last_name: FormField,
    pub date_of_birth: FormField,
    pub email: FormField,
    pub zip_code: FormField,
    pub active_field_index: usize,
}

/// Personal details as persisted between steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub email: String,
    pub zip_code: String,
}

impl PersonalInfoForm {
    pub fn new() -> Self {
        Self {
            first_name: FormField::text("firstName", "First Name"),
            last_name: FormField::text("lastName", "Last Name"),
            date_of_birth: FormField::new(
                "dateOfBirth",
                "Date of Birth (YYYY-MM-DD)",
                FieldKind::Date,
                true,
            ),
            email: FormField::new("email", "Email", FieldKind::Email, true),
            zip_code: FormField::new("zipCode", "ZIP Code", FieldKind::Number, true),
            active_field_index: 0,
        }
    }

    pub fn to_record(&self) -> PersonalInfo {
        PersonalInfo {
            first_name: self.first_name.value.trim().to_string(),
            last_name: self.last_name.value.trim().to_string(),
            date_of_birth: self.date_of_birth.value.trim().to_string(),
            email: self.email.value.trim().to_string(),
            zip_code: self.zip_code.value.trim().to_string(),
        }
    }

    /// Greeting shown once the section is complete
    pub fn greeting(&self) -> Option<String> {
        if self.is_complete() {
            Some(format!("Great to meet you {}!", self.first_name.value.trim()))
        } else {
            None
        }
    }
}

impl Default for PersonalInfoForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for PersonalInfoForm {
    fn fields(&self) -> Vec<&FormField> {
        vec![
            &self.first_name,
            &self.last_name,
            &self.date_of_birth,
            &self.email,
            &self.zip_code,
        ]
    }
    fn field_at_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match index {
            0 => Some(&mut self.first_name),
            1 => Some(&mut self.last_name),
            2 => Some(&mut self.date_of_birth),
            3 => Some(&mut self.email),
            4 => Some(&mut self.zip_code),
            _ => None,
        }
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(4);
    }
}

// Income Info Form
#[derive(Debug, Clone)]
pub struct IncomeInfoForm {
    pub employment_status: FormField,
    pub monthly_income: FormField,
    pub household_size: FormField,
    pub other_income: FormField,
    pub other_income_source: FormField,
    pub active_field_index: usize,
}

/// Income details as persisted between steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeInfo {
    pub employment_status: String,
    pub monthly_income: String,
    pub household_size: String,
    pub other_income: String,
    pub other_income_source: String,
}

impl IncomeInfoForm {
    pub fn new() -> Self {
        Self {
            employment_status: FormField::new(
                "employmentStatus",
                "Employment Status",
                FieldKind::Choice(EMPLOYMENT_OPTIONS),
                true,
            ),
            monthly_income: FormField::new(
                "monthlyIncome",
                "Monthly Income ($)",
                FieldKind::Number,
                true,
            ),
            household_size: FormField::new(
                "householdSize",
                "Household Size",
                FieldKind::Number,
                true,
            ),
            other_income: FormField::new(
                "otherIncome",
                "Other Monthly Income ($)",
                FieldKind::Number,
                false,
            ),
            other_income_source: FormField::text("otherIncomeSource", "Source of Other Income")
                .optional(),
            active_field_index: 0,
        }
    }

    pub fn to_record(&self) -> IncomeInfo {
        IncomeInfo {
            employment_status: self.employment_status.value.clone(),
            monthly_income: self.monthly_income.value.trim().to_string(),
            household_size: self.household_size.value.trim().to_string(),
            other_income: self.other_income.value.trim().to_string(),
            other_income_source: self.other_income_source.value.trim().to_string(),
        }
    }
}

impl Default for IncomeInfoForm {
    fn default() -> Self {
        Self::new()
    }
}

impl Form for IncomeInfoForm {
    fn fields(&self) -> Vec<&FormField> {
        vec![
            &self.employment_status,
            &self.monthly_income,
            &self.household_size,
            &self.other_income,
            &self.other_income_source,
        ]
    }
    fn field_at_mut(&mut self, index: usize) -> Option<&mut FormField> {
        match index {
            0 => Some(&mut self.employment_status),
            1 => Some(&mut self.monthly_income),
            2 => Some(&mut self.household_size),
            3 => Some(&mut self.other_income),
            4 => Some(&mut self.other_income_source),
            _ => None,
        }
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(4);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    mod personal_info_form {
        use super::*;
        use pretty_assertions::assert_eq;

        fn fill(form: &mut PersonalInfoForm) {
            form.first_name.set_text("Ada");
            form.last_name.set_text("Lovelace");
            form.date_of_birth.set_text("1990-12-10");
            form.email.set_text("ada@example.com");
            form.zip_code.set_text("80202");
        }

        #[test]
        fn test_new_has_correct_defaults() {
            let form = PersonalInfoForm::new();
            assert_eq!(form.active_field_index, 0);
            assert_eq!(form.field_count(), 5);
            assert_eq!(form.get_field(0).unwrap().name, "firstName");
            assert_eq!(form.get_field(4).unwrap().name, "zipCode");
            assert!(form.get_field(5).is_none());
        }

        #[test]
        fn test_complete_iff_every_required_field_non_blank() {
            // Every subset of filled fields: complete only when all five are filled
            for mask in 0u32..32 {
                let mut form = PersonalInfoForm::new();
                for index in 0..5 {
                    let value = if mask & (1 << index) != 0 { "x" } else { "  " };
                    form.field_at_mut(index).unwrap().set_text(value);
                }
                assert_eq!(form.is_complete(), mask == 31, "mask {mask:05b}");
            }
        }

        #[test]
        fn test_greeting_only_when_complete() {
            let mut form = PersonalInfoForm::new();
            form.first_name.set_text("Ada");
            assert!(form.greeting().is_none());
            fill(&mut form);
            assert_eq!(form.greeting().as_deref(), Some("Great to meet you Ada!"));
        }

        #[test]
        fn test_to_record_trims_values() {
            let mut form = PersonalInfoForm::new();
            fill(&mut form);
            form.first_name.set_text("  Ada ");
            let record = form.to_record();
            assert_eq!(record.first_name, "Ada");
            assert_eq!(record.zip_code, "80202");
        }

        #[test]
        fn test_record_serializes_camel_case() {
            let mut form = PersonalInfoForm::new();
            fill(&mut form);
            let json = serde_json::to_value(form.to_record()).unwrap();
            assert_eq!(json["firstName"], "Ada");
            assert_eq!(json["dateOfBirth"], "1990-12-10");
        }

        #[test]
        fn test_set_active_field_clamps() {
            let mut form = PersonalInfoForm::new();
            form.set_active_field(100);
            assert_eq!(form.active_field_index, 4);
        }
    }

    mod income_info_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_required_fields_only() {
            let mut form = IncomeInfoForm::new();
            assert!(!form.is_complete());
            form.employment_status.cycle_choice(true);
            form.monthly_income.set_text("1200");
            assert!(!form.is_complete());
            form.household_size.set_text("3");
            assert!(form.is_complete());
        }

        #[test]
        fn test_optional_fields_do_not_block() {
            let form = IncomeInfoForm::new();
            assert!(!form.other_income.required);
            assert!(!form.other_income_source.required);
        }

        #[test]
        fn test_employment_status_starts_unselected() {
            let mut form = IncomeInfoForm::new();
            assert!(form.employment_status.is_blank());
            form.employment_status.cycle_choice(true);
            assert_eq!(form.to_record().employment_status, "employed-full");
        }

        #[test]
        fn test_active_field_follows_index() {
            let mut form = IncomeInfoForm::new();
            form.set_active_field(2);
            let active = form.get_field(form.active_field()).unwrap();
            assert_eq!(active.name, "householdSize");
        }
    }
}
