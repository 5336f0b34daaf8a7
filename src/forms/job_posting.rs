//! Employer job posting form.
//!
//! Type and category are held as raw text so that a value outside the
//! enumerations can be represented and rejected by [`JobPostingForm::validate`];
//! the editor only ever cycles through valid values.

use super::{char_len, FieldKind, FieldSpec, FormModel, ValidationErrors};
use crate::domain::{Category, JobType};

/// Fields of the job posting form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobPostingField {
    Name,
    JobType,
    Category,
    Location,
    Description,
    SalaryRange,
    CompanyName,
    IsAvailable,
    Image,
}

impl JobPostingField {
    pub const ALL: [Self; 9] = [
        Self::Name,
        Self::JobType,
        Self::Category,
        Self::Location,
        Self::Description,
        Self::SalaryRange,
        Self::CompanyName,
        Self::IsAvailable,
        Self::Image,
    ];

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        FIELDS[self as usize].key
    }
}

const FIELDS: [FieldSpec; 9] = [
    FieldSpec { key: "name", label: "Job name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "type", label: "Job type", kind: FieldKind::Choice, required: true },
    FieldSpec { key: "category", label: "Category", kind: FieldKind::Choice, required: true },
    FieldSpec { key: "location", label: "Location", kind: FieldKind::Text, required: true },
    FieldSpec { key: "description", label: "Description", kind: FieldKind::Multiline, required: true },
    FieldSpec { key: "salaryRange", label: "Salary range", kind: FieldKind::Text, required: true },
    FieldSpec { key: "companyName", label: "Company name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "isAvailable", label: "Available", kind: FieldKind::Toggle, required: false },
    FieldSpec { key: "image", label: "Image file", kind: FieldKind::Path, required: false },
];

/// Editable state of the job posting form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobPostingForm {
    pub name: String,
    pub job_type: String,
    pub category: String,
    pub location: String,
    pub description: String,
    pub salary_range: String,
    pub company_name: String,
    pub is_available: bool,
    /// Optional local path of a company image.
    pub image_path: String,
}

impl Default for JobPostingForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            job_type: JobType::FullTime.as_str().to_string(),
            category: Category::Technology.as_str().to_string(),
            location: String::new(),
            description: String::new(),
            salary_range: String::new(),
            company_name: String::new(),
            is_available: true,
            image_path: String::new(),
        }
    }
}

/// A job posting that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidJobPosting {
    pub name: String,
    pub job_type: JobType,
    pub category: Category,
    pub location: String,
    pub description: String,
    pub salary_range: String,
    pub company_name: String,
    pub is_available: bool,
    pub image_path: Option<String>,
}

impl ValidJobPosting {
    /// Text parts of the `create-job` multipart body.
    ///
    /// `posted_by` is the server id of the submitting user.
    #[must_use]
    pub fn form_fields(&self, posted_by: &str) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("type", self.job_type.as_str().to_string()),
            ("category", self.category.as_str().to_string()),
            ("location", self.location.clone()),
            ("description", self.description.clone()),
            ("salaryRange", self.salary_range.clone()),
            ("isAvailable", self.is_available.to_string()),
            ("companyName", self.company_name.clone()),
            ("postedBy", posted_by.to_string()),
        ]
    }
}

impl JobPostingForm {
    /// Validates every field and collects all violations.
    ///
    /// Lengths are counted in characters and values are not trimmed.
    ///
    /// # Errors
    ///
    /// Returns every violated rule, in field order.
    pub fn validate(&self) -> Result<ValidJobPosting, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if char_len(&self.name) < 3 {
            errors.push("name", "Job name must be at least 3 characters long");
        }
        let job_type = JobType::parse(&self.job_type);
        if job_type.is_none() {
            errors.push("type", "Invalid job type");
        }
        let category = Category::parse(&self.category);
        if category.is_none() {
            errors.push("category", "Invalid category");
        }
        if char_len(&self.location) < 3 {
            errors.push("location", "Location must be at least 3 characters long");
        }
        if char_len(&self.description) < 10 {
            errors.push("description", "Description must be at least 10 characters long");
        }
        if !is_salary_range(&self.salary_range) {
            errors.push("salaryRange", "Salary range must be in the format \"min-max\"");
        }
        if char_len(&self.company_name) < 3 {
            errors.push("companyName", "Company name must be at least 3 characters long");
        }

        match (job_type, category) {
            (Some(job_type), Some(category)) if errors.is_empty() => Ok(ValidJobPosting {
                name: self.name.clone(),
                job_type,
                category,
                location: self.location.clone(),
                description: self.description.clone(),
                salary_range: self.salary_range.clone(),
                company_name: self.company_name.clone(),
                is_available: self.is_available,
                image_path: Some(self.image_path.trim())
                    .filter(|p| !p.is_empty())
                    .map(ToString::to_string),
            }),
            _ => Err(errors),
        }
    }
}

/// Matches `<digits>-<digits>` with ASCII digits and nothing else.
fn is_salary_range(value: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    value
        .split_once('-')
        .is_some_and(|(min, max)| all_digits(min) && all_digits(max))
}

impl FormModel for JobPostingForm {
    fn fields(&self) -> &'static [FieldSpec] {
        &FIELDS
    }

    fn value(&self, index: usize) -> String {
        match JobPostingField::from_index(index) {
            Some(JobPostingField::Name) => self.name.clone(),
            Some(JobPostingField::JobType) => self.job_type.clone(),
            Some(JobPostingField::Category) => self.category.clone(),
            Some(JobPostingField::Location) => self.location.clone(),
            Some(JobPostingField::Description) => self.description.clone(),
            Some(JobPostingField::SalaryRange) => self.salary_range.clone(),
            Some(JobPostingField::CompanyName) => self.company_name.clone(),
            Some(JobPostingField::IsAvailable) => yes_no(self.is_available).to_string(),
            Some(JobPostingField::Image) => self.image_path.clone(),
            None => String::new(),
        }
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        match JobPostingField::from_index(index)? {
            JobPostingField::Name => Some(&mut self.name),
            JobPostingField::Location => Some(&mut self.location),
            JobPostingField::Description => Some(&mut self.description),
            JobPostingField::SalaryRange => Some(&mut self.salary_range),
            JobPostingField::CompanyName => Some(&mut self.company_name),
            JobPostingField::Image => Some(&mut self.image_path),
            JobPostingField::JobType | JobPostingField::Category | JobPostingField::IsAvailable => None,
        }
    }

    fn cycle(&mut self, index: usize, forward: bool) {
        match JobPostingField::from_index(index) {
            Some(JobPostingField::JobType) => {
                let options = JobType::ALL.map(JobType::as_str);
                self.job_type = step(&options, &self.job_type, forward).to_string();
            }
            Some(JobPostingField::Category) => {
                let options = Category::ALL.map(Category::as_str);
                self.category = step(&options, &self.category, forward).to_string();
            }
            _ => {}
        }
    }

    fn toggle(&mut self, index: usize) {
        if JobPostingField::from_index(index) == Some(JobPostingField::IsAvailable) {
            self.is_available = !self.is_available;
        }
    }
}

const fn yes_no(value: bool) -> &'static str {
    if value {
        "yes"
    } else {
        "no"
    }
}

/// Picks the option after (or before) `current`, starting over at the ends.
fn step<'a>(options: &[&'a str], current: &str, forward: bool) -> &'a str {
    let len = options.len();
    let next = match options.iter().position(|o| *o == current) {
        Some(i) if forward => (i + 1) % len,
        Some(i) => (i + len - 1) % len,
        None => 0,
    };
    options[next]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_pattern() {
        assert!(is_salary_range("50000-70000"));
        assert!(!is_salary_range("50k-70k"));
        assert!(!is_salary_range("-70000"));
        assert!(!is_salary_range("1-2-3"));
        assert!(!is_salary_range(" 1-2"));
    }

    #[test]
    fn choice_fields_cycle_through_valid_values() {
        let mut form = JobPostingForm::default();
        let type_index = JobPostingField::JobType as usize;
        form.cycle(type_index, false);
        assert_eq!(form.job_type, "Internship");
        form.cycle(type_index, true);
        assert_eq!(form.job_type, "Full-time");

        form.category = "Space".to_string();
        form.cycle(JobPostingField::Category as usize, true);
        assert_eq!(form.category, "Technology");
    }

    #[test]
    fn space_toggles_availability() {
        let mut form = JobPostingForm::default();
        form.input_char(JobPostingField::IsAvailable as usize, ' ');
        assert!(!form.is_available);
        form.input_char(JobPostingField::Name as usize, 'x');
        assert_eq!(form.name, "x");
    }
}
