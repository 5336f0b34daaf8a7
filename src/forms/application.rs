//! Job application form.
//!
//! Every field except the cover letter is required. A value made only of
//! whitespace counts as missing.

use super::{FieldKind, FieldSpec, FormModel, ValidationErrors};

/// Fields of the application form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplicationField {
    ApplicantName,
    Degree,
    Institution,
    GraduationYear,
    Skills,
    Motivation,
    CoverLetter,
    Resume,
}

impl ApplicationField {
    pub const ALL: [Self; 8] = [
        Self::ApplicantName,
        Self::Degree,
        Self::Institution,
        Self::GraduationYear,
        Self::Skills,
        Self::Motivation,
        Self::CoverLetter,
        Self::Resume,
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

const FIELDS: [FieldSpec; 8] = [
    FieldSpec { key: "applicantName", label: "Full name", kind: FieldKind::Text, required: true },
    FieldSpec { key: "degree", label: "Degree", kind: FieldKind::Text, required: true },
    FieldSpec { key: "institution", label: "Institution", kind: FieldKind::Text, required: true },
    FieldSpec { key: "graduationYear", label: "Graduation year", kind: FieldKind::Text, required: true },
    FieldSpec { key: "skills", label: "Skills (comma separated)", kind: FieldKind::Text, required: true },
    FieldSpec { key: "whyJoin", label: "Why do you want to join?", kind: FieldKind::Multiline, required: true },
    FieldSpec { key: "coverLetter", label: "Cover letter", kind: FieldKind::Multiline, required: false },
    FieldSpec { key: "resumeFile", label: "Resume file", kind: FieldKind::Path, required: true },
];

/// Editable state of the application form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ApplicationForm {
    pub applicant_name: String,
    pub degree: String,
    pub institution: String,
    pub graduation_year: String,
    pub skills: String,
    pub motivation: String,
    pub cover_letter: String,
    /// Local path of the resume to upload.
    pub resume_path: String,
}

/// An application that passed validation, values trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidApplication {
    pub applicant_name: String,
    pub degree: String,
    pub institution: String,
    pub graduation_year: String,
    pub skills: String,
    pub motivation: String,
    pub cover_letter: Option<String>,
    pub resume_path: String,
}

impl ValidApplication {
    /// Text parts of the `apply` multipart body, in upload order.
    ///
    /// The resume file part is added separately by the request builder.
    #[must_use]
    pub fn form_fields(&self, email: &str) -> Vec<(&'static str, String)> {
        vec![
            ("applicantName", self.applicant_name.clone()),
            ("education[degree]", self.degree.clone()),
            ("education[institution]", self.institution.clone()),
            ("education[graduationYear]", self.graduation_year.clone()),
            ("skills", self.skills.clone()),
            ("whyJoin", self.motivation.clone()),
            ("coverLetter", self.cover_letter.clone().unwrap_or_default()),
            ("email", email.to_string()),
        ]
    }
}

impl ApplicationForm {
    /// Creates a form with the applicant's name filled in.
    #[must_use]
    pub fn prefilled(applicant_name: &str) -> Self {
        Self {
            applicant_name: applicant_name.to_string(),
            ..Self::default()
        }
    }

    /// Validates every field and collects all violations.
    ///
    /// # Errors
    ///
    /// Returns every missing required field, plus a non-numeric graduation year.
    pub fn validate(&self) -> Result<ValidApplication, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let required = [
            (ApplicationField::ApplicantName, &self.applicant_name, "Full name is required"),
            (ApplicationField::Degree, &self.degree, "Degree is required"),
            (ApplicationField::Institution, &self.institution, "Institution is required"),
            (ApplicationField::GraduationYear, &self.graduation_year, "Graduation year is required"),
            (ApplicationField::Skills, &self.skills, "Skills are required"),
            (ApplicationField::Motivation, &self.motivation, "Tell us why you want to join"),
            (ApplicationField::Resume, &self.resume_path, "Please select a resume file"),
        ];
        for (field, value, message) in required {
            if value.trim().is_empty() {
                errors.push(field.key(), message);
            }
        }

        let year = self.graduation_year.trim();
        if !year.is_empty() && year.parse::<u16>().is_err() {
            errors.push(
                ApplicationField::GraduationYear.key(),
                "Graduation year must be a number",
            );
        }

        let cover_letter = Some(self.cover_letter.trim())
            .filter(|c| !c.is_empty())
            .map(ToString::to_string);

        errors.into_result(ValidApplication {
            applicant_name: self.applicant_name.trim().to_string(),
            degree: self.degree.trim().to_string(),
            institution: self.institution.trim().to_string(),
            graduation_year: year.to_string(),
            skills: self.skills.trim().to_string(),
            motivation: self.motivation.trim().to_string(),
            cover_letter,
            resume_path: self.resume_path.trim().to_string(),
        })
    }
}

impl FormModel for ApplicationForm {
    fn fields(&self) -> &'static [FieldSpec] {
        &FIELDS
    }

    fn value(&self, index: usize) -> String {
        match ApplicationField::from_index(index) {
            Some(field) => self.field_ref(field).clone(),
            None => String::new(),
        }
    }

    fn text_mut(&mut self, index: usize) -> Option<&mut String> {
        let field = ApplicationField::from_index(index)?;
        Some(match field {
            ApplicationField::ApplicantName => &mut self.applicant_name,
            ApplicationField::Degree => &mut self.degree,
            ApplicationField::Institution => &mut self.institution,
            ApplicationField::GraduationYear => &mut self.graduation_year,
            ApplicationField::Skills => &mut self.skills,
            ApplicationField::Motivation => &mut self.motivation,
            ApplicationField::CoverLetter => &mut self.cover_letter,
            ApplicationField::Resume => &mut self.resume_path,
        })
    }
}

impl ApplicationForm {
    const fn field_ref(&self, field: ApplicationField) -> &String {
        match field {
            ApplicationField::ApplicantName => &self.applicant_name,
            ApplicationField::Degree => &self.degree,
            ApplicationField::Institution => &self.institution,
            ApplicationField::GraduationYear => &self.graduation_year,
            ApplicationField::Skills => &self.skills,
            ApplicationField::Motivation => &self.motivation,
            ApplicationField::CoverLetter => &self.cover_letter,
            ApplicationField::Resume => &self.resume_path,
        }
    }
}
