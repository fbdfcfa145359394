//! Field validation rule set shared by the nurse, secretary and patient
//! forms. Validation is field-level and re-runs on every change; submission
//! stays blocked until every required field passes.

use once_cell::sync::Lazy;
use regex::Regex;

use shared::{
    CredentialsFormValidation, CredentialsValidationError, PatientFormState,
    PatientFormValidation, PatientValidationError, StaffFormState, StaffFormValidation,
    StaffValidationError,
};

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-zÁÉÍÓÚáéíóúÑñ\s]+$").expect("name regex"));
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").expect("phone regex"));
static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]{4,16}$").expect("username regex"));

/// Symbols accepted in self-service passwords.
const PASSWORD_SYMBOLS: &str = "!@#$%^&*";

/// Letters, accented Latin letters and spaces; never blank.
pub fn valid_name(value: &str) -> bool {
    !value.trim().is_empty() && NAME_RE.is_match(value)
}

/// Exactly 10 ASCII digits.
pub fn valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

/// `local@domain.tld` shape, no whitespace, at least one `.` after the `@`.
pub fn valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// 4-16 chars, alphanumeric plus `.`, `_`, `-`.
pub fn valid_username(value: &str) -> bool {
    USERNAME_RE.is_match(value)
}

/// Credential auto-generated for a new nurse:
/// `Capitalize(first given name + paternal surname)`.
pub fn generated_password(first_name: &str, paternal_surname: &str) -> String {
    let first = first_name.trim().split_whitespace().next().unwrap_or("");
    let base = format!("{}{}", first, paternal_surname.trim());

    let mut chars = base.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Minimum-strength rule for self-service passwords: at least 8 chars with a
/// letter, a digit and a symbol, drawn only from letters, digits and
/// `!@#$%^&*`. The original expressed this with look-aheads; here it is a
/// character scan.
pub fn validate_password_strength(password: &str) -> Vec<CredentialsValidationError> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push(CredentialsValidationError::PasswordTooShort);
    }
    if !password.chars().any(|c| c.is_ascii_alphabetic()) {
        errors.push(CredentialsValidationError::PasswordMissingLetter);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push(CredentialsValidationError::PasswordMissingDigit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        errors.push(CredentialsValidationError::PasswordMissingSymbol);
    }
    if password
        .chars()
        .any(|c| !c.is_ascii_alphanumeric() && !PASSWORD_SYMBOLS.contains(c))
    {
        errors.push(CredentialsValidationError::PasswordForbiddenCharacter);
    }

    errors
}

/// Validate the credential update form.
pub fn validate_credentials(username: &str, password: &str) -> CredentialsFormValidation {
    let mut errors = Vec::new();

    if !valid_username(username) {
        errors.push(CredentialsValidationError::InvalidUsername);
    }
    errors.extend(validate_password_strength(password));

    CredentialsFormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validate the personal fields of a staff form (edit forms, where the
/// floor is fixed and not part of the submission).
pub fn validate_staff_fields(state: &StaffFormState) -> StaffFormValidation {
    let mut errors = Vec::new();

    if !valid_name(&state.first_name) {
        errors.push(StaffValidationError::InvalidFirstName);
    }
    if !valid_name(&state.paternal_surname) {
        errors.push(StaffValidationError::InvalidPaternalSurname);
    }
    if !valid_name(&state.maternal_surname) {
        errors.push(StaffValidationError::InvalidMaternalSurname);
    }
    if !valid_email(&state.email) {
        errors.push(StaffValidationError::InvalidEmail);
    }
    if !valid_phone(&state.phone) {
        errors.push(StaffValidationError::InvalidPhone);
    }
    if !valid_username(&state.username) {
        errors.push(StaffValidationError::InvalidUsername);
    }

    StaffFormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Validate every field of a staff create form, floor included.
pub fn validate_staff_form(state: &StaffFormState) -> StaffFormValidation {
    let mut validation = validate_staff_fields(state);

    if state.floor_id.is_none() {
        validation.errors.push(StaffValidationError::MissingFloor);
        validation.is_valid = false;
    }

    validation
}

/// Re-run validation after a field change and store the result on the form.
pub fn refresh_staff_form(state: &mut StaffFormState) -> bool {
    let validation = validate_staff_form(state);
    state.errors = validation.errors;
    validation.is_valid
}

/// Validate every field of a patient admission form.
pub fn validate_patient_form(state: &PatientFormState) -> PatientFormValidation {
    let mut errors = Vec::new();

    if !valid_name(&state.first_name) {
        errors.push(PatientValidationError::InvalidFirstName);
    }
    if !valid_name(&state.paternal_surname) {
        errors.push(PatientValidationError::InvalidPaternalSurname);
    }
    if !valid_name(&state.maternal_surname) {
        errors.push(PatientValidationError::InvalidMaternalSurname);
    }
    if !valid_phone(&state.phone) {
        errors.push(PatientValidationError::InvalidPhone);
    }

    PatientFormValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// Re-run validation after a field change and store the result on the form.
pub fn refresh_patient_form(state: &mut PatientFormState) -> bool {
    let validation = validate_patient_form(state);
    state.errors = validation.errors;
    validation.is_valid
}
