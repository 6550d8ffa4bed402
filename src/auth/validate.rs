/// Maximum length of a role name.
pub const ROLE_NAME_MAX: usize = 100;

/// Maximum length of a role description.
pub const DESCRIPTION_MAX: usize = 500;

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an imported role's name and description. Returns every problem found.
pub fn validate_role(name: &str, description: &str) -> Vec<String> {
    let mut errors = vec![];
    errors.extend(validate_required(name, "Name", ROLE_NAME_MAX));
    errors.extend(validate_optional(description, "Description", DESCRIPTION_MAX));
    errors
}
