use crate::utils::error::FieldError;
use url::Url;

pub type FieldResult<T> = std::result::Result<T, FieldError>;

pub trait Validate {
    fn validate(&self) -> FieldResult<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> FieldResult<()> {
    if url_str.is_empty() {
        return Err(FieldError::new(field_name, url_str, "URL cannot be empty"));
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(FieldError::new(
                field_name,
                url_str,
                format!("Unsupported URL scheme: {}", scheme),
            )),
        },
        Err(e) => Err(FieldError::new(
            field_name,
            url_str,
            format!("Invalid URL format: {}", e),
        )),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> FieldResult<()> {
    if path.is_empty() {
        return Err(FieldError::new(field_name, path, "Path cannot be empty"));
    }

    if path.contains('\0') {
        return Err(FieldError::new(field_name, path, "Path contains null bytes"));
    }

    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: u64, min_value: u64) -> FieldResult<()> {
    if value < min_value {
        return Err(FieldError::new(
            field_name,
            value,
            format!("Value must be at least {}", min_value),
        ));
    }
    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> FieldResult<()> {
    if value.trim().is_empty() {
        return Err(FieldError::new(
            field_name,
            value,
            "Value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> FieldResult<()> {
    if value < min || value > max {
        return Err(FieldError::new(
            field_name,
            value,
            format!("Value must be between {} and {}", min, max),
        ));
    }
    Ok(())
}

/// Three ASCII letters, e.g. `USD`. Case is not normalised.
pub fn validate_currency_code(field_name: &str, value: &str) -> FieldResult<()> {
    if value.len() != 3 || !value.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(FieldError::new(
            field_name,
            value,
            "Currency must be a three-letter code",
        ));
    }
    Ok(())
}
