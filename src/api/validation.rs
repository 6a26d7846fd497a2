use super::ApiError;

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PAGE: u64 = 100_000;
const MAX_PAGE_SIZE: u64 = 100;

/// Minimal shape check; deliverability is the mail server's problem.
pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Email is required"));
    }

    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(ApiError::validation("Email address is not valid"));
    };
    if local.is_empty() || domain.is_empty() || !domain.contains('.') || trimmed.contains(' ') {
        return Err(ApiError::validation("Email address is not valid"));
    }

    Ok(trimmed)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ApiError::validation(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(password)
}

pub fn validate_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Name is required"));
    }
    Ok(trimmed)
}

pub fn validate_property_id(id: &str) -> Result<&str, ApiError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Property ID cannot be empty"));
    }
    Ok(trimmed)
}

/// The upper bound keeps `page * page_size` far from u64 overflow in the
/// paginator's offset arithmetic.
pub fn validate_page(page: u64) -> Result<u64, ApiError> {
    if !(1..=MAX_PAGE).contains(&page) {
        return Err(ApiError::validation(format!(
            "Invalid page: {}. Pages are numbered from 1 to {}",
            page, MAX_PAGE
        )));
    }
    Ok(page)
}

pub fn validate_page_size(page_size: u64) -> Result<u64, ApiError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(ApiError::validation(format!(
            "Invalid page size: {}. Page size must be between 1 and {}",
            page_size, MAX_PAGE_SIZE
        )));
    }
    Ok(page_size)
}

pub fn validate_price_range(min: Option<f64>, max: Option<f64>) -> Result<(), ApiError> {
    for price in [min, max].into_iter().flatten() {
        if !price.is_finite() || price < 0.0 {
            return Err(ApiError::validation(format!("Invalid price: {}", price)));
        }
    }
    if let (Some(min), Some(max)) = (min, max)
        && min > max
    {
        return Err(ApiError::validation(
            "Minimum price cannot exceed maximum price",
        ));
    }
    Ok(())
}

/// Counts (bedrooms, square feet) can be absent but never negative.
pub fn validate_count(value: Option<i32>, field: &str) -> Result<(), ApiError> {
    if let Some(value) = value
        && value < 0
    {
        return Err(ApiError::validation(format!(
            "Invalid {}: {}",
            field, value
        )));
    }
    Ok(())
}

/// Fractional criteria (bathrooms) must be finite and non-negative.
pub fn validate_fraction(value: Option<f64>, field: &str) -> Result<(), ApiError> {
    if let Some(value) = value
        && (!value.is_finite() || value < 0.0)
    {
        return Err(ApiError::validation(format!(
            "Invalid {}: {}",
            field, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("buyer@trusteze.com").is_ok());
        assert_eq!(validate_email("  a@b.co  ").unwrap(), "a@b.co");
        assert!(validate_email("").is_err());
        assert!(validate_email("no-at-sign").is_err());
        assert!(validate_email("@missing-local.com").is_err());
        assert!(validate_email("missing-domain@").is_err());
        assert!(validate_email("no-tld@domain").is_err());
        assert!(validate_email("spaces in@local.com").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("longenough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_page() {
        assert!(validate_page(1).is_ok());
        assert!(validate_page(MAX_PAGE).is_ok());
        assert!(validate_page(0).is_err());
        // Unbounded pages would overflow the paginator's offset math.
        assert!(validate_page(MAX_PAGE + 1).is_err());
        assert!(validate_page(u64::MAX).is_err());
    }

    #[test]
    fn test_validate_count() {
        assert!(validate_count(None, "bedrooms").is_ok());
        assert!(validate_count(Some(0), "bedrooms").is_ok());
        assert!(validate_count(Some(-1), "bedrooms").is_err());
    }

    #[test]
    fn test_validate_fraction() {
        assert!(validate_fraction(None, "bathrooms").is_ok());
        assert!(validate_fraction(Some(2.5), "bathrooms").is_ok());
        assert!(validate_fraction(Some(-0.5), "bathrooms").is_err());
        assert!(validate_fraction(Some(f64::NAN), "bathrooms").is_err());
        assert!(validate_fraction(Some(f64::INFINITY), "bathrooms").is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(100).is_ok());
        assert!(validate_page_size(0).is_err());
        assert!(validate_page_size(101).is_err());
    }

    #[test]
    fn test_validate_price_range() {
        assert!(validate_price_range(Some(100.0), Some(200.0)).is_ok());
        assert!(validate_price_range(None, None).is_ok());
        assert!(validate_price_range(Some(-1.0), None).is_err());
        assert!(validate_price_range(Some(f64::NAN), None).is_err());
        assert!(validate_price_range(Some(300.0), Some(200.0)).is_err());
    }
}
