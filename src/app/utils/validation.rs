use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

pub static HEX_COLOR_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap());

/// XML attribute names, ASCII subset.
pub static ATTRIBUTE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_:][A-Za-z0-9_:.-]*$").unwrap());

pub static MARKUP_CHARACTERS: &[char] = &['<', '>', '&', '"'];

pub fn is_markup_safe(value: &str) -> bool {
    !value.contains(MARKUP_CHARACTERS)
}

/// Rejects values that would break out of an attribute or text node.
pub fn validate_markup_safe(value: &str) -> Result<(), ValidationError> {
    if !is_markup_safe(value) {
        return Err(ValidationError::new("markup"));
    }

    Ok(())
}
