use std::{collections::HashMap, fmt, str::FromStr, sync::LazyLock};

use indexmap::IndexMap;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::app::utils::validation::{
    is_markup_safe, validate_markup_safe, ATTRIBUTE_NAME_REGEX, HEX_COLOR_REGEX,
};

/// Fallback styling. Empty colors and text mean "derive from the username".
pub static DEFAULT_AVATAR_OPTIONS: LazyLock<ResolvedAvatar> = LazyLock::new(|| ResolvedAvatar {
    width: 100.0,
    height: 100.0,
    background_color: String::new(),
    text_color: String::new(),
    shape: AvatarShape::Square,
    initials_length: 2,
    font_family: "Arial, sans-serif".to_string(),
    font_size: FontSize::Unset,
    text: String::new(),
    svg_attributes: SvgAttributes::default(),
});

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
#[clap(rename_all = "lowercase")]
pub enum AvatarShape {
    #[default]
    Square,
    Circle,
}

/// Either an explicit pixel size or `"unset"`, which derives the size from the
/// avatar dimensions. Non-positive sizes behave like `Unset` when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum FontSize {
    #[default]
    Unset,
    Px(f64),
}

impl FontSize {
    /// The explicit size, if it is usable as one.
    pub fn explicit(self) -> Option<f64> {
        match self {
            Self::Px(px) if px > 0.0 => Some(px),
            _ => None,
        }
    }
}

impl FromStr for FontSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("unset") {
            return Ok(Self::Unset);
        }

        s.trim()
            .parse::<f64>()
            .map(Self::Px)
            .map_err(|_| format!("expected a number or \"unset\", got `{s}`"))
    }
}

impl Serialize for FontSize {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Unset => serializer.serialize_str("unset"),
            Self::Px(px) => serializer.serialize_f64(*px),
        }
    }
}

impl<'de> Deserialize<'de> for FontSize {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct FontSizeVisitor;

        impl de::Visitor<'_> for FontSizeVisitor {
            type Value = FontSize;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a font size in pixels or \"unset\"")
            }

            fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FontSize::Px(v))
            }

            fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FontSize::Px(v as f64))
            }

            fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(FontSize::Px(v as f64))
            }

            // Query strings carry everything as text
            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                v.parse().map_err(E::custom)
            }
        }

        deserializer.deserialize_any(FontSizeVisitor)
    }
}

/// Extra attributes for the root `<svg>` element, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SvgAttributes(IndexMap<String, String>);

impl SvgAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Layers `overrides` on top of `self`, key by key.
    ///
    /// Existing keys keep their position with the overriding value, new keys
    /// are appended in the order `overrides` lists them.
    pub fn merge(&self, overrides: &SvgAttributes) -> SvgAttributes {
        let mut merged = self.clone();
        for (name, value) in overrides.iter() {
            merged.insert(name, value);
        }
        merged
    }
}

impl<K, V> FromIterator<(K, V)> for SvgAttributes
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

impl Validate for SvgAttributes {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        for (name, value) in self.iter() {
            if !ATTRIBUTE_NAME_REGEX.is_match(name) {
                errors.add("svgAttributes", attribute_error("attribute_name", name));
            } else if !is_markup_safe(value) {
                errors.add("svgAttributes", attribute_error("attribute_value", name));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn attribute_error(code: &'static str, name: &str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.add_param("attribute".into(), &name);
    error
}

/// Caller overrides. Every field is optional; unset fields fall back to the
/// defaults table or are derived from the username.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct AvatarOptions {
    #[validate(range(max = 4096.0))]
    pub width: Option<f64>,

    #[validate(range(max = 4096.0))]
    pub height: Option<f64>,

    #[validate(regex(path = *HEX_COLOR_REGEX))]
    #[schema(example = "#FF5722")]
    pub background_color: Option<String>,

    #[validate(regex(path = *HEX_COLOR_REGEX))]
    #[schema(example = "#FFFFFF")]
    pub text_color: Option<String>,

    pub shape: Option<AvatarShape>,

    #[validate(range(max = 16))]
    pub initials_length: Option<usize>,

    #[validate(custom(function = "validate_markup_safe"))]
    pub font_family: Option<String>,

    #[schema(value_type = Option<f64>)]
    pub font_size: Option<FontSize>,

    #[validate(custom(function = "validate_markup_safe"))]
    pub text: Option<String>,

    #[validate(nested)]
    #[schema(value_type = Option<HashMap<String, String>>)]
    pub svg_attributes: Option<SvgAttributes>,
}

impl AvatarOptions {
    pub fn resolve(&self) -> ResolvedAvatar {
        ResolvedAvatar::overlay(&DEFAULT_AVATAR_OPTIONS, self)
    }
}

/// Every styling field populated, ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAvatar {
    pub width: f64,
    pub height: f64,
    pub background_color: String,
    pub text_color: String,
    pub shape: AvatarShape,
    pub initials_length: usize,
    pub font_family: String,
    pub font_size: FontSize,
    pub text: String,
    pub svg_attributes: SvgAttributes,
}

impl Default for ResolvedAvatar {
    fn default() -> Self {
        DEFAULT_AVATAR_OPTIONS.clone()
    }
}

impl ResolvedAvatar {
    /// Layers caller `options` over `base`.
    ///
    /// Set fields replace the base value, except `svg_attributes` which merge
    /// key by key. Dimensions are clamped to at least 1 afterwards.
    pub fn overlay(base: &ResolvedAvatar, options: &AvatarOptions) -> ResolvedAvatar {
        let svg_attributes = match &options.svg_attributes {
            Some(overrides) => base.svg_attributes.merge(overrides),
            None => base.svg_attributes.clone(),
        };

        ResolvedAvatar {
            width: options.width.unwrap_or(base.width),
            height: options.height.unwrap_or(base.height),
            background_color: options
                .background_color
                .clone()
                .unwrap_or_else(|| base.background_color.clone()),
            text_color: options
                .text_color
                .clone()
                .unwrap_or_else(|| base.text_color.clone()),
            shape: options.shape.unwrap_or(base.shape),
            initials_length: options.initials_length.unwrap_or(base.initials_length),
            font_family: options
                .font_family
                .clone()
                .unwrap_or_else(|| base.font_family.clone()),
            font_size: options.font_size.unwrap_or(base.font_size),
            text: options.text.clone().unwrap_or_else(|| base.text.clone()),
            svg_attributes,
        }
        .clamped()
    }

    fn clamped(mut self) -> Self {
        self.width = clamp_dimension(self.width);
        self.height = clamp_dimension(self.height);
        self
    }
}

/// At least one pixel. NaN counts as non-positive.
fn clamp_dimension(value: f64) -> f64 {
    if value >= 1.0 {
        value
    } else {
        1.0
    }
}
