//! Deterministic initials avatars.
//!
//! A username is hashed onto a fixed palette for the background, the text color
//! is picked for contrast, and the label is taken from the username's initials.
//! Anything the caller sets explicitly wins over the derived value.
//!
//! Colors passed in explicitly must be `#RRGGBB`. They are written to the
//! markup as given; a malformed background only affects the derived text
//! color, which falls back to white.

use base64::{engine::general_purpose::STANDARD, Engine as _};

pub mod options;
pub mod svg;

pub use options::{
    AvatarOptions, AvatarShape, FontSize, ResolvedAvatar, SvgAttributes, DEFAULT_AVATAR_OPTIONS,
};
use svg::AvatarFill;

pub const DATA_URI_PREFIX: &str = "data:image/svg+xml;base64,";

/// Renders avatars against a fixed default table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AvatarGenerator {
    defaults: ResolvedAvatar,
}

impl AvatarGenerator {
    pub fn new(defaults: ResolvedAvatar) -> Self {
        Self { defaults }
    }

    pub fn defaults(&self) -> &ResolvedAvatar {
        &self.defaults
    }

    pub fn resolve(&self, options: &AvatarOptions) -> ResolvedAvatar {
        ResolvedAvatar::overlay(&self.defaults, options)
    }

    pub fn svg(&self, username: &str, options: &AvatarOptions) -> String {
        let spec = self.resolve(options);
        let fill = AvatarFill::derive(username, &spec);

        tracing::debug!(
            label = %fill.label,
            background_color = %fill.background_color,
            shape = ?spec.shape,
            "rendering avatar"
        );

        svg::render(&spec, &fill)
    }

    pub fn data_uri(&self, username: &str, options: &AvatarOptions) -> String {
        to_data_uri(&self.svg(username, options))
    }
}

/// SVG markup for `username` with the stock defaults.
pub fn generate_avatar_svg(username: &str, options: &AvatarOptions) -> String {
    AvatarGenerator::default().svg(username, options)
}

/// Same avatar as [`generate_avatar_svg`], as a base64 `data:` URI.
pub fn generate_avatar_data_uri(username: &str, options: &AvatarOptions) -> String {
    AvatarGenerator::default().data_uri(username, options)
}

pub fn to_data_uri(svg: &str) -> String {
    format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(svg))
}
