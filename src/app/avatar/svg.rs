use std::fmt::Write;

use super::options::{AvatarShape, ResolvedAvatar, SvgAttributes};
use crate::app::utils::{
    avatar_generator::{color_from_hash, contrasting_text_color, string_to_hash},
    initials::extract_initials,
};

/// Share of the smaller dimension used when no font size is given.
const FONT_SIZE_RATIO: f64 = 0.4;

const SVG_NAMESPACE: &str = "http://www.w3.org/2000/svg";

/// Values derived from the username for whatever `spec` leaves empty.
#[derive(Debug, Clone, PartialEq)]
pub struct AvatarFill {
    pub label: String,
    pub background_color: String,
    pub text_color: String,
    pub font_size: f64,
}

impl AvatarFill {
    pub fn derive(username: &str, spec: &ResolvedAvatar) -> Self {
        let label = if spec.text.is_empty() {
            extract_initials(username, spec.initials_length)
        } else {
            spec.text.clone()
        };

        let background_color = if spec.background_color.is_empty() {
            color_from_hash(string_to_hash(username)).to_string()
        } else {
            spec.background_color.clone()
        };

        let text_color = if spec.text_color.is_empty() {
            contrasting_text_color(&background_color).to_string()
        } else {
            spec.text_color.clone()
        };

        let font_size = spec
            .font_size
            .explicit()
            .unwrap_or_else(|| spec.width.min(spec.height) * FONT_SIZE_RATIO);

        Self {
            label,
            background_color,
            text_color,
            font_size,
        }
    }
}

pub fn render(spec: &ResolvedAvatar, fill: &AvatarFill) -> String {
    let (width, height) = (spec.width, spec.height);

    let background = match spec.shape {
        AvatarShape::Circle => format!(
            r#"<circle cx="{}" cy="{}" r="{}" fill="{}" />"#,
            width / 2.0,
            height / 2.0,
            width.min(height) / 2.0,
            fill.background_color
        ),
        AvatarShape::Square => format!(
            r#"<rect width="{width}" height="{height}" fill="{}" />"#,
            fill.background_color
        ),
    };

    let svg = format!(
        r#"
<svg width="{width}" height="{height}" viewBox="0 0 {width} {height}" fill="none" xmlns="{SVG_NAMESPACE}"{attributes}>
  {background}
  <text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" fill="{text_color}" font-family="{font_family}" font-size="{font_size}" font-weight="bold">{label}</text>
</svg>
"#,
        attributes = attribute_list(&spec.svg_attributes),
        text_color = fill.text_color,
        font_family = spec.font_family,
        font_size = fill.font_size,
        label = fill.label,
    );

    svg.trim().to_string()
}

/// ` key="value"` for every entry, in order. Values go out verbatim.
fn attribute_list(attributes: &SvgAttributes) -> String {
    attributes
        .iter()
        .fold(String::new(), |mut out, (name, value)| {
            // Writing into a String never fails
            let _ = write!(out, r#" {name}="{value}""#);
            out
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::avatar::options::{AvatarOptions, FontSize};

    fn spec(options: AvatarOptions) -> ResolvedAvatar {
        options.resolve()
    }

    #[test]
    fn test_fill_derives_everything_from_username() {
        let fill = AvatarFill::derive("John Doe", &spec(AvatarOptions::default()));

        assert_eq!(fill.label, "JD");
        assert_eq!(
            fill.background_color,
            color_from_hash(string_to_hash("John Doe"))
        );
        assert_eq!(
            fill.text_color,
            contrasting_text_color(&fill.background_color)
        );
        assert_eq!(fill.font_size, 40.0);
    }

    #[test]
    fn test_fill_keeps_explicit_values() {
        let fill = AvatarFill::derive(
            "John Doe",
            &spec(AvatarOptions {
                background_color: Some("#123456".into()),
                text_color: Some("#ABCDEF".into()),
                text: Some("Hi".into()),
                font_size: Some(FontSize::Px(12.0)),
                ..Default::default()
            }),
        );

        assert_eq!(
            fill,
            AvatarFill {
                label: "Hi".into(),
                background_color: "#123456".into(),
                text_color: "#ABCDEF".into(),
                font_size: 12.0,
            }
        );
    }

    #[test]
    fn test_font_size_uses_smaller_dimension() {
        let resolved = spec(AvatarOptions {
            width: Some(200.0),
            height: Some(55.0),
            font_size: Some(FontSize::Px(0.0)),
            ..Default::default()
        });

        let fill = AvatarFill::derive("x", &resolved);
        assert_eq!(fill.font_size, 55.0 * 0.4);
    }

    #[test]
    fn test_render_rect() {
        let resolved = spec(AvatarOptions {
            width: Some(50.0),
            height: Some(40.0),
            ..Default::default()
        });
        let fill = AvatarFill::derive("John Doe", &resolved);

        let svg = render(&resolved, &fill);

        assert!(svg.starts_with(r#"<svg width="50" height="40" viewBox="0 0 50 40""#));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(&format!(
            r#"<rect width="50" height="40" fill="{}" />"#,
            fill.background_color
        )));
        assert!(svg.contains(r#"font-size="16""#));
        assert!(svg.contains(r#"font-weight="bold">JD</text>"#));
    }

    #[test]
    fn test_render_circle_with_odd_dimensions() {
        let resolved = spec(AvatarOptions {
            width: Some(51.0),
            height: Some(75.0),
            shape: Some(AvatarShape::Circle),
            background_color: Some("#000000".into()),
            ..Default::default()
        });
        let fill = AvatarFill::derive("x", &resolved);

        let svg = render(&resolved, &fill);

        assert!(svg.contains(r##"<circle cx="25.5" cy="37.5" r="25.5" fill="#000000" />"##));
        assert!(!svg.contains("<rect"));
    }

    #[test]
    fn test_attribute_list_preserves_order() {
        let attributes = SvgAttributes::from_iter([("role", "img"), ("class", "a b")]);
        assert_eq!(attribute_list(&attributes), r#" role="img" class="a b""#);
        assert_eq!(attribute_list(&SvgAttributes::default()), "");
    }
}
