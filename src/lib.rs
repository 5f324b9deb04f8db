pub mod app;
pub mod config;
pub mod routes;
pub mod telemetry;

pub use app::avatar::{
    generate_avatar_data_uri, generate_avatar_svg, AvatarGenerator, AvatarOptions, AvatarShape,
    FontSize, ResolvedAvatar, SvgAttributes,
};
