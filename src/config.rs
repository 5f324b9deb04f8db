use crate::app::avatar::{AvatarOptions, AvatarShape, ResolvedAvatar};

#[derive(clap::Parser, Debug, Clone)]
pub struct AppConfig {
    #[clap(long, env, value_enum, default_value_t = Stage::Dev)]
    pub stage: Stage,

    // App configs
    #[clap(long, env, default_value_t = 8000)]
    pub app_application_port: u16,

    #[clap(long, env, default_value = "127.0.0.1")]
    pub app_application_host: String,

    // Avatar defaults, layered under every request's options
    #[clap(long, env, default_value_t = 100.0)]
    pub avatar_size: f64,

    #[clap(long, env, value_enum, default_value_t = AvatarShape::Square)]
    pub avatar_shape: AvatarShape,

    #[clap(long, env, default_value_t = 2)]
    pub avatar_initials_length: usize,

    #[clap(long, env, default_value = "Arial, sans-serif")]
    pub avatar_font_family: String,

    /// Seconds clients may cache a rendered avatar
    #[clap(long, env, default_value_t = 86400)]
    pub avatar_cache_max_age: u32,
}

#[derive(clap::ValueEnum, Debug, Clone, PartialEq, Eq)]
#[clap(rename_all = "kebab_case")]
pub enum Stage {
    Dev,
    Prod,
}

impl AppConfig {
    /// The stock default table with the configured overrides on top.
    pub fn avatar_defaults(&self) -> ResolvedAvatar {
        let overrides = AvatarOptions {
            width: Some(self.avatar_size),
            height: Some(self.avatar_size),
            shape: Some(self.avatar_shape),
            initials_length: Some(self.avatar_initials_length),
            font_family: Some(self.avatar_font_family.clone()),
            ..Default::default()
        };

        overrides.resolve()
    }

    pub fn cache_control(&self) -> String {
        format!("public, max-age={}", self.avatar_cache_max_age)
    }
}
