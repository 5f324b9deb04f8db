pub mod avatar_generator;
pub mod initials;
pub mod validation;
