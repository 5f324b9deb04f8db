pub mod avatar;
pub mod docs;
pub mod health_check;
