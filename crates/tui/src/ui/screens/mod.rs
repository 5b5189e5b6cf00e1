pub mod add;
pub mod home;
