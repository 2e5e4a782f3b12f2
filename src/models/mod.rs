pub mod admin;
pub mod announcement;
pub mod consumer;
pub mod helper;
pub mod producer;
pub mod sns_user;
pub mod unfollower;
