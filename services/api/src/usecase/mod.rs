pub mod access;
pub mod audit;
pub mod identity;
pub mod otp;
pub mod post;
pub mod share_link;
pub mod user;
