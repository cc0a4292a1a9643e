pub mod auth;
pub mod contact;
pub mod emi;
pub mod faq;
pub mod pricing;
pub mod property;
pub mod team;
