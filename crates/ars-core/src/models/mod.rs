pub mod message;
pub mod patient;
pub mod response;
pub mod risk;
pub mod submission;
