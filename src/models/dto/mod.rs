pub mod generated_quiz;
pub mod request;
pub mod response;
