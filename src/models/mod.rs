pub mod lesson_resource;
pub mod quiz;
pub mod quiz_attempt;
pub mod reference;
pub mod review;
