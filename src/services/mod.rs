pub mod grading_service;
pub mod lesson_resource_service;
pub mod quiz_service;
pub mod quiz_validation_service;
pub mod reference_service;
pub mod review_service;
