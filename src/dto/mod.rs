pub mod common_dto;
pub mod lesson_resource_dto;
pub mod quiz_dto;
pub mod reference_dto;
pub mod review_dto;
