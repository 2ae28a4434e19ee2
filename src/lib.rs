pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

use crate::repository::postgres::{PgAttemptRepository, PgQuizRepository};
use crate::services::{
    lesson_resource_service::LessonResourceService, quiz_service::QuizService,
    reference_service::ReferenceService, review_service::ReviewService,
};
use sqlx::PgPool;
use std::sync::Arc;

/// Composition root. An embedding transport (HTTP server, job runner, CLI)
/// builds one of these from a pool and calls the services directly.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub quiz_service: QuizService,
    pub review_service: ReviewService,
    pub reference_service: ReferenceService,
    pub lesson_resource_service: LessonResourceService,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        let quiz_service = QuizService::new(
            Arc::new(PgQuizRepository::new(pool.clone())),
            Arc::new(PgAttemptRepository::new(pool.clone())),
        );
        let review_service = ReviewService::new(pool.clone());
        let reference_service = ReferenceService::new(pool.clone());
        let lesson_resource_service = LessonResourceService::new(pool.clone());

        Self {
            pool,
            quiz_service,
            review_service,
            reference_service,
            lesson_resource_service,
        }
    }
}
