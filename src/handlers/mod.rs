pub mod health_handler;
pub mod quiz_handler;

use actix_web::web;

use crate::errors::AppError;

pub use health_handler::{health_check, health_check_ready};
pub use quiz_handler::{
    create_quiz, generate_course_quiz, generate_quiz, generate_topic_quiz, get_quiz_by_course_id,
    get_quiz_by_topic_id, get_quiz_by_topic_name, list_quizzes_by_type,
};

/// Registers every route. Malformed JSON bodies become validation errors.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .service(health_check)
    .service(health_check_ready)
    .service(generate_quiz)
    .service(generate_topic_quiz)
    .service(generate_course_quiz)
    .service(create_quiz)
    .service(get_quiz_by_topic_id)
    .service(get_quiz_by_course_id)
    .service(get_quiz_by_topic_name)
    .service(list_quizzes_by_type);
}
