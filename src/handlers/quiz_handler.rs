use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::{
        domain::{QuizKind, QuizRequest, QuizType},
        dto::{
            request::{
                CreateQuizRequest, GenerateCourseQuizRequest, GenerateQuizRequest,
                GenerateTopicQuizRequest,
            },
            response::{ApiResponse, GeneratedQuizResponse, QuizResponse},
        },
    },
};

async fn run_generation(
    state: &AppState,
    req: &HttpRequest,
    request: QuizRequest,
    name: Option<String>,
) -> Result<HttpResponse, AppError> {
    let request_id = get_request_id(req).unwrap_or_default();
    log::info!("[{}] generating {:?} quiz", request_id, request.kind());

    let generated = state
        .quiz_service
        .generate(&request, name.as_deref())
        .await?;

    log::info!(
        "[{}] generated {} question(s), dropped {} block(s)",
        request_id,
        generated.questions.len(),
        generated.rejected_blocks
    );

    Ok(HttpResponse::Created().json(GeneratedQuizResponse {
        data: generated.questions,
        message: "Quiz generated successfully".to_string(),
        quiz_id: generated.quiz_id,
    }))
}

#[post("/quiz/generate")]
pub async fn generate_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<GenerateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let request = QuizRequest::ad_hoc(body.topics)?;
    run_generation(&state, &req, request, None).await
}

#[post("/quiz/generate-topic")]
pub async fn generate_topic_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<GenerateTopicQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let request = QuizRequest::new(body.topics, QuizKind::Topic, body.topic_id)?;
    run_generation(&state, &req, request, body.name).await
}

#[post("/quiz/generate-course")]
pub async fn generate_course_quiz(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<GenerateCourseQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let request = QuizRequest::new(body.topics, QuizKind::CourseCompletion, body.course_id)?;
    run_generation(&state, &req, request, body.name).await
}

#[post("/quiz")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    body: web::Json<CreateQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    body.validate()?;

    let quiz = state
        .quiz_service
        .create_quiz(&body.name, body.quiz_type, &body.identifier_id)
        .await?;
    Ok(HttpResponse::Created().json(ApiResponse::new(
        QuizResponse::from(quiz),
        "Quiz created successfully",
    )))
}

#[get("/quiz/topic/{topic_id}")]
pub async fn get_quiz_by_topic_id(
    state: web::Data<AppState>,
    topic_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let topic_id = topic_id.into_inner();
    let quiz = state
        .quiz_service
        .get_quiz_by_topic_id(&topic_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No quiz for topic '{}'", topic_id)))?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        QuizResponse::from(quiz),
        "Quiz fetched successfully",
    )))
}

#[get("/quiz/course/{course_id}")]
pub async fn get_quiz_by_course_id(
    state: web::Data<AppState>,
    course_id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let course_id = course_id.into_inner();
    let quiz = state
        .quiz_service
        .get_quiz_by_course_id(&course_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No quiz for course '{}'", course_id)))?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        QuizResponse::from(quiz),
        "Quiz fetched successfully",
    )))
}

#[get("/quiz/topic-name/{topic_name}")]
pub async fn get_quiz_by_topic_name(
    state: web::Data<AppState>,
    topic_name: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let topic_name = topic_name.into_inner();
    let quiz = state
        .quiz_service
        .get_quiz_by_topic_name(&topic_name)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No quiz for topic named '{}'", topic_name)))?;
    Ok(HttpResponse::Ok().json(ApiResponse::new(
        QuizResponse::from(quiz),
        "Quiz fetched successfully",
    )))
}

#[get("/quiz/type/{quiz_type}")]
pub async fn list_quizzes_by_type(
    state: web::Data<AppState>,
    quiz_type: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz_type: QuizType = quiz_type.parse()?;
    let quizzes: Vec<QuizResponse> = state
        .quiz_service
        .list_quizzes_by_type(quiz_type)
        .await?
        .into_iter()
        .map(QuizResponse::from)
        .collect();
    Ok(HttpResponse::Ok().json(ApiResponse::new(quizzes, "Quizzes fetched successfully")))
}
