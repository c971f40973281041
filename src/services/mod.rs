pub mod llm_client;
pub mod prompt_builder;
pub mod quiz_parser;
pub mod quiz_service;
