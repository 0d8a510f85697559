pub mod assessment_service;
pub mod generation_client;
pub mod key_rotation;
pub mod prompt_builder;
