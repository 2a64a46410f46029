//! HTTP adapter - thin REST surface over the pipeline.

mod dto;
mod handlers;
mod routes;

pub use dto::{ConvertRequest, ConvertResponse, ErrorResponse, GenerateRequest, GenerateResponse};
pub use handlers::CasegenHandlers;
pub use routes::casegen_routes;
