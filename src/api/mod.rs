pub mod api;
mod dtos;
pub(crate) mod errors;
mod todos_handler;
mod validation;
