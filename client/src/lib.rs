pub mod api;
pub mod http;
pub mod store;

pub use api::{ApiError, TodoApi};
pub use http::HttpTodoApi;
pub use store::{TodoError, TodoState, TodoStore};
