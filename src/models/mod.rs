mod request;
mod response;

pub use request::{HeaderField, HttpMethod, RequestSpec};
pub use response::{RequestState, ResponseBody, ResponseData};
