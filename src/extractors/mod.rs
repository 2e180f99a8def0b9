mod json;

pub use json::{ApiJson, ApiPath, ApiQuery};
