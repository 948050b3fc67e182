pub mod auth;
pub mod guards;
pub mod response;
pub mod validated_json;

pub use auth::{authenticate_jwt, CurrentUser};
pub use guards::{AdminUser, LoggedIn, SelfOrAdmin};
pub use response::{ApiResponse, ApiResult};
pub use validated_json::ValidatedJson;
