use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use super::auth::Caller;
use crate::error::ApiError;

/// Access levels, ordered from least to most privileged
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Access {
    Anonymous,
    User,
    Admin,
}

impl Access {
    pub fn permits(self, required: Access) -> bool {
        self >= required
    }
}

/// Route gate: rejects callers below `required` with 401.
///
/// Layer with `middleware::from_fn_with_state(Access::Admin, require_access)`.
pub async fn require_access(
    State(required): State<Access>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let caller = request.extensions().get::<Caller>().cloned().unwrap_or_default();

    if !caller.access().permits(required) {
        tracing::warn!(
            "Access denied: {} {} requires {:?}, caller {} is {:?}",
            request.method(),
            request.uri().path(),
            required,
            caller.username().unwrap_or("anonymous"),
            caller.access()
        );
        return Err(ApiError::unauthorized("Unauthorized"));
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_ordering() {
        assert!(Access::Admin.permits(Access::Admin));
        assert!(Access::Admin.permits(Access::User));
        assert!(Access::User.permits(Access::User));
        assert!(!Access::User.permits(Access::Admin));
        assert!(!Access::Anonymous.permits(Access::User));
        assert!(Access::Anonymous.permits(Access::Anonymous));
    }
}
