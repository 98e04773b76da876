use axum::{extract::Request, http::Method, middleware::Next, response::Response};

use crate::error::AppError;
use crate::middlewares::AuthUser;

/// Write-permission rule for hazard reports:
/// reads are open to anyone, creation needs an authenticated caller,
/// mutation and deletion need staff.
pub fn allow(method: &Method, authenticated: bool, staff: bool) -> bool {
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return true;
    }
    if method == Method::POST {
        return authenticated;
    }
    staff
}

/// Policy middleware for the report write routes. Expects `auth_middleware`
/// to have already populated the AuthUser extension.
pub async fn policy_middleware(request: Request, next: Next) -> Result<Response, AppError> {
    let user = request.extensions().get::<AuthUser>();
    let authenticated = user.is_some();
    let staff = user.map(|u| u.is_staff).unwrap_or(false);

    if !allow(request.method(), authenticated, staff) {
        return Err(if authenticated {
            AppError::Forbidden
        } else {
            AppError::Unauthorized
        });
    }

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_are_always_allowed() {
        for method in [Method::GET, Method::HEAD, Method::OPTIONS] {
            assert!(allow(&method, false, false));
            assert!(allow(&method, true, false));
            assert!(allow(&method, true, true));
        }
    }

    #[test]
    fn create_requires_authentication() {
        assert!(!allow(&Method::POST, false, false));
        assert!(allow(&Method::POST, true, false));
        assert!(allow(&Method::POST, true, true));
    }

    #[test]
    fn mutation_requires_staff() {
        for method in [Method::PUT, Method::PATCH, Method::DELETE] {
            assert!(!allow(&method, false, false));
            assert!(!allow(&method, true, false));
            assert!(allow(&method, true, true));
        }
    }
}
