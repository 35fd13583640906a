//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and redirects callers whose role does
//! not match: to login when the session is unusable, otherwise to their
//! own dashboard.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use klinik_core::roles::Role;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

macro_rules! role_extractor {
    ($(#[$doc:meta])* $name:ident, [$($role:expr),+]) => {
        $(#[$doc])*
        pub struct $name(pub AuthUser);

        impl FromRequestParts<AppState> for $name {
            type Rejection = AppError;

            async fn from_request_parts(
                parts: &mut Parts,
                state: &AppState,
            ) -> Result<Self, Self::Rejection> {
                let user = AuthUser::authorize(parts, state, &[$($role),+]).await?;
                Ok($name(user))
            }
        }
    };
}

role_extractor!(
    /// Requires the `admin` role.
    ///
    /// ```ignore
    /// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
    ///     Ok(Json(()))
    /// }
    /// ```
    RequireAdmin,
    [Role::Admin]
);

role_extractor!(
    /// Requires the `nurse` role.
    RequireNurse,
    [Role::Nurse]
);

role_extractor!(
    /// Requires the `cashier` role.
    RequireCashier,
    [Role::Cashier]
);

role_extractor!(
    /// Requires the `doctor` role.
    RequireDoctor,
    [Role::Doctor]
);

role_extractor!(
    /// Requires any staff role. Used by the shared management pages.
    RequireStaff,
    [Role::Admin, Role::Nurse, Role::Cashier, Role::Doctor]
);
