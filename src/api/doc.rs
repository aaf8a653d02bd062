use utoipa::OpenApi;

pub const USER_ROLE_TAG: &str = "UserRole";
pub const PLAN_TAG: &str = "Plan";
pub const APP_USER_TAG: &str = "AppUser";
pub const STREAK_TAG: &str = "Streak";
pub const THEME_TAG: &str = "Theme";
pub const SUDOKU_TAG: &str = "Sudoku";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Delfis API",
        description = "User, plan, streak and game data of the Delfis platform",
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::MessageResponse,
            crate::models::EntityRef,
        )
    ),
    tags(
        (name = USER_ROLE_TAG, description = "User role endpoints"),
        (name = PLAN_TAG, description = "Subscription plan endpoints"),
        (name = APP_USER_TAG, description = "User account endpoints"),
        (name = STREAK_TAG, description = "Streak endpoints"),
        (name = THEME_TAG, description = "Theme endpoints"),
        (name = SUDOKU_TAG, description = "Sudoku game endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;
