//! Route definitions for the staff dashboards.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{admin, cashier, doctor, management, nurse};
use crate::state::AppState;

/// Routes mounted at `/dashboard`. Every handler checks the caller's role.
///
/// ```text
/// GET    /admin                              admin dashboard
/// POST   /admin/staff                        create staff
/// POST   /admin/amount-services              create amount service
/// PUT    /admin/amount-services/{id}         update amount service
/// DELETE /admin/amount-services/{id}         delete amount service
/// POST   /admin/mountains                    create mountain
/// GET    /admin/questions                    questions by mountain and locale
/// POST   /admin/questions                    create question
///
/// GET    /nurse                              overview and waiting list
/// POST   /nurse/examinations                 submit physical examination
/// PUT    /nurse/examinations/{id}            update physical examination
/// POST   /nurse/ai-analysis                  AI analysis of the counters
///
/// GET    /cashier                            payments and amount services
/// POST   /cashier/payments                   submit payment (multipart)
/// GET    /cashier/report                     payment report download
///
/// GET    /doctor                             Carstensz screenings
/// GET    /doctor/detail/{uuid}               screening detail
/// GET    /doctor/export                      screenings CSV download
/// PUT    /doctor/answers/{id}                update answer
/// PUT    /doctor/patients/{uuid}             update patient
///
/// GET    /management/activity/cashier        payment activities
/// GET    /management/activity/nurse          examination activities
/// GET    /management/analysis                screening analysis
/// GET    /management/users                   user information
/// GET    /management/users/chart             user information chart
/// GET    /management/screenings              all screenings
/// GET    /management/screenings/archive      archived screenings
/// GET    /management/screenings/completed    completed screenings
/// GET    /management/screenings/detail/{uuid} citizen screening detail
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        // Admin
        .route("/admin", get(admin::dashboard))
        .route("/admin/staff", post(admin::create_staff))
        .route("/admin/amount-services", post(admin::create_amount_service))
        .route(
            "/admin/amount-services/{id}",
            put(admin::update_amount_service).delete(admin::delete_amount_service),
        )
        .route("/admin/mountains", post(admin::create_mountain))
        .route(
            "/admin/questions",
            get(admin::questions).post(admin::create_question),
        )
        // Nurse
        .route("/nurse", get(nurse::dashboard))
        .route("/nurse/examinations", post(nurse::submit_examination))
        .route("/nurse/examinations/{id}", put(nurse::update_examination))
        .route("/nurse/ai-analysis", post(nurse::ai_analysis))
        // Cashier
        .route("/cashier", get(cashier::dashboard))
        .route("/cashier/payments", post(cashier::submit_payment))
        .route("/cashier/report", get(cashier::report))
        // Doctor
        .route("/doctor", get(doctor::dashboard))
        .route("/doctor/detail/{uuid}", get(doctor::detail))
        .route("/doctor/export", get(doctor::export))
        .route("/doctor/answers/{id}", put(doctor::update_answer))
        .route("/doctor/patients/{uuid}", put(doctor::update_patient))
        // Management (any staff role)
        .route("/management/activity/cashier", get(management::cashier_activity))
        .route("/management/activity/nurse", get(management::nurse_activity))
        .route("/management/analysis", get(management::analysis))
        .route("/management/users", get(management::users))
        .route("/management/users/chart", get(management::users_chart))
        .route("/management/screenings", get(management::screenings))
        .route("/management/screenings/archive", get(management::screenings_archive))
        .route("/management/screenings/completed", get(management::screenings_completed))
        .route(
            "/management/screenings/detail/{uuid}",
            get(management::screening_detail),
        )
}
