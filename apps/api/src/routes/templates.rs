use axum::Json;

use crate::registry::{self, TemplateSummary};

/// GET /api/v1/templates
/// Registry listing for the template picker.
pub async fn handle_list_templates() -> Json<Vec<TemplateSummary>> {
    Json(registry::list())
}
