//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Event Management API",
        version = "0.1.0",
        description = "CRUD service for event records backed by MongoDB / Cosmos DB"
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    nest(
        (path = "/events", api = domain_events::ApiDoc)
    ),
    tags(
        (name = "Events", description = "Event management endpoints")
    )
)]
pub struct ApiDoc;
