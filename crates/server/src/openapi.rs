use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Cat as exchanged over HTTP. `id` is ignored on create.
#[derive(Serialize, ToSchema)]
pub struct CatDoc {
    pub id: Option<String>,
    pub name: String,
    pub hisses: bool,
}

/// Dog as exchanged over HTTP. `id` is ignored on create.
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DogDoc {
    pub id: Option<String>,
    pub name: String,
    pub barks: bool,
    pub potty_trained: bool,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::cats::list_cats,
        crate::routes::cats::get_cat,
        crate::routes::cats::create_cat,
        crate::routes::dogs::list_dogs,
        crate::routes::dogs::get_dog,
        crate::routes::dogs::create_dog,
    ),
    components(
        schemas(
            HealthResponse,
            CatDoc,
            DogDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "cats"),
        (name = "dogs")
    )
)]
pub struct ApiDoc;
