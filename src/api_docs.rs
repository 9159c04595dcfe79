use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::create_book,
        api::books::delete_all_books,
        api::books::get_book,
        api::books::add_comment,
        api::books::delete_book,
    ),
    components(
        schemas(
            crate::models::Book,
            api::books::CreateBookRequest,
            api::books::AddCommentRequest,
        )
    ),
    tags(
        (name = "bookshelf", description = "Bookshelf API")
    )
)]
pub struct ApiDoc;
