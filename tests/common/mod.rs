#[allow(unused)]
mod assertions;
#[allow(unused)]
mod builders;
#[allow(unused)]
mod setup;

#[allow(unused)]
pub use assertions::*;
#[allow(unused)]
pub use builders::*;
#[allow(unused)]
pub use setup::*;

/// Build an in-process actix-web test service around an `AppState`.
macro_rules! test_service {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state.clone()))
                .configure(todo_api::handlers::configure_routes),
        )
        .await
    };
}
