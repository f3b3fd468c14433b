use actix_web::{
    delete, get,
    http::{header, StatusCode},
    post, web, HttpResponse, Responder,
};
use log::{error, info, warn};

use crate::{
    directory::UserDirectory,
    error::DirectoryError,
    models::user::{CreateUserForm, DeleteResponse, FormValues, SearchQuery, UpdateUserForm},
    services::{html, run},
    validator::{validate_create, validate_update},
    views,
};

fn redirect_to_list() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, "/users"))
        .finish()
}

fn error_page(status: StatusCode, message: &str) -> HttpResponse {
    html(status, views::error_page(message))
}

#[get("/")]
pub async fn root() -> impl Responder {
    redirect_to_list()
}

#[get("/users")]
pub async fn index(
    directory: web::Data<UserDirectory>,
    query: web::Query<SearchQuery>,
) -> impl Responder {
    let search = query.into_inner().search;
    let filter = search.clone();

    match run(&directory, move |d| d.list(filter.as_deref())).await {
        Ok(users) => html(StatusCode::OK, views::list_page(&users, search.as_deref())),
        Err(why) => {
            error!("Error fetching users: {}", why);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch users")
        }
    }
}

#[get("/users/new")]
pub async fn create() -> impl Responder {
    html(
        StatusCode::OK,
        views::create_form(&FormValues::default(), None),
    )
}

#[post("/users")]
pub async fn store(
    directory: web::Data<UserDirectory>,
    input: web::Form<CreateUserForm>,
) -> impl Responder {
    let input: CreateUserForm = input.into_inner();
    let submitted = FormValues::from(&input);

    let input = match validate_create(&input) {
        Ok(i) => i,
        Err(why) => {
            return html(
                StatusCode::BAD_REQUEST,
                views::create_form(&submitted, Some(&why.to_string())),
            )
        }
    };

    match run(&directory, move |d| {
        d.create(&input.name, &input.email, &input.password)
    })
    .await
    {
        Ok(user) => {
            info!("Created user {}", user.id);
            redirect_to_list()
        }
        Err(DirectoryError::DuplicateEmail(email)) => {
            warn!("Rejected duplicate email {}", email);
            html(
                StatusCode::CONFLICT,
                views::create_form(&submitted, Some("Email is already in use")),
            )
        }
        Err(why) => {
            error!("Error creating user: {}", why);
            html(
                StatusCode::INTERNAL_SERVER_ERROR,
                views::create_form(&submitted, Some("Failed to create user")),
            )
        }
    }
}

#[get("/users/{id}")]
pub async fn show(directory: web::Data<UserDirectory>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();

    match run(&directory, move |d| d.get(&id)).await {
        Ok(user) => html(StatusCode::OK, views::detail_page(&user)),
        Err(DirectoryError::NotFound) => error_page(StatusCode::NOT_FOUND, "User not found"),
        Err(why) => {
            error!("Error fetching user details: {}", why);
            error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch user details",
            )
        }
    }
}

#[get("/users/{id}/edit")]
pub async fn edit(directory: web::Data<UserDirectory>, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let lookup = id.clone();

    match run(&directory, move |d| d.get(&lookup)).await {
        Ok(user) => html(
            StatusCode::OK,
            views::edit_form(&id, &FormValues::from(&user), None),
        ),
        Err(DirectoryError::NotFound) => error_page(StatusCode::NOT_FOUND, "User not found"),
        Err(why) => {
            error!("Error fetching user for edit: {}", why);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch user")
        }
    }
}

#[post("/users/{id}")]
pub async fn update(
    directory: web::Data<UserDirectory>,
    path: web::Path<String>,
    input: web::Form<UpdateUserForm>,
) -> impl Responder {
    let id = path.into_inner();
    let input: UpdateUserForm = input.into_inner();
    let submitted = FormValues::from(&input);

    let input = match validate_update(&input) {
        Ok(i) => i,
        Err(why) => {
            return html(
                StatusCode::BAD_REQUEST,
                views::edit_form(&id, &submitted, Some(&why.to_string())),
            )
        }
    };

    let target = id.clone();
    match run(&directory, move |d| {
        d.update(&target, &input.name, &input.email)
    })
    .await
    {
        Ok(user) => {
            info!("Updated user {}", user.id);
            redirect_to_list()
        }
        Err(DirectoryError::NotFound) => error_page(StatusCode::NOT_FOUND, "User not found"),
        Err(why) => {
            error!("Error updating user: {}", why);
            html(
                StatusCode::INTERNAL_SERVER_ERROR,
                views::edit_form(&id, &submitted, Some("Failed to update user")),
            )
        }
    }
}

#[delete("/users/{user_id}")]
pub async fn destroy(directory: web::Data<UserDirectory>, path: web::Path<String>) -> impl Responder {
    let user_id = path.into_inner();

    // Not atomic: a create landing between the two calls shows up in the list.
    let result = run(&directory, move |d| {
        let removed = d.delete(&user_id)?;
        info!("Deleted user {}", removed.id);
        d.list(None)
    })
    .await;

    match result {
        Ok(users) => HttpResponse::Ok().json(DeleteResponse::deleted(users)),
        Err(DirectoryError::NotFound) => {
            HttpResponse::NotFound().json(DeleteResponse::failed("User not found"))
        }
        Err(why) => {
            error!("Error deleting user: {}", why);
            HttpResponse::InternalServerError().json(DeleteResponse::failed("Failed to delete user"))
        }
    }
}
