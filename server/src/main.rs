use std::{env, fs, io, path::Path};

use actix_cors::Cors;
use actix_web::{
    middleware::{Condition, Logger},
    web, App, HttpServer,
};
use clap::Parser;
use log::{error, info};

use config::{Config, CorsOrigin, StoreKind};
use directory::UserDirectory;

mod config;
mod db;
mod directory;
mod error;
mod models;
mod password;
mod services;
mod validator;
mod views;

fn prepare_database_dir(config: &Config) -> io::Result<()> {
    if config.store != StoreKind::Sqlite || config.database == ":memory:" {
        return Ok(());
    }
    match Path::new(&config.database).parent() {
        Some(dir) if !dir.as_os_str().is_empty() => fs::create_dir_all(dir),
        _ => Ok(()),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::formatted_builder()
        .parse_filters(&env::var("RUST_LOG").unwrap_or_else(|_| "info".to_owned()))
        .init();

    let config = Config::parse();
    prepare_database_dir(&config)?;

    let store = config.open_store().map_err(|why| {
        error!("Error opening store {}: {}", config.database, why);
        io::Error::new(io::ErrorKind::Other, why)
    })?;
    let directory = UserDirectory::new(store)
        .with_password_encoder(config.password_storage.encoder())
        .with_email_policy(config.email_policy);
    let directory = web::Data::new(directory);

    info!(
        "Serving users on {}:{} ({:?} store, {:?} passwords, {:?} emails)",
        config.host, config.port, config.store, config.password_storage, config.email_policy
    );

    let cors_origin = config.cors().map_err(|why| {
        error!("{}", why);
        io::Error::new(io::ErrorKind::InvalidInput, why)
    })?;
    HttpServer::new(move || {
        let cors = match &cors_origin {
            Some(origin) => {
                let cors = match origin {
                    CorsOrigin::Any => Cors::default().allow_any_origin(),
                    CorsOrigin::Exact(o) => Cors::default().allowed_origin(o),
                };
                cors.allowed_methods(vec!["GET", "POST", "DELETE"])
                    .allow_any_header()
            }
            None => Cors::default(),
        };

        App::new()
            .app_data(directory.clone())
            .wrap(Condition::new(cors_origin.is_some(), cors))
            .wrap(Logger::default())
            .configure(services::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
