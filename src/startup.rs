use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use actix_web_lab::middleware::from_fn;
use anyhow::Context;
use reqwest::Url;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use tracing_actix_web::TracingLogger;

use crate::authentication::{require_session, SessionVerifier};
use crate::config::{DatabaseSettings, Settings};
use crate::routes::{
    analytics_summary, check_access, check_credits, current_session, health_check, home,
    list_calendar_events, list_emails, list_newsletters,
};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let connection_pool = get_connection_pool(&config.database);

        let verification_timeout = config.auth_client.timeout();
        let session_verifier = SessionVerifier::new(
            Url::parse(&config.auth_client.base_url)
                .context("Invalid identity authority base URL")?,
            config.auth_client.api_key,
            verification_timeout,
        );

        let listener = TcpListener::bind(config.application.addr())?;
        let port = listener.local_addr()?.port();

        let server = run(listener, connection_pool, session_verifier)?;

        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    db_pool: PgPool,
    session_verifier: SessionVerifier,
) -> std::io::Result<Server> {
    let db_pool = web::Data::new(db_pool);
    let session_verifier = web::Data::new(session_verifier);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(db_pool.clone())
            .app_data(session_verifier.clone())
            .route("/", web::get().to(home))
            .route("/health_check", web::get().to(health_check))
            .service(
                web::scope("/api")
                    .wrap(from_fn(require_session))
                    .route("/session", web::get().to(current_session))
                    .route("/emails", web::get().to(list_emails))
                    .route("/calendar/events", web::get().to(list_calendar_events))
                    .route("/newsletters", web::get().to(list_newsletters))
                    .route("/analytics/summary", web::get().to(analytics_summary))
                    .route("/users/access", web::get().to(check_access))
                    .route("/credits", web::get().to(check_credits)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

pub fn get_connection_pool(database: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .connect_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(database.connection_with_db())
}
