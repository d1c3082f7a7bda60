#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use sigea::config::Config;
use sigea::database::{self, MIGRATOR};
use sigea::web::{self, AppState};

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestApp {
    pub async fn new() -> Self {
        let config = Config::default();
        let pool = database::connect(&config).await.expect("in-memory pool");
        MIGRATOR.run(&pool).await.expect("migrations");
        let router = web::router(AppState::new(pool.clone(), config));
        TestApp { router, pool }
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body), None).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None, None).await
    }

    /// Creates an activity and returns its id.
    pub async fn create_activity(&self, titulo: &str, capacidad: i64, estado: &str) -> i64 {
        let res = self
            .post(
                "/api/actividad",
                json!({
                    "titulo": titulo,
                    "descripcion": "Actividad de prueba",
                    "fecha_inicio": "2024-03-15",
                    "fecha_fin": "2024-03-16",
                    "lugar": "Auditorio Central",
                    "tipo": "Conferencia",
                    "estado": estado,
                    "capacidad": capacidad
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["id_actividad"].as_i64().unwrap()
    }

    /// Signs a participant up and returns their session token.
    pub async fn signup(&self, correo: &str) -> String {
        let res = self
            .post(
                "/api/auth/registro",
                json!({
                    "nombres": "Juan",
                    "apellidos": "García López",
                    "correo": correo,
                    "telefono": "987 654 321",
                    "dni": "12345678",
                    "password": "secreto1",
                    "confirm_password": "secreto1"
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        res.body["token"].as_str().unwrap().to_string()
    }

    pub async fn register(&self, token: &str, id_actividad: i64) -> TestResponse {
        self.send(
            Method::POST,
            &format!("/api/actividad/{id_actividad}/inscripcion"),
            None,
            Some(token),
        )
        .await
    }
}
