mod common;

use axum::http::{Method, StatusCode};
use common::TestApp;

async fn inscritos(app: &TestApp, id: i64) -> i64 {
    app.get(&format!("/api/actividad/{id}")).await.body["inscritos"]
        .as_i64()
        .unwrap()
}

#[tokio::test]
async fn registration_requires_a_session() {
    let app = TestApp::new().await;
    let id = app.create_activity("Conferencia: IA en la Educación", 10, "plazo_registro").await;

    let res = app
        .send(Method::POST, &format!("/api/actividad/{id}/inscripcion"), None, None)
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert!(res.body["error"].is_string());

    let res = app.register("token-inventado", id).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(inscritos(&app, id).await, 0);
}

#[tokio::test]
async fn registering_takes_a_spot_once() {
    let app = TestApp::new().await;
    let id = app.create_activity("Taller: Python para Data Science", 2, "plazo_registro").await;
    let token = app.signup("juan@unas.edu.pe").await;

    let res = app.register(&token, id).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["actividad_id"], id);
    assert_eq!(res.body["estado"], "confirmada");
    assert_eq!(res.body["correo"], "juan@unas.edu.pe");
    assert_eq!(inscritos(&app, id).await, 1);

    let res = app.register(&token, id).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(inscritos(&app, id).await, 1);

    let list = app.get(&format!("/api/inscripcion?actividad_id={id}")).await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn full_activity_rejects_and_keeps_count() {
    let app = TestApp::new().await;
    let id = app.create_activity("Taller de Fotografía Digital", 1, "plazo_registro").await;
    let first = app.signup("primero@unas.edu.pe").await;
    let second = app.signup("segundo@unas.edu.pe").await;

    assert_eq!(app.register(&first, id).await.status, StatusCode::CREATED);

    let res = app.register(&second, id).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert!(res.body["error"].as_str().unwrap().contains("cupos"));
    assert_eq!(inscritos(&app, id).await, 1);
}

#[tokio::test]
async fn deleting_a_participant_frees_their_spot() {
    let app = TestApp::new().await;
    let id = app.create_activity("Taller de Fotografía Digital", 1, "plazo_registro").await;
    let other = app.create_activity("Seminario de Investigación", 5, "plazo_registro").await;
    let leaving = app.signup("saliente@unas.edu.pe").await;
    let staying = app.signup("entrante@unas.edu.pe").await;

    assert_eq!(app.register(&leaving, id).await.status, StatusCode::CREATED);
    assert_eq!(app.register(&leaving, other).await.status, StatusCode::CREATED);
    assert_eq!(app.register(&staying, other).await.status, StatusCode::CREATED);

    let me = app.send(Method::GET, "/api/auth/me", None, Some(&leaving)).await;
    let id_usuario = me.body["id_usuario"].as_i64().unwrap();
    let res = app.delete(&format!("/api/usuario/{id_usuario}")).await;
    assert_eq!(res.status, StatusCode::OK);

    assert_eq!(inscritos(&app, id).await, 0);
    assert_eq!(inscritos(&app, other).await, 1);
    let res = app.get(&format!("/api/actividad/{id}")).await;
    assert_eq!(res.body["cupos_disponibles"], 1);

    let res = app.register(&staying, id).await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(inscritos(&app, id).await, 1);
}

#[tokio::test]
async fn closed_or_missing_activity() {
    let app = TestApp::new().await;
    let closed = app.create_activity("Conferencia: Sostenibilidad Agrícola", 50, "finalizado").await;
    let token = app.signup("ana@unas.edu.pe").await;

    let res = app.register(&token, closed).await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert!(res.body["error"].as_str().unwrap().contains("no acepta"));
    assert_eq!(inscritos(&app, closed).await, 0);

    let res = app.register(&token, 9999).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn concurrent_registrations_never_exceed_capacity() {
    let app = TestApp::new().await;
    let capacity = 3;
    let id = app.create_activity("Workshop: Liderazgo Organizacional", capacity, "plazo_registro").await;

    let mut tokens = Vec::new();
    for n in 0..8 {
        tokens.push(app.signup(&format!("participante{n}@unas.edu.pe")).await);
    }

    let mut handles = Vec::new();
    for token in tokens {
        let router = app.router.clone();
        let pool = app.pool.clone();
        handles.push(tokio::spawn(async move {
            let app = TestApp { router, pool };
            app.register(&token, id).await.status
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => {}
            other => panic!("unexpected status {other}"),
        }
    }

    assert_eq!(created, capacity);
    assert_eq!(inscritos(&app, id).await, capacity);
}
