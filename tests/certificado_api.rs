mod common;

use axum::http::StatusCode;
use chrono::Datelike;
use common::TestApp;
use serde_json::json;

/// Registers a participant and records one attendance; returns its id.
async fn attendance(app: &TestApp, correo: &str, presente: bool) -> i64 {
    let id = app.create_activity("Conferencia: IA en la Educación", 200, "plazo_registro").await;
    let token = app.signup(correo).await;
    let inscripcion_id = app.register(&token, id).await.body["id_inscripcion"]
        .as_i64()
        .unwrap();
    let res = app
        .post(
            "/api/asistencia",
            json!({ "inscripcion_id": inscripcion_id, "sesion": "Sesión 1", "presente": presente }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    res.body["id_asistencia"].as_i64().unwrap()
}

#[tokio::test]
async fn issued_certificate_validates_under_any_spelling() {
    let app = TestApp::new().await;
    let asistencia_id = attendance(&app, "juan@unas.edu.pe", true).await;

    let res = app
        .post("/api/certificado", json!({ "asistencia_id": asistencia_id }))
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    let year = chrono::Local::now().year();
    let codigo = res.body["codigo_validacion"].as_str().unwrap().to_string();
    assert_eq!(codigo, format!("CERT-{year}-001"));
    assert_eq!(res.body["estado"], "emitido");

    let lower = codigo.to_lowercase();
    let a = app.get(&format!("/api/certificado/validar/%20{lower}%20")).await;
    let b = app.get(&format!("/api/certificado/validar/{codigo}")).await;
    let c = app.get(&format!("/api/certificado/validar/{codigo}")).await;
    assert_eq!(a.status, StatusCode::OK);
    assert_eq!(a.body["valido"], true);
    assert_eq!(a.body, b.body);
    assert_eq!(b.body, c.body);
    assert_eq!(b.body["certificado"]["participante"], "Juan García López");
    assert_eq!(b.body["certificado"]["actividad"], "Conferencia: IA en la Educación");
}

#[tokio::test]
async fn unknown_code_echoes_normalized_code() {
    let app = TestApp::new().await;
    let res = app.get("/api/certificado/validar/cert-2024-999").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["valido"], false);
    assert_eq!(res.body["codigo"], "CERT-2024-999");
    assert!(res.body.get("certificado").is_none());
}

#[tokio::test]
async fn rejected_certificate_is_not_valid_but_is_shown() {
    let app = TestApp::new().await;
    let asistencia_id = attendance(&app, "ana@unas.edu.pe", true).await;
    sqlx::query(
        "INSERT INTO certificado (codigo_validacion, asistencia_id, estado, fecha_emision) \
         VALUES ('CERT-2024-004', ?, 'rechazado', '2024-04-22')",
    )
    .bind(asistencia_id)
    .execute(&app.pool)
    .await
    .unwrap();

    let res = app.get("/api/certificado/validar/CERT-2024-004").await;
    assert_eq!(res.body["valido"], false);
    assert_eq!(res.body["certificado"]["estado"], "rechazado");
}

#[tokio::test]
async fn issuance_rules() {
    let app = TestApp::new().await;
    let present = attendance(&app, "carlos@unas.edu.pe", true).await;
    let absent = attendance(&app, "pedro@unas.edu.pe", false).await;

    let first = app.post("/api/certificado", json!({ "asistencia_id": present })).await;
    assert_eq!(first.status, StatusCode::CREATED);

    let again = app.post("/api/certificado", json!({ "asistencia_id": present })).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.body["error"], "la asistencia ya tiene un certificado");

    let res = app.post("/api/certificado", json!({ "asistencia_id": absent })).await;
    assert_eq!(res.status, StatusCode::CONFLICT);

    let res = app.post("/api/certificado", json!({ "asistencia_id": 9999 })).await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);

    // Once toggled to present, the second attendance gets the next code.
    let toggled = app.put(&format!("/api/asistencia/{absent}/toggle"), json!({})).await;
    assert_eq!(toggled.body["presente"], true);
    let second = app.post("/api/certificado", json!({ "asistencia_id": absent })).await;
    assert_eq!(second.status, StatusCode::CREATED);
    let year = chrono::Local::now().year();
    assert_eq!(second.body["codigo_validacion"], format!("CERT-{year}-002"));

    let stats = app.get("/api/certificado/estadisticas").await;
    assert_eq!(stats.body["total"], 2);
    assert_eq!(stats.body["emitidos"], 2);
    assert_eq!(stats.body["rechazados"], 0);

    let listed = app.get("/api/certificado?estado=emitido").await;
    assert_eq!(listed.body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn concurrent_issuance_hands_out_distinct_codes() {
    let app = TestApp::new().await;
    let mut asistencias = Vec::new();
    for n in 0..5 {
        asistencias.push(attendance(&app, &format!("asistente{n}@unas.edu.pe"), true).await);
    }

    let mut handles = Vec::new();
    for asistencia_id in asistencias {
        let router = app.router.clone();
        let pool = app.pool.clone();
        handles.push(tokio::spawn(async move {
            let app = TestApp { router, pool };
            app.post("/api/certificado", json!({ "asistencia_id": asistencia_id })).await
        }));
    }

    let mut codes = Vec::new();
    for handle in handles {
        let res = handle.await.unwrap();
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        codes.push(res.body["codigo_validacion"].as_str().unwrap().to_string());
    }
    codes.sort();
    codes.dedup();
    assert_eq!(codes.len(), 5);

    let year = chrono::Local::now().year();
    assert!(codes.contains(&format!("CERT-{year}-005")));
}
