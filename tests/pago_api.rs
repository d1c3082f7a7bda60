mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

async fn inscription(app: &TestApp, correo: &str) -> i64 {
    let id = app.create_activity("Diplomado en Agricultura Sostenible", 100, "plazo_registro").await;
    let token = app.signup(correo).await;
    let res = app.register(&token, id).await;
    assert_eq!(res.status, StatusCode::CREATED);
    res.body["id_inscripcion"].as_i64().unwrap()
}

#[tokio::test]
async fn empty_ledger_reports_zero_coverage() {
    let app = TestApp::new().await;
    let res = app.get("/api/pago").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["pagos"].as_array().unwrap().len(), 0);
    assert_eq!(res.body["resumen"]["porcentaje_cobertura"], 0.0);
}

#[tokio::test]
async fn manual_payment_is_settled_today() {
    let app = TestApp::new().await;
    let inscripcion_id = inscription(&app, "juan@unas.edu.pe").await;

    let res = app
        .post(
            "/api/pago",
            json!({
                "inscripcion_id": inscripcion_id,
                "monto": 150.0,
                "metodo": "cash",
                "comprobante": "REC-0001"
            }),
        )
        .await;
    assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
    assert_eq!(res.body["estado"], "pagado");
    assert_eq!(res.body["moneda"], "PEN");
    assert_eq!(
        res.body["fecha_pago"],
        chrono::Local::now().date_naive().to_string()
    );
    assert_eq!(res.body["correo"], "juan@unas.edu.pe");

    let res = app
        .post("/api/pago", json!({ "inscripcion_id": 9999, "monto": 10.0, "metodo": "yape" }))
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn wallet_methods_accept_capitalized_names() {
    let app = TestApp::new().await;
    let inscripcion_id = inscription(&app, "ana@unas.edu.pe").await;

    for (metodo, stored) in [("Yape", "yape"), ("Plin", "plin")] {
        let res = app
            .post(
                "/api/pago",
                json!({ "inscripcion_id": inscripcion_id, "monto": 30.0, "metodo": metodo }),
            )
            .await;
        assert_eq!(res.status, StatusCode::CREATED, "{}", res.body);
        assert_eq!(res.body["metodo"], stored);
    }

    let res = app
        .post(
            "/api/pago",
            json!({ "inscripcion_id": inscripcion_id, "monto": 30.0, "metodo": "Bitcoin" }),
        )
        .await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn filtered_ledger_keeps_the_full_summary() {
    let app = TestApp::new().await;
    let inscripcion_id = inscription(&app, "pedro@unas.edu.pe").await;

    for (monto, estado) in [(100.0, "pagado"), (100.0, "pendiente")] {
        sqlx::query(
            "INSERT INTO pago (inscripcion_id, monto, metodo, estado) VALUES (?, ?, 'cash', ?)",
        )
        .bind(inscripcion_id)
        .bind(monto)
        .bind(estado)
        .execute(&app.pool)
        .await
        .unwrap();
    }

    let res = app.get("/api/pago?estado=pagado").await;
    assert_eq!(res.status, StatusCode::OK);
    let rows = res.body["pagos"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["estado"], "pagado");
    assert_eq!(res.body["resumen"]["pendientes"], 1);
    assert_eq!(res.body["resumen"]["porcentaje_cobertura"], 50.0);
}

#[tokio::test]
async fn settled_payment_cannot_go_back_to_pending() {
    let app = TestApp::new().await;
    let inscripcion_id = inscription(&app, "maria@unas.edu.pe").await;
    let res = app
        .post(
            "/api/pago",
            json!({ "inscripcion_id": inscripcion_id, "monto": 100.0, "metodo": "transfer" }),
        )
        .await;
    let id = res.body["id_pago"].as_i64().unwrap();

    let res = app
        .put(&format!("/api/pago/{id}/estado"), json!({ "estado": "pendiente" }))
        .await;
    assert_eq!(res.status, StatusCode::CONFLICT);
    assert_eq!(app.get(&format!("/api/pago/{id}")).await.body["estado"], "pagado");
}

#[tokio::test]
async fn pending_payment_settles_and_ledger_totals() {
    let app = TestApp::new().await;
    let inscripcion_id = inscription(&app, "carlos@unas.edu.pe").await;

    for (monto, estado) in [(200.0, "pendiente"), (50.0, "pagado"), (75.0, "rechazado")] {
        sqlx::query(
            "INSERT INTO pago (inscripcion_id, monto, metodo, estado) VALUES (?, ?, 'card', ?)",
        )
        .bind(inscripcion_id)
        .bind(monto)
        .bind(estado)
        .execute(&app.pool)
        .await
        .unwrap();
    }

    let ledger = app.get("/api/pago").await;
    assert_eq!(ledger.body["resumen"]["total_recaudado"], 50.0);
    assert_eq!(ledger.body["resumen"]["total_pendiente"], 200.0);
    assert_eq!(ledger.body["resumen"]["total_rechazado"], 75.0);
    assert_eq!(ledger.body["resumen"]["porcentaje_cobertura"], 20.0);

    let pending = app.get("/api/pago?estado=pendiente").await;
    let rows = pending.body["pagos"].as_array().unwrap();
    assert_eq!(rows.len(), 1);
    let id = rows[0]["id_pago"].as_i64().unwrap();

    let res = app
        .put(&format!("/api/pago/{id}/estado"), json!({ "estado": "pagado" }))
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["estado"], "pagado");
    assert!(res.body["fecha_pago"].is_string());

    let ledger = app.get("/api/pago").await;
    assert_eq!(ledger.body["resumen"]["total_recaudado"], 250.0);
    assert_eq!(ledger.body["resumen"]["porcentaje_cobertura"], 100.0);
}
