mod common;

use axum::http::StatusCode;
use common::TestApp;
use sigea::services::seed_service;

#[tokio::test]
async fn catalog_paginates_by_nine() {
    let app = TestApp::new().await;
    let report = seed_service::seed_demo_data(&app.pool).await.unwrap();
    assert_eq!(report.actividades, 12);

    let page1 = app.get("/api/eventos").await;
    assert_eq!(page1.status, StatusCode::OK);
    assert_eq!(page1.body["page"], 1);
    assert_eq!(page1.body["total_items"], 12);
    assert_eq!(page1.body["total_pages"], 2);
    assert_eq!(page1.body["eventos"].as_array().unwrap().len(), 9);

    let page2 = app.get("/api/eventos?page=2").await;
    assert_eq!(page2.body["eventos"].as_array().unwrap().len(), 3);

    let beyond = app.get("/api/eventos?page=7").await;
    assert_eq!(beyond.body["eventos"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn catalog_filters_by_type_and_status() {
    let app = TestApp::new().await;
    seed_service::seed_demo_data(&app.pool).await.unwrap();

    let talleres = app.get("/api/eventos?tipo=Taller&estado=todos").await;
    assert_eq!(talleres.body["total_items"], 4);
    for evento in talleres.body["eventos"].as_array().unwrap() {
        assert_eq!(evento["tipo"], "Taller");
    }

    let done = app.get("/api/eventos?tipo=todos&estado=finalizado").await;
    assert_eq!(done.body["total_items"], 3);
    for evento in done.body["eventos"].as_array().unwrap() {
        assert_eq!(evento["puede_inscribirse"], false);
        assert_eq!(evento["cupos_disponibles"], 0);
    }

    let res = app.get("/api/eventos?tipo=Seminario").await;
    assert_eq!(res.status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn event_detail_carries_capacity_accounting() {
    let app = TestApp::new().await;
    seed_service::seed_demo_data(&app.pool).await.unwrap();

    // Conferencia: IA en la Educación, 156 of 200.
    let res = app.get("/api/eventos/1").await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["cupos_disponibles"], 44);
    assert_eq!(res.body["porcentaje_ocupacion"], 78.0);
    assert_eq!(res.body["puede_inscribirse"], true);
    assert_eq!(res.body["organizador_nombre"], "Admin SIGEA");

    assert_eq!(app.get("/api/eventos/99").await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn seeding_twice_is_a_no_op() {
    let app = TestApp::new().await;
    seed_service::seed_demo_data(&app.pool).await.unwrap();
    let again = seed_service::seed_demo_data(&app.pool).await.unwrap();
    assert!(again.omitido);
    assert_eq!(app.get("/api/actividad").await.body.as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn demo_certificates_validate() {
    let app = TestApp::new().await;
    seed_service::seed_demo_data(&app.pool).await.unwrap();

    let ok = app.get("/api/certificado/validar/cert-2024-001").await;
    assert_eq!(ok.body["valido"], true);
    assert_eq!(ok.body["certificado"]["participante"], "Juan García López");

    let rejected = app.get("/api/certificado/validar/CERT-2024-004").await;
    assert_eq!(rejected.body["valido"], false);
    assert_eq!(rejected.body["certificado"]["estado"], "rechazado");
}
