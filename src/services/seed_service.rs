//! Demo catalog for a fresh database: the UNAS event programme with a few
//! participants, their payments, attendance and certificates.

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::SqlitePool;
use tracing::info;

use crate::database::{
    activity_repo, attendance_repo, certificate_repo, inscription_repo, payment_repo, user_repo,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    ActivityStatus, ActivityType, CertificateStatus, InscriptionStatus, PaymentMethod,
    PaymentStatus, Role,
};
use crate::services::auth_service;

pub const DEMO_PASSWORD: &str = "sigea2024";

#[derive(Debug, Default, Serialize)]
pub struct SeedReport {
    pub omitido: bool,
    pub usuarios: usize,
    pub actividades: usize,
    pub inscripciones: usize,
    pub pagos: usize,
    pub asistencias: usize,
    pub certificados: usize,
}

struct DemoUser {
    nombres: &'static str,
    apellidos: &'static str,
    correo: &'static str,
    telefono: &'static str,
    dni: &'static str,
    rol: Role,
}

const USERS: &[DemoUser] = &[
    DemoUser {
        nombres: "Admin",
        apellidos: "SIGEA",
        correo: "admin@unas.edu.pe",
        telefono: "962000000",
        dni: "70000000",
        rol: Role::Admin,
    },
    DemoUser {
        nombres: "Juan",
        apellidos: "García López",
        correo: "juan.garcia@unas.edu.pe",
        telefono: "987654321",
        dni: "12345678",
        rol: Role::Participante,
    },
    DemoUser {
        nombres: "María",
        apellidos: "Rodriguez",
        correo: "maria.rodriguez@unas.edu.pe",
        telefono: "987111222",
        dni: "87654321",
        rol: Role::Participante,
    },
    DemoUser {
        nombres: "Carlos",
        apellidos: "López Fernández",
        correo: "carlos.lopez@unas.edu.pe",
        telefono: "987333444",
        dni: "45678912",
        rol: Role::Participante,
    },
    DemoUser {
        nombres: "Ana",
        apellidos: "Fernández",
        correo: "ana.fernandez@unas.edu.pe",
        telefono: "987555666",
        dni: "98765432",
        rol: Role::Participante,
    },
    DemoUser {
        nombres: "Pedro",
        apellidos: "Sánchez",
        correo: "pedro.sanchez@unas.edu.pe",
        telefono: "987777888",
        dni: "11223344",
        rol: Role::Participante,
    },
];

struct DemoActivity {
    titulo: &'static str,
    descripcion: &'static str,
    fecha_inicio: &'static str,
    fecha_fin: &'static str,
    lugar: &'static str,
    tipo: ActivityType,
    estado: ActivityStatus,
    capacidad: i64,
    inscritos: i64,
}

const ACTIVITIES: &[DemoActivity] = &[
    DemoActivity {
        titulo: "Conferencia: IA en la Educación",
        descripcion: "Explora cómo la inteligencia artificial está transformando el sector educativo",
        fecha_inicio: "2024-03-15",
        fecha_fin: "2024-03-15",
        lugar: "Auditorio Central",
        tipo: ActivityType::Conferencia,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 200,
        inscritos: 156,
    },
    DemoActivity {
        titulo: "Taller de Desarrollo Web",
        descripcion: "Aprende las mejores prácticas en desarrollo web con tecnologías modernas",
        fecha_inicio: "2024-03-22",
        fecha_fin: "2024-03-24",
        lugar: "Sala 101",
        tipo: ActivityType::Taller,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 50,
        inscritos: 48,
    },
    DemoActivity {
        titulo: "Diplomado en Agricultura Sostenible",
        descripcion: "Programa completo para dominar técnicas de agricultura sostenible",
        fecha_inicio: "2024-03-30",
        fecha_fin: "2024-06-30",
        lugar: "Centro de Capacitación",
        tipo: ActivityType::Diplomado,
        estado: ActivityStatus::EnEjecucion,
        capacidad: 100,
        inscritos: 87,
    },
    DemoActivity {
        titulo: "Workshop: Transformación Digital",
        descripcion: "Descubre estrategias para transformar digitalmente tu organización",
        fecha_inicio: "2024-04-10",
        fecha_fin: "2024-04-10",
        lugar: "Sala 201",
        tipo: ActivityType::Workshop,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 80,
        inscritos: 72,
    },
    DemoActivity {
        titulo: "Conferencia: Investigación Científica",
        descripcion: "Tendencias actuales en investigación científica en UNAS",
        fecha_inicio: "2024-02-05",
        fecha_fin: "2024-02-05",
        lugar: "Auditorio Central",
        tipo: ActivityType::Conferencia,
        estado: ActivityStatus::Finalizado,
        capacidad: 150,
        inscritos: 150,
    },
    DemoActivity {
        titulo: "Taller de Fotografía Digital",
        descripcion: "Domina las técnicas de fotografía digital y edición de imágenes",
        fecha_inicio: "2024-02-12",
        fecha_fin: "2024-02-14",
        lugar: "Sala 102",
        tipo: ActivityType::Taller,
        estado: ActivityStatus::Finalizado,
        capacidad: 40,
        inscritos: 40,
    },
    DemoActivity {
        titulo: "Workshop: Marketing Digital",
        descripcion: "Estrategias efectivas de marketing para tu negocio",
        fecha_inicio: "2024-04-20",
        fecha_fin: "2024-04-20",
        lugar: "Sala 202",
        tipo: ActivityType::Workshop,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 60,
        inscritos: 55,
    },
    DemoActivity {
        titulo: "Taller: Python para Data Science",
        descripcion: "Aprende Python y librerías especializadas para análisis de datos",
        fecha_inicio: "2024-04-25",
        fecha_fin: "2024-04-27",
        lugar: "Laboratorio 1",
        tipo: ActivityType::Taller,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 45,
        inscritos: 42,
    },
    DemoActivity {
        titulo: "Diplomado: Gestión Ambiental",
        descripcion: "Certificación en gestión ambiental empresarial",
        fecha_inicio: "2024-05-01",
        fecha_fin: "2024-08-01",
        lugar: "Centro de Capacitación",
        tipo: ActivityType::Diplomado,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 120,
        inscritos: 95,
    },
    DemoActivity {
        titulo: "Conferencia: Sostenibilidad Agrícola",
        descripcion: "Perspectivas sobre agricultura sostenible en el Perú",
        fecha_inicio: "2024-02-28",
        fecha_fin: "2024-02-28",
        lugar: "Auditorio Central",
        tipo: ActivityType::Conferencia,
        estado: ActivityStatus::Finalizado,
        capacidad: 180,
        inscritos: 180,
    },
    DemoActivity {
        titulo: "Workshop: Liderazgo Organizacional",
        descripcion: "Desarrolla habilidades de liderazgo para equipos modernos",
        fecha_inicio: "2024-05-15",
        fecha_fin: "2024-05-15",
        lugar: "Sala 301",
        tipo: ActivityType::Workshop,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 70,
        inscritos: 60,
    },
    DemoActivity {
        titulo: "Taller: Diseño Gráfico Profesional",
        descripcion: "Aprende diseño gráfico con herramientas profesionales",
        fecha_inicio: "2024-05-22",
        fecha_fin: "2024-05-24",
        lugar: "Sala 103",
        tipo: ActivityType::Taller,
        estado: ActivityStatus::PlazoRegistro,
        capacidad: 35,
        inscritos: 28,
    },
];

struct DemoPayment {
    monto: f64,
    metodo: PaymentMethod,
    estado: PaymentStatus,
    comprobante: &'static str,
    fecha_pago: Option<&'static str>,
}

struct DemoAttendance {
    sesion: &'static str,
    presente: bool,
    certificado: Option<(&'static str, CertificateStatus, Option<&'static str>)>,
}

/// Indexes into `USERS` and `ACTIVITIES`, plus what hangs off the
/// inscription.
struct DemoInscription {
    usuario: usize,
    actividad: usize,
    estado: InscriptionStatus,
    pago: Option<DemoPayment>,
    asistencia: Option<DemoAttendance>,
}

const INSCRIPTIONS: &[DemoInscription] = &[
    DemoInscription {
        usuario: 1,
        actividad: 0,
        estado: InscriptionStatus::Completada,
        pago: Some(DemoPayment {
            monto: 50.0,
            metodo: PaymentMethod::Card,
            estado: PaymentStatus::Pagado,
            comprobante: "TRX-2024-001",
            fecha_pago: Some("2024-03-11"),
        }),
        asistencia: Some(DemoAttendance {
            sesion: "Sesión 1",
            presente: true,
            certificado: Some(("CERT-2024-001", CertificateStatus::Emitido, Some("2024-03-16"))),
        }),
    },
    DemoInscription {
        usuario: 2,
        actividad: 1,
        estado: InscriptionStatus::Confirmada,
        pago: Some(DemoPayment {
            monto: 100.0,
            metodo: PaymentMethod::Transfer,
            estado: PaymentStatus::Pagado,
            comprobante: "TRX-2024-002",
            fecha_pago: Some("2024-03-16"),
        }),
        asistencia: None,
    },
    DemoInscription {
        usuario: 2,
        actividad: 0,
        estado: InscriptionStatus::Confirmada,
        pago: None,
        asistencia: Some(DemoAttendance {
            sesion: "Sesión 1",
            presente: true,
            certificado: Some(("CERT-2024-002", CertificateStatus::Pendiente, None)),
        }),
    },
    DemoInscription {
        usuario: 3,
        actividad: 2,
        estado: InscriptionStatus::Pendiente,
        pago: Some(DemoPayment {
            monto: 200.0,
            metodo: PaymentMethod::Transfer,
            estado: PaymentStatus::Pendiente,
            comprobante: "TRX-2024-003",
            fecha_pago: None,
        }),
        asistencia: Some(DemoAttendance {
            sesion: "Semana 1",
            presente: true,
            certificado: Some(("CERT-2024-003", CertificateStatus::Emitido, Some("2024-04-20"))),
        }),
    },
    DemoInscription {
        usuario: 4,
        actividad: 3,
        estado: InscriptionStatus::Pendiente,
        pago: Some(DemoPayment {
            monto: 75.0,
            metodo: PaymentMethod::Card,
            estado: PaymentStatus::Rechazado,
            comprobante: "TRX-2024-004",
            fecha_pago: Some("2024-03-20"),
        }),
        asistencia: None,
    },
    DemoInscription {
        usuario: 4,
        actividad: 1,
        estado: InscriptionStatus::Confirmada,
        pago: None,
        asistencia: Some(DemoAttendance {
            sesion: "Día 1",
            presente: false,
            certificado: Some(("CERT-2024-004", CertificateStatus::Rechazado, Some("2024-04-22"))),
        }),
    },
    DemoInscription {
        usuario: 5,
        actividad: 1,
        estado: InscriptionStatus::Completada,
        pago: None,
        asistencia: Some(DemoAttendance {
            sesion: "Día 1",
            presente: true,
            certificado: Some(("CERT-2024-005", CertificateStatus::Emitido, Some("2024-03-25"))),
        }),
    },
];

fn date(raw: &str) -> AppResult<NaiveDate> {
    raw.parse()
        .map_err(|e| AppError::Internal(format!("bad demo date {raw:?}: {e}").into()))
}

/// Loads the demo catalog unless the database already has activities.
pub async fn seed_demo_data(pool: &SqlitePool) -> AppResult<SeedReport> {
    if activity_repo::count_catalog(pool, None, None).await? > 0 {
        info!("Activities already present, skipping demo data");
        return Ok(SeedReport {
            omitido: true,
            ..SeedReport::default()
        });
    }

    let mut report = SeedReport::default();
    let password_hash = auth_service::hash_password(DEMO_PASSWORD)?;

    let mut user_ids = Vec::with_capacity(USERS.len());
    for u in USERS {
        let id = user_repo::insert_user(
            pool,
            user_repo::NewUser {
                nombres: u.nombres,
                apellidos: u.apellidos,
                correo: u.correo,
                telefono: Some(u.telefono),
                dni: Some(u.dni),
                rol: u.rol,
                password_hash: &password_hash,
            },
        )
        .await?;
        user_ids.push(id);
    }
    report.usuarios = user_ids.len();

    let mut activity_ids = Vec::with_capacity(ACTIVITIES.len());
    for a in ACTIVITIES {
        let id = activity_repo::insert_activity(
            pool,
            activity_repo::NewActivity {
                titulo: a.titulo,
                descripcion: Some(a.descripcion),
                fecha_inicio: date(a.fecha_inicio)?,
                fecha_fin: date(a.fecha_fin)?,
                lugar: Some(a.lugar),
                tipo: a.tipo,
                estado: a.estado,
                capacidad: a.capacidad,
                inscritos: a.inscritos,
                organizador_id: user_ids.first().copied(),
                responsable: Some("Oficina de Extensión Universitaria"),
            },
        )
        .await?;
        activity_ids.push(id);
    }
    report.actividades = activity_ids.len();

    for ins in INSCRIPTIONS {
        // The demo headcounts in `inscritos` already include these rows.
        let id_inscripcion = inscription_repo::insert_inscription(
            &mut *pool.acquire().await?,
            user_ids[ins.usuario],
            activity_ids[ins.actividad],
            ins.estado,
        )
        .await?;
        report.inscripciones += 1;

        if let Some(p) = &ins.pago {
            payment_repo::insert_payment(
                pool,
                payment_repo::NewPayment {
                    inscripcion_id: id_inscripcion,
                    monto: p.monto,
                    moneda: "PEN",
                    metodo: p.metodo,
                    estado: p.estado,
                    comprobante: Some(p.comprobante),
                    fecha_pago: p.fecha_pago.map(date).transpose()?,
                },
            )
            .await?;
            report.pagos += 1;
        }

        let Some(s) = &ins.asistencia else {
            continue;
        };
        let id_asistencia =
            attendance_repo::insert_attendance(pool, id_inscripcion, s.sesion, s.presente).await?;
        report.asistencias += 1;

        if let Some((codigo, estado, emitido)) = s.certificado {
            certificate_repo::insert_certificate(
                &mut *pool.acquire().await?,
                certificate_repo::NewCertificate {
                    codigo_validacion: codigo,
                    asistencia_id: id_asistencia,
                    estado,
                    fecha_emision: emitido.map(date).transpose()?,
                    url_pdf: None,
                },
            )
            .await?;
            report.certificados += 1;
        }
    }

    info!(
        "Seeded {} users, {} activities, {} inscriptions",
        report.usuarios, report.actividades, report.inscripciones
    );
    Ok(report)
}
