//! Repository behavior against a mock backend

use std::sync::Arc;

use agenda_client::forms::BusinessForm;
use agenda_client::messages::Action;
use agenda_client::{
    AgendaClient, ClientConfig, ErrorKind, Form, FormContext, Level, NotificationCenter, Session,
};
use httpmock::prelude::*;
use serde_json::json;
use shared::{ClientPayload, ProfessionalPayload};

fn setup(server: &MockServer, session: Session) -> (AgendaClient, NotificationCenter) {
    let config = ClientConfig::new(server.url("/api")).with_business_id("b1");
    let center = NotificationCenter::new();
    let client = AgendaClient::with_session(config, session, Arc::new(center.clone())).unwrap();
    (client, center)
}

fn appointment_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "service": {"_id": "s1", "name": "Corte"},
        "professional": {"_id": "p1", "name": "Laura"},
        "client": {"_id": "c1", "name": "Juan"},
        "start": "2030-03-03T12:00:00.000Z",
        "status": status
    })
}

#[tokio::test]
async fn test_unauthorized_clears_token() {
    let server = MockServer::start();
    let rejected = server.mock(|when, then| {
        when.method(GET)
            .path("/api/clients")
            .header("authorization", "Bearer expired");
        then.status(401).json_body(json!({"msg": "Token inválido"}));
    });
    let anonymous = server.mock(|when, then| {
        when.method(GET)
            .path("/api/services")
            .header_missing("authorization");
        then.status(200).json_body(json!({"services": []}));
    });

    let session = Session::in_memory();
    session.set_token(Some("expired")).unwrap();
    let (client, _) = setup(&server, session.clone());

    let err = client.clients.list().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Authentication);
    assert_eq!(err.user_message("fallback"), "Token inválido");
    assert!(!session.is_authenticated());
    rejected.assert();

    let services = client.services.list().await.unwrap();
    assert!(services.is_empty());
    anonymous.assert();
}

#[tokio::test]
async fn test_create_invalidates_list_and_injects_business() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/clients");
        then.status(200).json_body(json!({
            "clients": [{"_id": "c1", "name": "Juan Pérez"}]
        }));
    });
    let create = server.mock(|when, then| {
        when.method(POST)
            .path("/api/clients")
            .json_body(json!({"name": "Ana", "phone": "1155667788", "business": "b1"}));
        then.status(201)
            .json_body(json!({"ok": true, "msg": "Cliente creado", "client": {"_id": "c2"}}));
    });

    let (client, toasts) = setup(&server, Session::in_memory());

    assert_eq!(client.clients.list().await.unwrap().len(), 1);
    client.clients.list().await.unwrap();
    assert_eq!(list.calls(), 1);

    let created = client
        .clients
        .create(ClientPayload {
            name: "Ana".into(),
            phone: Some("1155667788".into()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(created.ok, Some(true));
    assert!(created.data.contains_key("client"));
    create.assert();

    let notification = toasts.last().unwrap();
    assert_eq!(notification.level, Level::Success);
    assert_eq!(notification.message, "Cliente creado");

    client.clients.list().await.unwrap();
    assert_eq!(list.calls(), 2);
    assert!(!client.clients.is_pending(Action::Create));
}

#[tokio::test]
async fn test_failed_mutation_toasts_backend_message() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/appointments");
        then.status(200)
            .json_body(json!({"appointments": [appointment_json("a1", "confirmed")]}));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/appointments/a1");
        then.status(409).json_body(json!({"msg": "El turno ya fue facturado"}));
    });
    server.mock(|when, then| {
        when.method(DELETE).path("/api/appointments/a2");
        then.status(500);
    });

    let (client, toasts) = setup(&server, Session::in_memory());
    client.appointments.list().await.unwrap();

    let err = client.appointments.delete("a1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    let notification = toasts.last().unwrap();
    assert_eq!(notification.level, Level::Error);
    assert_eq!(notification.message, "El turno ya fue facturado");

    client.appointments.delete("a2").await.unwrap_err();
    assert_eq!(toasts.last().unwrap().message, "No se pudo eliminar el turno");

    // failures keep the cached list
    client.appointments.list().await.unwrap();
    assert_eq!(list.calls(), 1);
}

#[tokio::test]
async fn test_cancel_twice_refetches_each_time() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/appointments");
        then.status(200)
            .json_body(json!({"appointments": [appointment_json("a1", "cancelled")]}));
    });
    let cancel = server.mock(|when, then| {
        when.method(PATCH).path("/api/appointments/a1/cancel");
        then.status(200).json_body(json!({"ok": true}));
    });

    let (client, toasts) = setup(&server, Session::in_memory());

    for _ in 0..2 {
        client.appointments.cancel("a1").await.unwrap();
        let listed = client.appointments.list().await.unwrap();
        assert_eq!(listed[0].id, "a1");
        assert!(listed[0].is_cancelled());
    }

    assert_eq!(cancel.calls(), 2);
    assert_eq!(list.calls(), 2);
    let messages: Vec<_> = toasts.drain().into_iter().map(|n| n.message).collect();
    assert_eq!(messages, ["Turno cancelado", "Turno cancelado"]);
}

#[tokio::test]
async fn test_appointment_create_defaults_and_filter() {
    let server = MockServer::start();
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/appointments").json_body(json!({
            "service": "s1",
            "professional": "p1",
            "client": "c1",
            "start": "2030-03-03T12:00:00.000Z",
            "status": "confirmed",
            "source": "manual"
        }));
        then.status(201).json_body(json!({"ok": true}));
    });
    server.mock(|when, then| {
        when.method(GET).path("/api/appointments");
        then.status(200).json_body(json!({"appointments": [
            appointment_json("a1", "confirmed"),
            {
                "_id": "a2",
                "service": "s1",
                "professional": "p2",
                "client": "c1",
                "start": "2030-03-03T13:00:00.000Z",
                "status": "pending"
            }
        ]}));
    });

    let (client, _) = setup(&server, Session::in_memory());
    client
        .appointments
        .create(shared::AppointmentPayload {
            service: "s1".into(),
            professional: "p1".into(),
            client: "c1".into(),
            start: "2030-03-03T12:00:00.000Z".into(),
            end: None,
            status: None,
            source: None,
            notes: None,
        })
        .await
        .unwrap();
    create.assert();

    let mine = client.appointments.for_professional("p2").await.unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].id, "a2");
}

#[tokio::test]
async fn test_professional_create_returns_temp_password() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/api/professionals");
        then.status(201).json_body(json!({
            "ok": true,
            "professional": {"_id": "p9", "name": "Laura", "services": ["s1"]},
            "tempPassword": "x7Kp2q"
        }));
    });

    let (client, toasts) = setup(&server, Session::in_memory());
    let created = client
        .professionals
        .create(ProfessionalPayload {
            name: "Laura".into(),
            services: vec!["s1".into()],
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(created.temp_password.as_deref(), Some("x7Kp2q"));
    assert_eq!(created.professional.unwrap().id, "p9");
    assert_eq!(toasts.last().unwrap().message, "Profesional creado");
}

#[tokio::test]
async fn test_business_update_invalidates_my_business() {
    let server = MockServer::start();
    let me = server.mock(|when, then| {
        when.method(GET).path("/api/business/me");
        then.status(200).json_body(json!({
            "business": {"_id": "b1", "name": "Centro", "appointmentIntervalMin": 15}
        }));
    });
    let by_id = server.mock(|when, then| {
        when.method(GET).path("/api/business/b1");
        then.status(200)
            .json_body(json!({"business": {"_id": "b1", "name": "Centro"}}));
    });
    server.mock(|when, then| {
        when.method(PUT).path("/api/business/b1");
        then.status(200).json_body(json!({"ok": true}));
    });

    let (client, _) = setup(&server, Session::in_memory());

    let business = client.businesses.mine().await.unwrap().unwrap();
    assert_eq!(business.appointment_interval_min, 15);
    client.businesses.mine().await.unwrap();
    client.businesses.get("b1").await.unwrap();
    client.businesses.get("b1").await.unwrap();
    assert_eq!(me.calls(), 1);
    assert_eq!(by_id.calls(), 1);

    let ctx = FormContext::new(client.locale(), client.timezone());
    let payload = BusinessForm::from_business(&business).validate(&ctx).unwrap();
    client.businesses.update("b1", &payload).await.unwrap();

    client.businesses.mine().await.unwrap();
    client.businesses.get("b1").await.unwrap();
    assert_eq!(me.calls(), 2);
    assert_eq!(by_id.calls(), 2);
}

#[tokio::test]
async fn test_file_session_sends_persisted_token() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("auth").join("session.json");

    let server = MockServer::start();
    let authed = server.mock(|when, then| {
        when.method(GET)
            .path("/api/services")
            .header("authorization", "Bearer persisted");
        then.status(200).json_body(json!({"services": []}));
    });

    Session::from_path(Some(&path))
        .set_token(Some("persisted"))
        .unwrap();

    let config = ClientConfig::new(server.url("/api")).with_token_path(&path);
    let client = AgendaClient::connect(config, Arc::new(NotificationCenter::new())).unwrap();
    assert!(client.session().is_authenticated());

    client.services.list().await.unwrap();
    authed.assert();
}

#[tokio::test]
async fn test_create_without_body_still_invalidates() {
    let server = MockServer::start();
    let list = server.mock(|when, then| {
        when.method(GET).path("/api/services");
        then.status(200).json_body(json!({"services": []}));
    });
    let create = server.mock(|when, then| {
        when.method(POST).path("/api/services");
        then.status(201);
    });

    let (client, toasts) = setup(&server, Session::in_memory());
    client.services.list().await.unwrap();

    let created = client
        .services
        .create(shared::ServicePayload {
            name: "Corte".into(),
            description: None,
            duration_minutes: 30,
            price: None,
            category: None,
            color: None,
            allow_overlap: false,
            max_concurrent_appointments: 1,
        })
        .await
        .unwrap();
    assert!(created.data.is_empty());
    create.assert();

    let notification = toasts.last().unwrap();
    assert_eq!(notification.level, Level::Success);
    assert_eq!(notification.message, "Servicio creado");

    client.services.list().await.unwrap();
    assert_eq!(list.calls(), 2);
}
