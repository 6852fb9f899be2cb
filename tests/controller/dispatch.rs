use serde_json::json;

use crud_sim::{CommandRequest, HandlerError};

use crate::support::{cmd, controller};

#[test]
fn crud_commands_are_registered() {
    let controller = controller();
    let mut commands = controller.commands();
    commands.sort_unstable();
    assert_eq!(
        commands,
        vec![
            "refreshment_points.create",
            "refreshment_points.delete",
            "refreshment_points.get",
            "refreshment_points.search",
            "refreshment_points.update",
        ]
    );
}

#[test]
fn search_with_and_without_input() {
    let controller = controller();

    let all = controller.dispatch(&cmd("search"), json!(null)).unwrap();
    assert_eq!(all["count"], 3);

    let filtered = controller
        .dispatch(&cmd("search"), json!({ "filter": "Kiosk" }))
        .unwrap();
    assert_eq!(filtered["count"], 1);
    assert_eq!(filtered["records"][0]["id"], "RP003");
}

#[test]
fn get_missing_is_null_record() {
    let body = controller()
        .dispatch(&cmd("get"), json!({ "id": "RP999" }))
        .unwrap();
    assert!(body["record"].is_null());
}

#[test]
fn delete_twice() {
    let controller = controller();
    let input = json!({ "id": "RP001" });

    let first = controller.dispatch(&cmd("delete"), input.clone()).unwrap();
    assert_eq!(first, json!({ "id": "RP001", "was_deleted": true }));

    let second = controller.dispatch(&cmd("delete"), input).unwrap();
    assert_eq!(second["was_deleted"], false);
}

#[test]
fn create_assigns_next_id() {
    let body = controller()
        .dispatch(
            &cmd("create"),
            json!({ "name": "Mountain Cafe", "location": "Trail 4", "capacity": 20 }),
        )
        .unwrap();
    assert_eq!(body["record"]["id"], "RP004");
    assert_eq!(body["record"]["active"], true);
}

#[test]
fn invalid_create_maps_to_422() {
    let response = controller().dispatch_request(&CommandRequest {
        command: cmd("create"),
        input: json!({}),
    });

    assert_eq!(response.status, 422);
    assert_eq!(response.body["kind"], "validation");
    assert_eq!(
        response.body["messages"],
        json!(["name is required", "location is required", "capacity is required"])
    );
}

#[test]
fn malformed_input_is_decode_error() {
    let err = controller()
        .dispatch(&cmd("delete"), json!({ "identifier": 1 }))
        .unwrap_err();
    assert!(matches!(err, HandlerError::DecodeFailed(_)));
    assert_eq!(err.status_code(), 400);
}

#[test]
fn unknown_command() {
    let response = controller().dispatch_request(&CommandRequest {
        command: "refreshment_points.archive".into(),
        input: json!({}),
    });
    assert_eq!(response.status, 404);
    assert_eq!(response.body["kind"], "unknown_command");
    assert!(response.body.get("messages").is_none());
}

#[test]
fn outage_maps_to_503() {
    let controller = controller();
    let connection = controller.service().connection().unwrap().clone();
    connection.force_available(false);

    let response = controller.dispatch_request(&CommandRequest {
        command: cmd("delete"),
        input: json!({ "id": "RP002" }),
    });
    assert_eq!(response.status, 503);
    assert_eq!(
        response.body["error"],
        "connection error: Connection to ETOUR server interrupted"
    );

    connection.clear_forced();
    assert_eq!(
        controller.dispatch(&cmd("search"), json!(null)).unwrap()["count"],
        3
    );
}

#[test]
fn update_missing_maps_to_404() {
    let response = controller().dispatch_request(&CommandRequest {
        command: cmd("update"),
        input: json!({ "id": "RP404", "name": "Ghost", "location": "Nowhere", "capacity": 1 }),
    });
    assert_eq!(response.status, 404);
    assert_eq!(response.body["kind"], "not_found");
}
