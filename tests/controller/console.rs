use serde_json::json;

use crud_sim::Console;

use crate::support::{cmd, controller};

#[test]
fn scripted_session_never_stops_on_errors() {
    let controller = controller();
    let mut console = Console::new(Vec::new());

    console.heading("delete").unwrap();
    for _ in 0..2 {
        let outcome = controller.dispatch(&cmd("delete"), json!({ "id": "RP001" }));
        console.report("delete RP001", &outcome).unwrap();
    }
    let outcome = controller.dispatch(&cmd("create"), json!({ "name": "Bar" }));
    console.report("create", &outcome).unwrap();

    let out = String::from_utf8(console.into_inner()).unwrap();
    assert_eq!(
        out,
        "== delete ==\n\
         [ok] delete RP001: {\"id\":\"RP001\",\"was_deleted\":true}\n\
         [ok] delete RP001: {\"id\":\"RP001\",\"was_deleted\":false}\n\
         [validation] create: input rejected\n  \
         - location is required\n  \
         - capacity is required\n"
    );
}
