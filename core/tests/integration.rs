//! Full user assignment lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then exercises every client
//! operation over real HTTP through `UreqTransport`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use harvest_core::{
    ApiError, ClientConfig, HarvestClient, UreqTransport, UserAssignmentOptions, UserAssignmentUpdate,
};

fn start_mock_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

#[test]
fn user_assignment_lifecycle() {
    let addr = start_mock_server();
    let client = HarvestClient::new(ClientConfig::new(&format!("http://{addr}")));
    let transport = UreqTransport::new();

    let long_ago = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let far_future = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();

    // Step 1: list, should be empty.
    let assignments = client.list_user_assignments(&transport, 1, None).unwrap();
    assert!(assignments.is_empty(), "expected empty list");

    // Step 2: assign user 2 to project 1, and user 3 to project 7.
    let created = client.create_user_assignment(&transport, 1, 2).unwrap();
    assert_eq!(created.user_id, 2);
    assert_eq!(created.project_id, 1);
    let id = created.id;
    let other = client.create_user_assignment(&transport, 7, 3).unwrap();
    assert_eq!(other.project_id, 7);

    // Step 3: fetch twice, both equal to the created record.
    let first = client.user_assignment(&transport, 1, id).unwrap();
    let second = client.user_assignment(&transport, 1, id).unwrap();
    assert_eq!(first, created);
    assert_eq!(first, second);

    // Step 4: field-wise update of the hourly rate.
    let update = UserAssignmentUpdate {
        hourly_rate: Some(Decimal::from(50)),
        ..Default::default()
    };
    let updated = client.update_user_assignment(&transport, 1, id, 2, update).unwrap();
    assert_eq!(updated.hourly_rate, Some(Decimal::from(50)));
    assert!(!updated.deactivated);

    // Step 5: options update leaves the hourly rate alone.
    let options = UserAssignmentOptions {
        budget: Some(Decimal::from(1000)),
        is_project_manager: Some(true),
        ..Default::default()
    };
    let updated = client.update_user_assignment_with(&transport, 1, id, &options).unwrap();
    assert_eq!(updated.hourly_rate, Some(Decimal::from(50)));
    assert_eq!(updated.budget, Some(Decimal::from(1000)));
    assert_eq!(updated.is_project_manager, Some(true));

    // Step 6: list only returns project 1, filtered by updated_since.
    let assignments = client.list_user_assignments(&transport, 1, Some(long_ago)).unwrap();
    assert_eq!(assignments.len(), 1);
    assert!(assignments.iter().all(|a| a.project_id == 1));
    let assignments = client.list_user_assignments(&transport, 1, Some(far_future)).unwrap();
    assert!(assignments.is_empty(), "expected nothing updated in the future");

    // Step 7: delete succeeds with 200.
    assert!(client.delete_user_assignment(&transport, 1, id).unwrap());

    // Step 8: get after delete is an HTTP error.
    let err = client.user_assignment(&transport, 1, id).unwrap_err();
    assert!(matches!(err, ApiError::Http { status: 404, .. }));

    // Step 9: delete again reports false rather than failing.
    assert!(!client.delete_user_assignment(&transport, 1, id).unwrap());

    // Step 10: the other project is untouched.
    let assignments = client.list_user_assignments(&transport, 7, None).unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].user_id, 3);
}

#[test]
fn connection_refused_is_a_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = HarvestClient::new(ClientConfig::new(&format!("http://{addr}")));
    let err = client
        .delete_user_assignment(&UreqTransport::new(), 1, 5)
        .unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));
}

#[test]
fn malformed_base_url_is_not_a_transport_error() {
    let client = HarvestClient::new(ClientConfig::new("not a url"));
    let err = client
        .user_assignment(&UreqTransport::new(), 1, 5)
        .unwrap_err();
    assert!(matches!(err, ApiError::InvalidUrl(_)), "unexpected error: {err:?}");
}
