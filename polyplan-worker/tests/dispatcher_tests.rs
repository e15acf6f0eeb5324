use std::path::Path;
use std::time::Duration;

use gsf::config::GSFConfig;
use gsf::io::read_request;
use polyplan::geometry::LatLng;
use polyplan::io::ext_repr::ExtPlanRequest;
use polyplan_worker::{Dispatcher, JobId, JobRecord, JobStatus, JobStore, serve};
use test_case::test_case;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::broadcast;

fn load(path: &str) -> ExtPlanRequest {
    read_request(Path::new(path)).unwrap()
}

fn dispatcher(max_concurrent_jobs: usize) -> Dispatcher {
    let _ = env_logger::builder().is_test(true).try_init();
    Dispatcher::new(JobStore::new(), GSFConfig::default(), max_concurrent_jobs)
}

#[test_case("../assets/square_1ha.json"; "square_1ha")]
#[test_case("../assets/farm_with_well.json"; "farm_with_well")]
#[tokio::test]
async fn job_completes_with_plan(path: &str) {
    let dispatcher = dispatcher(2);
    let id = dispatcher.submit(load(path));
    assert!(dispatcher.store().status(id).is_some());

    let record = dispatcher.wait(id).await.unwrap();
    assert_eq!(record.status, JobStatus::Completed);
    assert!(record.error.is_none());
    let plan = record.result.unwrap();
    assert!(!plan.structures.is_empty());
    assert!(plan.coverage > 0.0);
}

#[tokio::test]
async fn plot_without_room_completes_empty() {
    let dispatcher = dispatcher(1);
    let id = dispatcher.submit(load("../assets/tiny_plot.json"));
    let record = dispatcher.wait(id).await.unwrap();
    assert_eq!(record.status, JobStatus::Completed);
    let plan = record.result.unwrap();
    assert!(plan.structures.is_empty());
    assert_eq!(plan.coverage, 0.0);
}

#[tokio::test]
async fn malformed_boundary_fails_job() {
    let dispatcher = dispatcher(1);
    let request = ExtPlanRequest {
        name: "degenerate".to_string(),
        boundary: vec![
            LatLng { lat: 12.0, lng: 77.0 },
            LatLng { lat: 12.001, lng: 77.0 },
        ],
        exclusion_zones: vec![],
        config: None,
    };
    let id = dispatcher.submit(request);
    let record = dispatcher.wait(id).await.unwrap();
    assert_eq!(record.status, JobStatus::Failed);
    assert!(record.result.is_none());
    assert!(record.error.is_some());
}

#[tokio::test]
async fn unknown_job_is_not_found() {
    let dispatcher = dispatcher(1);
    assert!(dispatcher.wait(JobId::new()).await.is_none());
}

#[tokio::test]
async fn queued_jobs_all_finish_with_identical_plans() {
    let dispatcher = dispatcher(1);
    let request = load("../assets/l_shape.json");
    let ids: Vec<_> = (0..3).map(|_| dispatcher.submit(request.clone())).collect();
    assert_eq!(dispatcher.store().len(), 3);

    let mut plans = vec![];
    for id in ids {
        let record = dispatcher.wait(id).await.unwrap();
        assert_eq!(record.status, JobStatus::Completed);
        plans.push(record.result.unwrap());
    }
    for plan in plans.iter().skip(1) {
        assert_eq!(plan.structures.len(), plans[0].structures.len());
        assert_eq!(plan.coverage, plans[0].coverage);
    }
}

#[tokio::test]
async fn finished_jobs_can_be_taken() {
    let dispatcher = dispatcher(1);
    let (id, handle) = dispatcher.spawn(load("../assets/tiny_plot.json"));
    handle.await.unwrap();
    assert_eq!(dispatcher.store().status(id), Some(JobStatus::Completed));
    assert!(dispatcher.store().take_finished(id).is_some());
    assert!(dispatcher.store().is_empty());
}

#[tokio::test]
async fn results_are_written_while_input_stays_open() {
    let (client, server) = tokio::io::duplex(1 << 16);
    let (server_read, server_write) = tokio::io::split(server);
    let (client_read, mut client_write) = tokio::io::split(client);
    let (_shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let serving = tokio::spawn(serve(
        dispatcher(1),
        BufReader::new(server_read),
        server_write,
        shutdown_rx,
    ));

    let request = serde_json::to_string(&load("../assets/tiny_plot.json")).unwrap();
    client_write
        .write_all(format!("not json\n{request}\n").as_bytes())
        .await
        .unwrap();

    let mut results = BufReader::new(client_read).lines();
    let line = tokio::time::timeout(Duration::from_secs(60), results.next_line())
        .await
        .expect("no result while the input is still open")
        .unwrap()
        .unwrap();
    let record: JobRecord = serde_json::from_str(&line).unwrap();
    assert_eq!(record.status, JobStatus::Completed);
    assert_eq!(record.name, "tiny_plot");

    drop(client_write);
    assert_eq!(serving.await.unwrap().unwrap(), 1);
}

#[tokio::test]
async fn shutdown_stops_serving_while_input_stays_open() {
    let (_client, server) = tokio::io::duplex(1 << 16);
    let (server_read, server_write) = tokio::io::split(server);
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    shutdown_tx.send(()).unwrap();

    let n_written = tokio::time::timeout(
        Duration::from_secs(10),
        serve(dispatcher(1), BufReader::new(server_read), server_write, shutdown_rx),
    )
    .await
    .expect("serving did not stop after shutdown")
    .unwrap();
    assert_eq!(n_written, 0);
}
