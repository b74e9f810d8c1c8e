//! Load testing for the pattern router.

use std::time::Instant;

use reqwest::StatusCode;

mod common;

#[tokio::test]
async fn test_concurrent_appends_are_all_recorded() {
    let server = common::start_server_with(|config| {
        config.listener.max_connections = 8;
    })
    .await;
    let client = common::client();

    let concurrency = 20;
    let requests_per_task = 25;
    let total_requests = concurrency * requests_per_task;

    let start = Instant::now();
    let mut tasks = Vec::new();
    for task in 0..concurrency {
        let client = client.clone();
        let base = server.url("/update/shared");
        tasks.push(tokio::spawn(async move {
            let mut latencies = Vec::new();
            for i in 0..requests_per_task {
                let req_start = Instant::now();
                let res = client
                    .patch(format!("{base}?text=t{task}r{i}"))
                    .send()
                    .await
                    .unwrap();
                assert_eq!(res.status(), StatusCode::OK);
                latencies.push(req_start.elapsed());
            }
            latencies
        }));
    }

    let mut all_latencies = Vec::new();
    for task in tasks {
        all_latencies.extend(task.await.unwrap());
    }
    let duration = start.elapsed();

    all_latencies.sort();
    let p50 = all_latencies[all_latencies.len() / 2];
    let p99 = all_latencies[(all_latencies.len() as f64 * 0.99) as usize];

    println!("\n--- Load Test Results ---");
    println!("Total Requests: {}", total_requests);
    println!("Concurrency:    {}", concurrency);
    println!("Total Duration: {:?}", duration);
    println!("Requests/sec:   {:.2}", total_requests as f64 / duration.as_secs_f64());
    println!("P50 Latency:    {:?}", p50);
    println!("P99 Latency:    {:?}", p99);
    println!("-------------------------\n");

    let res = client.get(server.url("/read/shared")).send().await.unwrap();
    let body = res.text().await.unwrap();
    let mut lines: Vec<&str> = body.lines().collect();
    assert_eq!(lines.len(), total_requests);
    lines.sort();
    lines.dedup();
    assert_eq!(lines.len(), total_requests, "every append lands exactly once");

    server.stop().await;
}

#[tokio::test]
async fn test_concurrent_lookups_resolve_consistently() {
    let server = common::start_server().await;
    let client = common::client();

    let mut tasks = Vec::new();
    for _ in 0..10 {
        let client = client.clone();
        let matched = server.url("/read/absent");
        let unmatched = server.url("/delete/absent");
        tasks.push(tokio::spawn(async move {
            for _ in 0..20 {
                let status = client.get(&matched).send().await.unwrap().status();
                assert_eq!(status, StatusCode::BAD_REQUEST);
                let status = client.get(&unmatched).send().await.unwrap().status();
                assert_eq!(status, StatusCode::NOT_FOUND);
            }
        }));
    }
    for task in tasks {
        task.await.unwrap();
    }

    server.stop().await;
}
