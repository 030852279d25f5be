use job_tracker::board::{Notice, ALREADY_SAVED, SAVED};
use job_tracker::core::{Database, JobRepository, PipelineEntry, SaveOutcome};
use job_tracker::test_utils::{memory_board, StubTransport};
use serde_json::json;

fn two_results() -> StubTransport {
    StubTransport::new().respond(
        "google_jobs",
        json!({
            "search_metadata": { "status": "Success" },
            "jobs_results": [
                {
                    "job_id": "j1",
                    "title": "Data Analyst",
                    "company_name": "Acme",
                    "location": "Anywhere",
                    "via": "via LinkedIn"
                },
                {
                    "job_id": "j2",
                    "title": "Junior Data Analyst",
                    "company_name": "Globex",
                    "location": "Remote",
                    "via": "via Indeed"
                }
            ]
        }),
    )
}

#[tokio::test]
async fn search_save_twice_and_list() {
    let stub = two_results();
    let calls = stub.call_log();
    let board = memory_board(stub).await.unwrap();

    let view = board.search("Data Analyst", "Remote").await;
    assert_eq!(calls.snapshot()[0].param("q"), Some("Data Analyst Remote"));
    assert!(view.notice.is_none());

    let ids: Vec<_> = view
        .jobs
        .iter()
        .map(|card| card.job.job_id.as_deref().unwrap())
        .collect();
    assert_eq!(ids, vec!["j1", "j2"]);

    let first = &view.jobs[0].job;
    let saved = board.save(first).await;
    assert_eq!(saved.outcome, Some(SaveOutcome::Saved));
    assert_eq!(saved.notice, Notice::Success(SAVED.to_string()));

    let again = board.save(first).await;
    assert_eq!(again.outcome, Some(SaveOutcome::AlreadySaved));
    assert_eq!(again.notice, Notice::Info(ALREADY_SAVED.to_string()));

    let pipeline = board.pipeline().await.unwrap();
    assert_eq!(
        pipeline,
        vec![PipelineEntry {
            title: Some("Data Analyst".to_string()),
            company: Some("Acme".to_string()),
            location: Some("Anywhere".to_string()),
            source: Some("via LinkedIn".to_string()),
        }]
    );

    let stored = JobRepository::new(board.database().pool())
        .find("j1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.id, "j1");
    assert_eq!(stored.link, "#");
}

#[tokio::test]
async fn save_a_then_b_lists_both() {
    let board = memory_board(two_results()).await.unwrap();
    let view = board.search("Data Analyst", "Remote").await;

    for card in &view.jobs {
        board.save(&card.job).await;
    }
    board.save(&view.jobs[0].job).await;

    let titles: Vec<_> = board
        .pipeline()
        .await
        .unwrap()
        .into_iter()
        .map(|entry| entry.title.unwrap())
        .collect();
    assert_eq!(titles, vec!["Data Analyst", "Junior Data Analyst"]);
}

#[tokio::test]
async fn page_render_reflects_store_after_save() {
    let board = memory_board(two_results().respond("account", json!({ "plan_searches_left": 99 })))
        .await
        .unwrap();

    let before = board.render_page().await;
    assert!(before.pipeline.is_empty());
    assert_eq!(before.quota_display, "99");

    let view = board.search("Data Analyst", "Remote").await;
    board.save(&view.jobs[1].job).await;

    let after = board.render_page().await;
    assert_eq!(after.pipeline.len(), 1);
    assert_eq!(after.pipeline[0].company, "Globex");
}

#[tokio::test]
async fn pipeline_survives_reopening_the_file() {
    let path = std::env::temp_dir().join(format!("jobscout-reopen-{}.db", std::process::id()));
    let _ = std::fs::remove_file(&path);

    {
        let db = Database::new(&path).await.unwrap();
        let repo = JobRepository::new(db.pool());
        let job = job_tracker::core::SavedJob {
            id: "persisted".to_string(),
            title: Some("Analyst".to_string()),
            company: None,
            location: None,
            source: None,
            link: "#".to_string(),
        };
        assert_eq!(repo.save_job(&job).await.unwrap(), SaveOutcome::Saved);
        db.close().await;
    }

    let db = Database::new(&path).await.unwrap();
    let repo = JobRepository::new(db.pool());
    assert_eq!(repo.count().await.unwrap(), 1);
    db.close().await;

    std::fs::remove_file(&path).unwrap();
}
