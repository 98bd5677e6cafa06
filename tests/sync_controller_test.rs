mod support;

use std::sync::Arc;
use std::time::Duration;

use catalog_sync::api::ListEndpoint;
use catalog_sync::error::FetchError;
use catalog_sync::models::Difficulty;
use catalog_sync::sync::{
    FetchOutcome, Filter, MutationPipeline, QueryDescriptor, ResourceFetcher, SyncController,
};
use support::{FakeApi, Shape, course, param};

fn titles(controller: &SyncController) -> Vec<String> {
    controller.snapshot().items.into_iter().map(|c| c.title).collect()
}

fn catalog() -> Vec<catalog_sync::models::Course> {
    vec![
        course(1, "Rust Basics", "Programming"),
        course(2, "Advanced Rust", "Programming"),
        course(3, "Color Theory", "Design"),
        course(4, "Rust for Designers", "Design"),
    ]
}

#[tokio::test]
async fn test_filter_change_resets_page_and_refetches() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Envelope));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::new(1));

    assert_eq!(controller.set_page(3).await, FetchOutcome::Applied);
    assert_eq!(controller.query().page(), 3);
    assert_eq!(controller.snapshot().total_pages, 4);

    let outcome = controller
        .set_filter(Filter::Category("Design".to_string()))
        .await;
    assert_eq!(outcome, FetchOutcome::Applied);

    let view = controller.snapshot();
    assert_eq!(view.query.page(), 1);
    assert_eq!(view.total_pages, 2);
    assert_eq!(titles(&controller), vec!["Color Theory"]);

    let sent = api.last_list_call();
    assert_eq!(param(&sent, "page"), Some("1"));
    assert_eq!(param(&sent, "category"), Some("Design"));
    assert_eq!(param(&sent, "search"), None);
}

#[tokio::test]
async fn test_page_change_keeps_filters() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Envelope));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::new(1));

    controller.set_filter(Filter::Search("rust".to_string())).await;
    controller
        .set_filter(Filter::Difficulty(Some(Difficulty::Beginner)))
        .await;
    let outcome = controller.set_page(2).await;
    assert_eq!(outcome, FetchOutcome::Applied);

    let sent = api.last_list_call();
    assert_eq!(param(&sent, "search"), Some("rust"));
    assert_eq!(param(&sent, "difficulty"), Some("Beginner"));
    assert_eq!(param(&sent, "page"), Some("2"));
    assert_eq!(param(&sent, "limit"), Some("1"));
    assert_eq!(titles(&controller), vec!["Advanced Rust"]);
}

#[tokio::test]
async fn test_slow_stale_response_never_overwrites_newer_one() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    api.delay_search("color", Duration::from_millis(200));
    api.delay_search("rust", Duration::from_millis(10));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::default());

    // "color" is issued first but answers last.
    let (first, second) = tokio::join!(
        controller.set_filter(Filter::Search("color".to_string())),
        controller.set_filter(Filter::Search("rust".to_string())),
    );

    assert_eq!(first, FetchOutcome::Superseded);
    assert_eq!(second, FetchOutcome::Applied);

    let view = controller.snapshot();
    assert!(!view.loading);
    assert_eq!(view.query.search(), "rust");
    assert_eq!(
        titles(&controller),
        vec!["Rust Basics", "Advanced Rust", "Rust for Designers"]
    );
}

#[tokio::test]
async fn test_loading_holds_until_newest_response() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    api.delay_search("color", Duration::from_millis(10));
    api.delay_search("rust", Duration::from_millis(300));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::default());

    let midway = async {
        tokio::time::sleep(Duration::from_millis(100)).await;
        // The older fetch is back by now but must not have ended loading.
        controller.snapshot()
    };

    let (first, second, during) = tokio::join!(
        controller.set_filter(Filter::Search("color".to_string())),
        controller.set_filter(Filter::Search("rust".to_string())),
        midway,
    );

    assert_eq!(first, FetchOutcome::Superseded);
    assert_eq!(second, FetchOutcome::Applied);
    assert!(during.loading);
    assert!(during.items.is_empty());
    assert!(!controller.snapshot().loading);
}

#[tokio::test]
async fn test_dropped_fetch_does_not_leave_view_loading() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    api.delay_search("slow", Duration::from_millis(500));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::default());
    assert_eq!(controller.refresh().await, FetchOutcome::Applied);

    let timed_out = tokio::time::timeout(
        Duration::from_millis(50),
        controller.set_filter(Filter::Search("slow".to_string())),
    )
    .await;
    assert!(timed_out.is_err());

    tokio::time::sleep(Duration::from_millis(600)).await;
    let view = controller.snapshot();
    assert!(!view.loading);
    assert_eq!(view.error, None);
    assert_eq!(view.items.len(), 4);
    assert_eq!(view.query.search(), "slow");

    // The next cycle runs normally.
    assert_eq!(controller.set_filter(Filter::Search("rust".to_string())).await, FetchOutcome::Applied);
    assert_eq!(controller.snapshot().items.len(), 3);
}

#[tokio::test]
async fn test_dropped_stale_fetch_keeps_newer_cycle_loading() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    api.delay_search("color", Duration::from_millis(500));
    api.delay_search("rust", Duration::from_millis(200));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::default());

    let newer = async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        controller.set_filter(Filter::Search("rust".to_string())).await
    };
    let older = async {
        let _ = tokio::time::timeout(
            Duration::from_millis(50),
            controller.set_filter(Filter::Search("color".to_string())),
        )
        .await;
        // The older cycle is gone; the newer one is still out.
        controller.snapshot().loading
    };

    let (applied, still_loading) = tokio::join!(newer, older);
    assert!(still_loading);
    assert_eq!(applied, FetchOutcome::Applied);
    assert!(!controller.snapshot().loading);
}

#[tokio::test]
async fn test_failed_fetch_keeps_last_good_items() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::default());

    assert_eq!(controller.refresh().await, FetchOutcome::Applied);
    let before = controller.snapshot().items;
    assert_eq!(before.len(), 4);

    let failure = FetchError::Network("connection refused".to_string());
    api.fail_lists_with(Some(failure.clone()));
    let outcome = controller
        .set_filter(Filter::Category("Design".to_string()))
        .await;
    assert_eq!(outcome, FetchOutcome::Failed(failure));

    let view = controller.snapshot();
    assert_eq!(view.items, before);
    assert!(!view.loading);
    assert_eq!(
        view.error.as_deref(),
        Some("Failed to load courses. Please try again.")
    );

    // Recovery clears the banner.
    api.fail_lists_with(None);
    assert_eq!(controller.refresh().await, FetchOutcome::Applied);
    assert_eq!(controller.snapshot().error, None);
    assert_eq!(controller.snapshot().items.len(), 2);
}

#[tokio::test]
async fn test_admin_failure_message() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    api.fail_lists_with(Some(FetchError::ServerStatus {
        status: 500,
        body: String::new(),
    }));
    let controller = SyncController::new(api, ListEndpoint::Admin, QueryDescriptor::default());

    controller.refresh().await;
    assert_eq!(controller.snapshot().error.as_deref(), Some("Failed to load courses."));
}

#[tokio::test]
async fn test_fetcher_normalizes_both_shapes() {
    let three = vec![
        course(1, "c1", "A"),
        course(2, "c2", "A"),
        course(3, "c3", "A"),
    ];

    let bare = ResourceFetcher::new(Arc::new(FakeApi::new(three.clone(), Shape::Bare)), ListEndpoint::Admin);
    let page = bare
        .fetch(&QueryDescriptor::default())
        .await
        .expect("bare fetch failed");
    assert_eq!(page.items, three);
    assert_eq!(page.total_pages, 1);

    let four_pages: Vec<_> = (1..=4).map(|i| course(i, &format!("c{}", i), "A")).collect();
    let envelope = ResourceFetcher::new(
        Arc::new(FakeApi::new(four_pages, Shape::Envelope)),
        ListEndpoint::Catalog,
    );
    let page = envelope
        .fetch(&QueryDescriptor::new(1))
        .await
        .expect("envelope fetch failed");
    assert_eq!(page.items, vec![course(1, "c1", "A")]);
    assert_eq!(page.total_pages, 4);
}

#[tokio::test]
async fn test_remove_then_refresh_drops_the_course() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    let controller = SyncController::new(api.clone(), ListEndpoint::Admin, QueryDescriptor::default());
    let pipeline = MutationPipeline::new(api.clone());

    controller.refresh().await;
    assert!(controller.snapshot().items.iter().any(|c| c.id == 2));

    pipeline.remove(2).await.expect("remove failed");
    // Nothing changes until the caller refreshes.
    assert!(controller.snapshot().items.iter().any(|c| c.id == 2));

    assert_eq!(controller.refresh().await, FetchOutcome::Applied);
    assert!(controller.snapshot().items.iter().all(|c| c.id != 2));
    assert_eq!(controller.snapshot().items.len(), 3);
}

#[tokio::test]
async fn test_controllers_are_independent() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    let catalog_view = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::default());
    let admin_view = SyncController::new(api.clone(), ListEndpoint::Admin, QueryDescriptor::default());

    catalog_view
        .set_filter(Filter::Category("Design".to_string()))
        .await;
    admin_view.refresh().await;

    assert_eq!(catalog_view.snapshot().items.len(), 2);
    assert_eq!(admin_view.snapshot().items.len(), 4);
    assert_eq!(admin_view.query().category(), "");
}

#[tokio::test]
async fn test_subscribers_see_final_state() {
    let api = Arc::new(FakeApi::new(catalog(), Shape::Bare));
    let controller = SyncController::new(api.clone(), ListEndpoint::Catalog, QueryDescriptor::default());
    let mut rx = controller.subscribe();

    controller.refresh().await;

    rx.changed().await.expect("sender dropped");
    let view = rx.borrow_and_update().clone();
    assert!(!view.loading);
    assert_eq!(view.items.len(), 4);
}
