#![cfg(all(feature = "server", feature = "client"))]

use std::cell::RefCell;
use std::collections::HashMap;

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpResponse, HttpServer, web};
use advocate_directory::configure_api;
use advocate_directory::directory::source::{
    AdvocateSource, FetchError, FetchResult, HttpAdvocateSource, StoreAdvocateSource,
};
use advocate_directory::repository::DieselRepository;
use advocate_directory::directory::{
    DirectoryController, DirectoryOptions, FetchOutcome, FetchPhase,
};
use advocate_directory::domain::advocate::Advocate;
use advocate_directory::domain::types::{AdvocateId, PageSize, TypeConstraintError};
use tokio::sync::oneshot;

mod common;

type Reply = oneshot::Sender<FetchResult<Vec<Advocate>>>;

/// Source whose responses are released by the test, one channel per page size.
#[derive(Default)]
struct ScriptedSource {
    pending: RefCell<HashMap<u32, oneshot::Receiver<FetchResult<Vec<Advocate>>>>>,
}

impl ScriptedSource {
    fn expect(&self, page_size: u32) -> Reply {
        let (tx, rx) = oneshot::channel();
        self.pending.borrow_mut().insert(page_size, rx);
        tx
    }
}

impl AdvocateSource for ScriptedSource {
    async fn fetch_advocates(&self, page_size: PageSize) -> FetchResult<Vec<Advocate>> {
        let rx = self
            .pending
            .borrow_mut()
            .remove(&page_size.get())
            .expect("unexpected fetch");
        rx.await
            .unwrap_or_else(|_| Err(FetchError::Transport("reply dropped".into())))
    }
}

fn advocates(ids: impl IntoIterator<Item = i32>) -> Vec<Advocate> {
    ids.into_iter()
        .map(|id| Advocate::new(AdvocateId::new(id).unwrap()))
        .collect()
}

fn ids(advocates: &[Advocate]) -> Vec<i32> {
    advocates.iter().map(|a| a.id.get()).collect()
}

async fn wait_for_generation<S: AdvocateSource>(
    controller: &DirectoryController<S>,
    generation: u64,
) {
    while controller.generation() < generation {
        tokio::task::yield_now().await;
    }
}

/// Issues `activate` (page size 10) then `set_page_size(20)` and returns
/// their join handles once both requests are in flight.
async fn overlapping_requests(
    controller: &DirectoryController<ScriptedSource>,
) -> (
    actix_web::rt::task::JoinHandle<FetchOutcome>,
    actix_web::rt::task::JoinHandle<Result<FetchOutcome, TypeConstraintError>>,
) {
    let first = actix_web::rt::spawn({
        let controller = controller.clone();
        async move { controller.activate().await }
    });
    wait_for_generation(controller, 1).await;

    let second = actix_web::rt::spawn({
        let controller = controller.clone();
        async move { controller.set_page_size(20).await }
    });
    wait_for_generation(controller, 2).await;

    (first, second)
}

#[actix_web::test]
async fn late_stale_response_is_discarded() {
    let source = ScriptedSource::default();
    let reply_10 = source.expect(10);
    let reply_20 = source.expect(20);
    let controller = DirectoryController::new(source);

    let (first, second) = overlapping_requests(&controller).await;
    assert!(controller.view().is_loading);

    reply_20.send(Ok(advocates(1..=20))).unwrap();
    assert_eq!(second.await.unwrap(), Ok(FetchOutcome::Applied));

    reply_10.send(Ok(advocates(101..=110))).unwrap();
    assert_eq!(first.await.unwrap(), FetchOutcome::Stale);

    assert_eq!(ids(&controller.dataset()), (1..=20).collect::<Vec<_>>());
    assert_eq!(controller.phase(), FetchPhase::Ready);
    assert_eq!(controller.page_size().map(PageSize::get), Some(20));
}

#[actix_web::test]
async fn early_stale_response_is_discarded() {
    let source = ScriptedSource::default();
    let reply_10 = source.expect(10);
    let reply_20 = source.expect(20);
    let controller = DirectoryController::new(source);

    let (first, second) = overlapping_requests(&controller).await;

    reply_10.send(Ok(advocates(101..=110))).unwrap();
    assert_eq!(first.await.unwrap(), FetchOutcome::Stale);
    assert!(controller.dataset().is_empty());
    assert!(controller.view().is_loading);

    reply_20.send(Ok(advocates(1..=20))).unwrap();
    assert_eq!(second.await.unwrap(), Ok(FetchOutcome::Applied));

    assert_eq!(ids(&controller.dataset()), (1..=20).collect::<Vec<_>>());
    assert!(!controller.view().is_loading);
}

#[actix_web::test]
async fn disposal_turns_pending_response_into_no_op() {
    let source = ScriptedSource::default();
    let reply = source.expect(10);
    let controller = DirectoryController::new(source);

    let pending = actix_web::rt::spawn({
        let controller = controller.clone();
        async move { controller.activate().await }
    });
    wait_for_generation(&controller, 1).await;

    controller.dispose();
    reply.send(Ok(advocates(1..=10))).unwrap();

    assert_eq!(pending.await.unwrap(), FetchOutcome::Disposed);
    assert!(controller.dataset().is_empty());
    assert_eq!(controller.set_page_size(20).await, Ok(FetchOutcome::Disposed));
}

#[actix_web::test]
async fn failed_fetch_keeps_previous_dataset() {
    let source = ScriptedSource::default();
    let reply_10 = source.expect(10);
    let reply_30 = source.expect(30);
    let controller = DirectoryController::new(source);

    reply_10.send(Ok(advocates(1..=10))).unwrap();
    assert_eq!(controller.activate().await, FetchOutcome::Applied);

    reply_30.send(Err(FetchError::Status(503))).unwrap();
    assert_eq!(controller.set_page_size(30).await, Ok(FetchOutcome::Failed));

    assert_eq!(ids(&controller.dataset()), (1..=10).collect::<Vec<_>>());
    assert!(!controller.view().is_loading);
}

#[actix_web::test]
async fn page_size_is_validated_and_clamped() {
    let source = ScriptedSource::default();
    let reply_10 = source.expect(10);
    let reply_20 = source.expect(20);
    let controller = DirectoryController::with_options(
        source,
        DirectoryOptions {
            initial_page_size: PageSize::DEFAULT,
            max_page_size: PageSize::new(20).unwrap(),
        },
    );

    reply_10.send(Ok(advocates(1..=10))).unwrap();
    controller.activate().await;

    assert_eq!(
        controller.set_page_size(25).await,
        Err(TypeConstraintError::UnsupportedPageSize(25))
    );

    reply_20.send(Ok(advocates(1..=20))).unwrap();
    assert_eq!(controller.set_page_size(30).await, Ok(FetchOutcome::Applied));
    assert_eq!(controller.page_size().map(PageSize::get), Some(20));

    assert_eq!(controller.set_page_size(20).await, Ok(FetchOutcome::Unchanged));
}

#[actix_web::test]
async fn search_scenario_over_store_backed_source() {
    let test_db = common::TestDb::new("search_scenario_over_store_backed_source.db");
    test_db.seed(25);
    let controller = DirectoryController::new(StoreAdvocateSource::new(test_db.repository()));

    assert_eq!(controller.activate().await, FetchOutcome::Applied);
    assert_eq!(controller.view().result_count, 10);

    controller.set_search_query("CARDIO");
    let view = controller.view();
    assert_eq!(ids(&view.results), vec![2, 4, 6, 8, 10]);

    controller.set_search_query("city1");
    assert_eq!(ids(&controller.view().results), vec![1, 10]);

    assert_eq!(controller.set_page_size(20).await, Ok(FetchOutcome::Applied));
    assert_eq!(
        ids(&controller.view().results),
        vec![1, 10, 11, 12, 13, 14, 15, 16, 17, 18, 19]
    );

    controller.reset();
    assert_eq!(controller.view().result_count, 20);
}

/// Serves the directory API on an ephemeral port. `/unavailable/api/advocates`
/// answers 503 and `/garbled/api/advocates` answers a body that is not an
/// advocate list.
fn start_directory_server(repo: DieselRepository) -> (String, ServerHandle) {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(repo.clone()))
            .configure(configure_api)
            .route(
                "/unavailable/api/advocates",
                web::get().to(|| async { HttpResponse::ServiceUnavailable().finish() }),
            )
            .route(
                "/garbled/api/advocates",
                web::get().to(|| async {
                    HttpResponse::Ok()
                        .content_type("application/json")
                        .body(r#"{"data":"nope"}"#)
                }),
            )
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind test server");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_web::rt::spawn(server);

    (format!("http://{addr}"), handle)
}

#[actix_web::test]
async fn http_source_drives_controller_against_live_server() {
    let test_db = common::TestDb::new("http_source_drives_controller_against_live_server.db");
    test_db.seed(25);
    let (base_url, handle) = start_directory_server(test_db.repository());

    let controller = DirectoryController::new(HttpAdvocateSource::new(&base_url));

    assert_eq!(controller.activate().await, FetchOutcome::Applied);
    assert_eq!(ids(&controller.dataset()), (1..=10).collect::<Vec<_>>());

    assert_eq!(controller.set_page_size(20).await, Ok(FetchOutcome::Applied));
    let view = controller.view();
    assert_eq!(view.result_count, 20);
    assert_eq!(view.results[1].first_name.as_deref(), Some("First2"));
    assert_eq!(view.results[1].specialties, vec!["Cardiology", "Sleep issues"]);

    controller.set_search_query("cardio");
    assert_eq!(controller.view().result_count, 10);

    handle.stop(true).await;
}

#[actix_web::test]
async fn http_source_reports_status_and_decode_failures() {
    let test_db = common::TestDb::new("http_source_reports_status_and_decode_failures.db");
    let (base_url, handle) = start_directory_server(test_db.repository());

    let unavailable = HttpAdvocateSource::new(&format!("{base_url}/unavailable"));
    let garbled = HttpAdvocateSource::new(&format!("{base_url}/garbled"));

    assert!(matches!(
        unavailable.fetch_advocates(PageSize::DEFAULT).await,
        Err(FetchError::Status(503))
    ));
    assert!(matches!(
        garbled.fetch_advocates(PageSize::DEFAULT).await,
        Err(FetchError::Decode(_))
    ));

    handle.stop(true).await;
}

#[actix_web::test]
async fn http_failure_leaves_loaded_dataset_in_place() {
    let test_db = common::TestDb::new("http_failure_leaves_loaded_dataset_in_place.db");
    test_db.seed(25);
    let (base_url, handle) = start_directory_server(test_db.repository());

    let controller = DirectoryController::new(HttpAdvocateSource::new(&base_url));
    assert_eq!(controller.activate().await, FetchOutcome::Applied);

    let unavailable = HttpAdvocateSource::new(&format!("{base_url}/unavailable"));
    let ticket = controller
        .begin_fetch(PageSize::new(20).unwrap())
        .expect("page size changed");
    let result = unavailable.fetch_advocates(ticket.page_size()).await;

    assert_eq!(controller.complete_fetch(ticket, result), FetchOutcome::Failed);
    assert_eq!(ids(&controller.dataset()), (1..=10).collect::<Vec<_>>());
    assert_eq!(controller.phase(), FetchPhase::Ready);

    let offline = DirectoryController::new(HttpAdvocateSource::new(&format!(
        "{base_url}/unavailable"
    )));
    assert_eq!(offline.activate().await, FetchOutcome::Failed);
    assert!(offline.dataset().is_empty());
    assert_eq!(offline.phase(), FetchPhase::Idle);

    handle.stop(true).await;
}
