mod common;

use chrono::NaiveDate;
use rust_decimal_macros::dec;

use common::{fleet, state_for, MockBackend};
use skyfare_client::handlers::results::ResultsView;
use skyfare_client::handlers::search::SearchForm;
use skyfare_client::utils::query::SearchCriteria;
use skyfare_client::AppError;

fn criteria() -> SearchCriteria {
    let mut form = SearchForm::new(NaiveDate::from_ymd_opt(2026, 10, 17).unwrap());
    form.passengers = 2;
    form.submit().unwrap()
}

#[tokio::test]
async fn test_initial_load_and_pagination() {
    let mock = MockBackend::new(fleet());
    let state = state_for(&mock.spawn().await);

    let mut view = ResultsView::new(criteria(), 8);
    view.refresh(&state.client).await.unwrap();

    assert_eq!(view.total(), 20);
    assert_eq!(view.total_pages(), 3);
    assert_eq!(view.flights().len(), 8);
    assert_eq!(view.available_airlines(), vec!["Air India", "IndiGo", "Vistara"]);

    let sent = mock.last_search();
    assert_eq!(sent["from"], "Delhi");
    assert_eq!(sent["to"], "Mumbai");
    assert_eq!(sent["date"], "2026-10-18");
    assert_eq!(sent["passengers"], "2");
    assert_eq!(sent["limit"], "8");
    assert!(!sent.contains_key("airlines"));

    let pending = view.go_to_page(3).unwrap();
    let result = state.client.search_flights(&pending.query).await;
    assert!(view.apply(pending.ticket, result));
    assert_eq!(view.current_page(), 3);
    assert_eq!(view.flights().len(), 4);
    assert!(!view.has_next());
}

#[tokio::test]
async fn test_out_of_range_page_sends_nothing() {
    let mock = MockBackend::new(fleet());
    let state = state_for(&mock.spawn().await);

    let mut view = ResultsView::new(criteria(), 8);
    view.refresh(&state.client).await.unwrap();
    let calls = mock.search_calls();

    assert!(matches!(view.go_to_page(4), Err(AppError::PageOutOfRange { requested: 4, total_pages: 3 })));
    assert!(matches!(view.go_to_page(0), Err(AppError::PageOutOfRange { .. })));
    assert_eq!(mock.search_calls(), calls);
    assert_eq!(view.current_page(), 1);
}

#[tokio::test]
async fn test_airline_allow_list() {
    let mock = MockBackend::new(fleet());
    let state = state_for(&mock.spawn().await);

    let mut view = ResultsView::new(criteria(), 50);
    view.refresh(&state.client).await.unwrap();
    let unfiltered = view.total();

    let pending = view.toggle_airline("Vistara", true).unwrap();
    let result = state.client.search_flights(&pending.query).await;
    view.apply(pending.ticket, result);

    assert_eq!(mock.last_search()["airlines"], "Vistara");
    assert!(view.total() < unfiltered);
    assert!(view.flights().iter().all(|f| f.airline_name == "Vistara"));

    // Unchecking the last airline goes back to no airline filtering.
    let pending = view.toggle_airline("Vistara", false).unwrap();
    let result = state.client.search_flights(&pending.query).await;
    view.apply(pending.ticket, result);
    assert_eq!(view.total(), unfiltered);
}

#[tokio::test]
async fn test_sort_and_filters_reach_backend_and_reset_page() {
    let mock = MockBackend::new(fleet());
    let state = state_for(&mock.spawn().await);

    let mut view = ResultsView::new(criteria(), 8);
    view.refresh(&state.client).await.unwrap();
    let pending = view.go_to_page(2).unwrap();
    let result = state.client.search_flights(&pending.query).await;
    view.apply(pending.ticket, result);

    let pending = view.set_sort("price-desc".parse().unwrap()).unwrap();
    assert_eq!(pending.query.page, 1);
    let result = state.client.search_flights(&pending.query).await;
    view.apply(pending.ticket, result);

    let prices: Vec<_> = view.flights().iter().map(|f| f.price).collect();
    assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(mock.last_search()["sortOrder"], "desc");

    let pending = view.set_price_range(Some(dec!(4000)), Some(dec!(6000))).unwrap();
    let result = state.client.search_flights(&pending.query).await;
    view.apply(pending.ticket, result);

    let sent = mock.last_search();
    assert_eq!(sent["minPrice"], "4000");
    assert_eq!(sent["maxPrice"], "6000");
    assert_eq!(sent["page"], "1");
    assert!(view
        .flights()
        .iter()
        .all(|f| f.price >= dec!(4000) && f.price <= dec!(6000)));
}

#[tokio::test]
async fn test_late_response_does_not_overwrite_newer_results() {
    let mock = MockBackend::new(fleet()).with_slow_sort("price-desc");
    let state = state_for(&mock.spawn().await);

    let mut view = ResultsView::new(criteria(), 8);
    view.refresh(&state.client).await.unwrap();

    let slow = view.set_sort("price-desc".parse().unwrap()).unwrap();
    let fast = view.set_sort("duration-asc".parse().unwrap()).unwrap();

    let client = state.client.clone();
    let slow_query = slow.query.clone();
    let slow_task = tokio::spawn(async move { client.search_flights(&slow_query).await });
    let fast_result = state.client.search_flights(&fast.query).await;

    assert!(view.apply(fast.ticket, fast_result));
    let durations: Vec<_> = view.flights().iter().map(|f| f.duration_minutes).collect();

    let slow_result = slow_task.await.unwrap();
    assert!(slow_result.is_ok());
    assert!(!view.apply(slow.ticket, slow_result));

    let after: Vec<_> = view.flights().iter().map(|f| f.duration_minutes).collect();
    assert_eq!(durations, after);
    assert!(after.windows(2).all(|w| w[0] <= w[1]));
}

#[tokio::test]
async fn test_backend_down_surfaces_error() {
    // Nothing listens on the discard port.
    let state = state_for("http://127.0.0.1:9");
    let mut view = ResultsView::new(criteria(), 8);
    view.refresh(&state.client).await.unwrap();

    assert!(view.error().is_some());
    assert!(!view.is_loading());
    assert!(view.flights().is_empty());
}
