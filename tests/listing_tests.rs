use std::time::{Duration, Instant};

use servio_admin::error::Error;
use servio_admin::listing::{ListController, PageSize, Sort, SortDirection};
use servio_admin::resources::types::Page;

fn controller() -> ListController<u32> {
    ListController::new(PageSize::Ten, Duration::from_millis(500))
}

fn page_of(items: Vec<u32>, total: u64) -> Page<u32> {
    serde_json::from_value(serde_json::json!({
        "data": items,
        "recordsTotal": total,
    }))
    .unwrap()
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[test]
fn range_bounds_match_pagination_math() {
    let cases = [
        // (page, total, expected lower, expected upper)
        (1, 23, 1, 10),
        (2, 23, 11, 20),
        (3, 23, 21, 23),
        (1, 3, 1, 3),
        (1, 10, 1, 10),
    ];
    for (page, total, lower, upper) in cases {
        let mut ctl = controller();
        let req = ctl.take_request().unwrap();
        ctl.apply(req.seq, Ok(page_of(vec![], total)));
        ctl.set_page(page);
        assert_eq!(
            ctl.range_text(),
            Some(format!("Showing {} to {} of {}", lower, upper, total)),
            "page {} of {}",
            page,
            total
        );
    }
}

#[test]
fn empty_result_set_collapses_the_range_line() {
    let mut ctl = controller();
    let req = ctl.take_request().unwrap();
    ctl.apply(req.seq, Ok(page_of(vec![], 0)));
    assert_eq!(ctl.range_text(), None);
    assert_eq!(ctl.total_pages(), 0);
}

#[test]
fn page_3_of_23_shows_three_records() {
    let mut ctl = controller();
    let req = ctl.take_request().unwrap();
    ctl.apply(req.seq, Ok(page_of((1..=10).collect(), 23)));

    ctl.set_page(3);
    let req = ctl.take_request().unwrap();
    assert_eq!(req.query.page, 3);
    ctl.apply(req.seq, Ok(page_of(vec![21, 22, 23], 23)));

    assert_eq!(ctl.items().len(), 3);
    assert_eq!(ctl.total_pages(), 3);
    assert_eq!(ctl.range_text().unwrap(), "Showing 21 to 23 of 23");
}

#[test]
fn every_filter_change_resets_to_page_1() {
    for (key, value) in [
        ("role", "2"),
        ("category", "5"),
        ("service_category", "3"),
        ("workstation", "9"),
        ("rating_min", "4"),
        ("verified", "yes"),
    ] {
        let mut ctl = controller();
        ctl.set_page(4);
        ctl.set_filter(key, value);
        assert_eq!(ctl.page(), 1, "filter {} did not reset the page", key);
        let req = ctl.take_request().unwrap();
        assert_eq!(req.query.page, 1);
        assert_eq!(req.query.filters.get(key).map(String::as_str), Some(value));
    }
}

#[test]
fn debounce_commits_once_per_pause() {
    let mut ctl = controller();
    // drain the initial load
    let req = ctl.take_request().unwrap();
    ctl.apply(req.seq, Ok(page_of(vec![], 0)));

    let t0 = Instant::now();
    ctl.set_search_input("a", t0);
    ctl.set_page(2);
    let req = ctl.take_request().unwrap();
    ctl.apply(req.seq, Ok(page_of(vec![], 0)));
    ctl.set_search_input("ab", t0 + ms(200));
    ctl.set_search_input("abc", t0 + ms(400));

    // keystrokes alone never commit, and loading stays off during the wait
    assert!(!ctl.tick(t0 + ms(600)));
    assert_eq!(ctl.search(), "");
    assert!(!ctl.loading());
    assert!(ctl.take_request().is_none());

    // 500ms after the last keystroke: exactly one commit, page snapped to 1
    assert!(ctl.tick(t0 + ms(900)));
    assert_eq!(ctl.search(), "abc");
    assert_eq!(ctl.page(), 1);
    let req = ctl.take_request().unwrap();
    assert_eq!(req.query.search, "abc");
    assert!(ctl.take_request().is_none());

    // a later pause commits again, once
    let t1 = t0 + ms(2000);
    ctl.set_search_input("abcd", t1);
    assert!(ctl.tick(t1 + ms(500)));
    assert!(!ctl.tick(t1 + ms(600)));
    assert_eq!(ctl.search(), "abcd");
}

#[test]
fn sort_toggles_direction_then_switches_column() {
    let mut ctl = controller();

    ctl.toggle_sort("email");
    assert_eq!(
        ctl.sort(),
        Some(&Sort {
            field: "email".to_string(),
            direction: SortDirection::Asc
        })
    );

    ctl.toggle_sort("email");
    assert_eq!(ctl.sort().unwrap().direction, SortDirection::Desc);

    ctl.toggle_sort("id");
    let sort = ctl.sort().unwrap();
    assert_eq!(sort.field, "id");
    assert_eq!(sort.direction, SortDirection::Asc);
}

#[test]
fn fetch_failure_preserves_the_visible_page() {
    let mut ctl = controller();
    let req = ctl.take_request().unwrap();
    ctl.apply(req.seq, Ok(page_of(vec![1, 2], 2)));

    ctl.set_filter("role", "2");
    let req = ctl.take_request().unwrap();
    ctl.apply(req.seq, Err(Error::server(500, "upstream exploded")));

    assert_eq!(ctl.items(), &[1, 2]);
    assert_eq!(ctl.total(), 2);
    assert_eq!(ctl.error(), Some("upstream exploded"));
}

#[test]
fn delete_requires_confirmation() {
    let mut ctl = controller();
    let req = ctl.take_request().unwrap();
    ctl.apply(req.seq, Ok(page_of(vec![7, 8], 2)));

    ctl.request_delete(7);
    assert_eq!(ctl.pending_delete(), Some(7));

    // cancelling clears the stage and yields nothing to delete
    ctl.cancel_delete();
    assert_eq!(ctl.pending_delete(), None);
    assert_eq!(ctl.confirm_delete(), None);

    // confirming hands the id out exactly once
    ctl.request_delete(8);
    assert_eq!(ctl.confirm_delete(), Some(8));
    assert_eq!(ctl.confirm_delete(), None);

    ctl.remove_where(|&item| item == 8);
    assert_eq!(ctl.items(), &[7]);
    assert_eq!(ctl.total(), 1);
}

#[test]
fn page_size_set_is_closed() {
    assert_eq!(PageSize::from_u32(25), Some(PageSize::TwentyFive));
    assert_eq!(PageSize::from_u32(20), None);
    assert_eq!(
        PageSize::ALL.map(PageSize::get),
        [5, 10, 25, 50]
    );
}
