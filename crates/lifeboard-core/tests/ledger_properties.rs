//! Load, write, promotion and archive properties of the ledger

use chrono::Duration;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use std::sync::Arc;

use lifeboard_core::{LedgerConfig, Outcome, SkipReason};
use lifeboard_partition::{MemoryStore, PartitionSlot};
use lifeboard_record::{Category, Domain, Focus, Opportunity, Record, RecordId, RecordKind, Task};
use lifeboard_test_utils::{
    completed_task, days_ago, epoch, partition_ids, promoted_task, seed, task, TestBed,
};

const MAIN: PartitionSlot = PartitionSlot::Main;
const FIN: PartitionSlot = PartitionSlot::Domain(Domain::Financial);

fn sorted_by_id<R: Record>(records: &[R]) -> Vec<R> {
    let mut records = records.to_vec();
    records.sort_by(|a, b| a.id().cmp(b.id()));
    records
}

#[test]
fn load_is_idempotent_over_messy_layout() {
    let store = Arc::new(MemoryStore::new());
    seed(
        &store,
        "dashboard_main_tasks",
        json!([{
            "id": "1",
            "text": "promoted",
            "category": "MAIN",
            "originalCategory": "PERSONAL"
        }]),
    );
    seed(
        &store,
        "tasks_personal",
        json!([
            {"id": "1", "text": "stale copy", "category": "PERSONAL"},
            {"id": "2", "text": "plain"}
        ]),
    );
    store.insert_raw("tasks_occ", "not json at all");

    let bed = TestBed::over(store, LedgerConfig::default());
    let first = bed.ledger.records::<Task>().to_vec();
    let second = bed.reopen().records::<Task>().to_vec();

    assert_eq!(first, second);
    assert_eq!(first.len(), 2);
    assert_eq!(first[0].text, "promoted");
    assert_eq!(bed.ledger.last_load().malformed, vec!["tasks_occ".to_string()]);
}

#[test]
fn mutate_then_load_round_trips() {
    let mut bed = TestBed::new();
    let collection = vec![
        task("a", "one", Category::Personal),
        promoted_task("b", "two", Domain::Occupational),
        task("c", "three", Category::Main),
        completed_task("d", "four", Category::Financial, days_ago(1)),
    ];

    assert!(bed.ledger.mutate(collection.clone()).is_applied());
    let mut reopened = bed.reopen();
    let loaded = reopened.load::<Task>().to_vec();

    assert_eq!(sorted_by_id(&loaded), sorted_by_id(&collection));
}

#[test]
fn promoted_record_is_in_main_and_origin() {
    let mut bed = TestBed::new();
    let id = bed.ledger.add_task("Buy milk", Category::Financial).applied().unwrap();
    let _ = bed.ledger.promote::<Task>(&id);

    let main = bed.ids_in(RecordKind::Task, MAIN);
    let fin = bed.ids_in(RecordKind::Task, FIN);
    assert_eq!(main, vec![id.to_string()]);
    assert_eq!(fin, vec![id.to_string()]);
    assert!(bed.ids_in(RecordKind::Task, PartitionSlot::Domain(Domain::Personal)).is_empty());
}

#[test]
fn focus_and_opportunity_promote_to_their_own_origin() {
    let mut bed = TestBed::new();
    let focus = bed.ledger.add_focus("save", Category::Financial).applied().unwrap();
    let opp = bed.ledger.add_opportunity("job", Category::Occupational).applied().unwrap();
    let _ = bed.ledger.promote::<Focus>(&focus);
    let _ = bed.ledger.promote::<Opportunity>(&opp);

    assert_eq!(partition_ids(&bed.store, "fin_goals_data"), vec![focus.to_string()]);
    assert!(partition_ids(&bed.store, "projects_personal").is_empty());
    assert_eq!(partition_ids(&bed.store, "opps_occ"), vec![opp.to_string()]);
    assert!(partition_ids(&bed.store, "opps_personal").is_empty());
}

#[test]
fn archive_window_is_seven_days() {
    let mut bed = TestBed::new();
    let collection = vec![
        completed_task("six", "six days", Category::Personal, days_ago(6)),
        completed_task("eight", "eight days", Category::Personal, days_ago(8)),
    ];
    let _ = bed.ledger.mutate(collection);

    let view: Vec<_> = bed.ledger.archive_view(None).iter().map(|t| t.id().to_string()).collect();
    assert_eq!(view, vec!["six"]);
    // Out of the window, but still stored.
    assert!(bed.ledger.get::<Task>(&RecordId::new("eight")).is_some());
    assert!(partition_ids(&bed.store, "tasks_personal").contains(&"eight".to_string()));
}

#[test]
fn archive_sorts_newest_first() {
    let mut bed = TestBed::new();
    let _ = bed.ledger.mutate(vec![
        completed_task("old", "x", Category::Main, days_ago(5)),
        completed_task("new", "x", Category::Financial, days_ago(1)),
        completed_task("mid", "x", Category::Personal, days_ago(3)),
    ]);
    let view: Vec<_> = bed.ledger.archive_view(None).iter().map(|t| t.id().to_string()).collect();
    assert_eq!(view, vec!["new", "mid", "old"]);
}

#[test]
fn restore_clears_completion_and_leaves_archive() {
    let mut bed = TestBed::new();
    let _ = bed.ledger.mutate(vec![completed_task("t", "x", Category::Occupational, days_ago(2))]);
    let id = RecordId::new("t");

    assert!(bed.ledger.restore(&id).is_applied());

    let task = bed.ledger.get::<Task>(&id).unwrap();
    assert!(!task.completed);
    assert_eq!(task.completed_at, None);
    assert!(bed.ledger.archive_view(None).is_empty());
    assert_eq!(bed.ledger.category_view::<Task>(Category::Occupational).len(), 1);

    let stored = bed.reopen();
    assert!(!stored.get::<Task>(&id).unwrap().completed);
}

#[test]
fn purge_is_permanent_and_idempotent() {
    let mut bed = TestBed::new();
    let _ = bed.ledger.mutate(vec![{
        let mut t = promoted_task("p", "gone soon", Domain::Personal);
        t.set_completed(true, days_ago(1));
        t
    }]);
    let id = RecordId::new("p");

    assert_eq!(bed.ledger.purge(&id), Outcome::Applied(()));
    assert_eq!(bed.ledger.purge(&id), Outcome::Skipped(SkipReason::NotFound));

    for key in ["dashboard_main_tasks", "tasks_personal", "tasks_occ", "fin_tasks_v2"] {
        assert!(partition_ids(&bed.store, key).is_empty(), "{key}");
    }
    assert!(bed.reopen().records::<Task>().is_empty());
}

#[test]
fn delete_twice_is_a_no_op() {
    let mut bed = TestBed::new();
    let id = bed.ledger.add_idea("x", Category::Main).applied().unwrap();
    assert!(bed.ledger.delete::<lifeboard_record::Idea>(&id).is_applied());
    assert_eq!(
        bed.ledger.delete::<lifeboard_record::Idea>(&id),
        Outcome::Skipped(SkipReason::NotFound)
    );
}

#[test]
fn buy_milk_walkthrough() {
    let mut bed = TestBed::new();
    let _ = bed.ledger.mutate(vec![task("t1", "Buy milk", Category::Financial)]);
    let t1 = RecordId::new("t1");

    let _ = bed.ledger.promote::<Task>(&t1);
    let task = bed.ledger.get::<Task>(&t1).unwrap();
    assert_eq!(task.header.category, Category::Main);
    assert_eq!(task.header.original_category, Some(Domain::Financial));
    assert_eq!(bed.ids_in(RecordKind::Task, MAIN), vec!["t1"]);
    assert_eq!(bed.ids_in(RecordKind::Task, FIN), vec!["t1"]);

    let _ = bed.ledger.set_completed(&t1, true);
    assert_eq!(bed.ledger.get::<Task>(&t1).unwrap().completed_at, Some(epoch()));
    assert_eq!(bed.ledger.archive_view(None).len(), 1);

    let _ = bed.ledger.restore(&t1);
    assert!(bed.ledger.archive_view(None).is_empty());
    let task = bed.ledger.get::<Task>(&t1).unwrap();
    assert_eq!(task.header.category, Category::Main);
    assert_eq!(task.header.original_category, Some(Domain::Financial));

    let _ = bed.ledger.demote::<Task>(&t1);
    assert_eq!(bed.ledger.get::<Task>(&t1).unwrap().header.category, Category::Financial);
    assert!(bed.ids_in(RecordKind::Task, MAIN).is_empty());
    assert_eq!(bed.ids_in(RecordKind::Task, FIN), vec!["t1"]);
}

#[test]
fn archive_follows_the_clock() {
    let mut bed = TestBed::new();
    let id = bed.ledger.add_task("x", Category::Personal).applied().unwrap();
    let _ = bed.ledger.set_completed(&id, true);
    assert_eq!(bed.ledger.archive_view(None).len(), 1);

    bed.clock.advance(Duration::days(7) + Duration::seconds(1));
    assert!(bed.ledger.archive_view(None).is_empty());
}

fn any_task() -> impl Strategy<Value = (Category, Option<Domain>, bool, String)> {
    let placement = prop_oneof![
        Just((Category::Personal, None)),
        Just((Category::Occupational, None)),
        Just((Category::Financial, None)),
        Just((Category::Main, None)),
        Just((Category::Main, Some(Domain::Personal))),
        Just((Category::Main, Some(Domain::Occupational))),
        Just((Category::Main, Some(Domain::Financial))),
    ];
    (placement, any::<bool>(), "[a-z ]{0,16}")
        .prop_map(|((category, origin), completed, text)| (category, origin, completed, text))
}

fn build(specs: &[(Category, Option<Domain>, bool, String)]) -> Vec<Task> {
    specs
        .iter()
        .enumerate()
        .map(|(i, (category, origin, completed, text))| {
            let mut t = task(&format!("{i}"), text, *category);
            t.header.original_category = *origin;
            if *completed {
                t.set_completed(true, days_ago(i as i64 % 10));
            }
            t
        })
        .collect()
}

fn any_domain() -> impl Strategy<Value = Domain> {
    prop_oneof![
        Just(Domain::Personal),
        Just(Domain::Occupational),
        Just(Domain::Financial),
    ]
}

proptest! {
    #[test]
    fn prop_round_trip_any_collection(specs in prop::collection::vec(any_task(), 0..20)) {
        let mut bed = TestBed::new();
        let collection = build(&specs);
        let _ = bed.ledger.mutate(collection.clone());

        let reopened = bed.reopen();
        prop_assert_eq!(sorted_by_id(reopened.records::<Task>()), sorted_by_id(&collection));

        let again = bed.reopen();
        prop_assert_eq!(again.records::<Task>(), reopened.records::<Task>());
    }

    #[test]
    fn prop_promote_demote_restores_record(domain in any_domain(), text in "[a-z]{1,12}") {
        let mut bed = TestBed::new();
        let id = bed.ledger.add_task(text, domain.category()).applied().unwrap();
        let before = bed.ledger.get::<Task>(&id).unwrap().clone();

        prop_assert!(bed.ledger.promote::<Task>(&id).is_applied());
        prop_assert!(bed.ledger.demote::<Task>(&id).is_applied());

        prop_assert_eq!(bed.ledger.get::<Task>(&id).unwrap(), &before);
    }
}
