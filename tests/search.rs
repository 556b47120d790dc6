use std::collections::HashSet;

use member_query::domain::search::{MemberSort, MemberSortField, SearchCondition};
use member_query::dto::member_team::MemberTeamView;
use member_query::forms::search::SearchMembersForm;
use member_query::pagination::PageRequest;
use member_query::repository::{CountStrategy, MemberTeamQuery, MemberTeamReader};
use member_query::services::search::{PageLimits, search_members};

mod common;

fn usernames(rows: &[MemberTeamView]) -> Vec<Option<&str>> {
    rows.iter().map(|row| row.username.as_deref()).collect()
}

#[test]
fn test_unconstrained_search_returns_every_row() {
    let test_db = common::TestDb::new("test_unconstrained_search_returns_every_row.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let rows = repo.search(&SearchCondition::new()).unwrap();

    assert_eq!(rows.len(), 4);
    assert_eq!(
        usernames(&rows),
        vec![Some("member1"), Some("member2"), Some("member3"), Some("member4")]
    );
}

#[test]
fn test_username_filter() {
    let test_db = common::TestDb::new("test_username_filter.db");
    let repo = test_db.repo();
    let (team_a, _) = common::seed_teams(&repo);

    let rows = repo
        .search(&SearchCondition::new().username("member1"))
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].username.as_deref(), Some("member1"));
    assert_eq!(rows[0].age, 10);
    assert_eq!(rows[0].team_id, Some(team_a.id.get()));
    assert_eq!(rows[0].team_name.as_deref(), Some("teamA"));
}

#[test]
fn test_age_range_filter() {
    let test_db = common::TestDb::new("test_age_range_filter.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let rows = repo
        .search(&SearchCondition::new().age_goe(20).age_loe(30))
        .unwrap();

    let ages: Vec<_> = rows.iter().map(|row| row.age).collect();
    assert_eq!(ages, vec![20, 30]);
}

#[test]
fn test_team_name_and_age_filters_combine() {
    let test_db = common::TestDb::new("test_team_name_and_age_filters_combine.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let rows = repo
        .search(&SearchCondition::new().team_name("teamB").age_goe(35))
        .unwrap();

    assert_eq!(usernames(&rows), vec![Some("member4")]);
}

#[test]
fn test_blank_text_fields_are_ignored() {
    let test_db = common::TestDb::new("test_blank_text_fields_are_ignored.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let condition = SearchCondition::new().username("").team_name("   ");

    assert_eq!(repo.search(&condition).unwrap().len(), 4);
    assert_eq!(repo.search_by_builder(&condition).unwrap().len(), 4);
}

#[test]
fn test_builder_and_fragments_agree() {
    let test_db = common::TestDb::new("test_builder_and_fragments_agree.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);
    common::member(&repo, None, 25, None);

    let conditions = [
        SearchCondition::new(),
        SearchCondition::new().username("member2"),
        SearchCondition::new().team_name("teamA"),
        SearchCondition::new().age_goe(15),
        SearchCondition::new().age_loe(25),
        SearchCondition::new().team_name("teamB").age_goe(20).age_loe(30),
        SearchCondition::new().username("member1").team_name("teamB"),
        SearchCondition::new().username(""),
    ];

    for condition in &conditions {
        let by_fragments = repo.search(condition).unwrap();
        let by_builder = repo.search_by_builder(condition).unwrap();
        assert_eq!(by_fragments, by_builder, "condition {condition:?}");
        assert_eq!(
            repo.count_member_teams(condition).unwrap(),
            by_fragments.len(),
            "condition {condition:?}"
        );
    }
}

#[test]
fn test_member_without_team_is_kept_by_outer_join() {
    let test_db = common::TestDb::new("test_member_without_team_is_kept_by_outer_join.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);
    let loner = common::member(&repo, Some("loner"), 50, None);

    let rows = repo.search(&SearchCondition::new()).unwrap();

    assert_eq!(rows.len(), 5);
    let row = rows
        .iter()
        .find(|row| row.member_id == loner.id.get())
        .expect("member without team is present");
    assert!(row.team_id.is_none());
    assert!(row.team_name.is_none());

    // A team filter drops the member again.
    let in_team_a = repo
        .search(&SearchCondition::new().team_name("teamA"))
        .unwrap();
    assert!(in_team_a.iter().all(|row| row.member_id != loner.id.get()));
}

#[test]
fn test_page_sorted_by_username_desc() {
    let test_db = common::TestDb::new("test_page_sorted_by_username_desc.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let query = MemberTeamQuery::new(SearchCondition::new())
        .sort_by(MemberSort::desc(MemberSortField::Username))
        .paginate(PageRequest::new(1, 2));
    let page = repo.query_member_teams(query).unwrap();

    assert_eq!(usernames(&page.items), vec![Some("member3"), Some("member2")]);
    assert_eq!(page.total, 4);
    assert_eq!(page.offset, 1);
    assert_eq!(page.limit, 2);
}

#[test]
fn test_search_page_counts_all_matches() {
    let test_db = common::TestDb::new("test_search_page_counts_all_matches.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let page = repo.search_page(&SearchCondition::new(), 0, 3).unwrap();
    assert_eq!(usernames(&page.items), vec![Some("member1"), Some("member2"), Some("member3")]);
    assert_eq!(page.total, 4);
    assert!(page.has_next());

    let beyond = repo.search_page(&SearchCondition::new(), 10, 3).unwrap();
    assert!(beyond.items.is_empty());
    assert_eq!(beyond.total, 4);
}

#[test]
fn test_optimized_page_reports_same_total() {
    let test_db = common::TestDb::new("test_optimized_page_reports_same_total.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);
    let condition = SearchCondition::new();

    for (offset, limit) in [(0, 10), (0, 2), (2, 3), (3, 2), (10, 2)] {
        let counted = repo.search_page(&condition, offset, limit).unwrap();
        let optimized = repo.search_page_optimized(&condition, offset, limit).unwrap();
        assert_eq!(counted, optimized, "offset {offset}, limit {limit}");
    }
}

#[test]
fn test_sort_with_nulls_last() {
    let test_db = common::TestDb::new("test_sort_with_nulls_last.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);
    common::member(&repo, None, 100, None);
    common::member(&repo, Some("member5"), 100, None);
    common::member(&repo, Some("member6"), 100, None);

    let query = MemberTeamQuery::new(SearchCondition::new().age_goe(100))
        .sort_by(MemberSort::desc(MemberSortField::Age))
        .sort_by(MemberSort::asc(MemberSortField::Username).nulls_last());
    let rows = repo.query_member_teams(query).unwrap().items;

    assert_eq!(usernames(&rows), vec![Some("member5"), Some("member6"), None]);
}

#[test]
fn test_sort_with_nulls_first() {
    let test_db = common::TestDb::new("test_sort_with_nulls_first.db");
    let repo = test_db.repo();
    common::member(&repo, Some("member5"), 100, None);
    common::member(&repo, None, 100, None);
    common::member(&repo, Some("member6"), 100, None);

    let query = MemberTeamQuery::new(SearchCondition::new())
        .sort_by(MemberSort::asc(MemberSortField::Username).nulls_first());
    let page = repo.query_member_teams(query).unwrap();

    assert_eq!(usernames(&page.items), vec![None, Some("member5"), Some("member6")]);
    assert_eq!(page.total, 3);
}

#[test]
fn test_repeated_search_is_idempotent() {
    let test_db = common::TestDb::new("test_repeated_search_is_idempotent.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);
    let condition = SearchCondition::new().age_goe(20);

    let first: HashSet<_> = repo.search(&condition).unwrap().into_iter().collect();
    let second: HashSet<_> = repo.search(&condition).unwrap().into_iter().collect();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second);
}

#[test]
fn test_search_service_against_database() {
    let test_db = common::TestDb::new("test_search_service_against_database.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let form = SearchMembersForm {
        team_name: Some("teamB".into()),
        page: Some(1),
        per_page: Some(1),
        sort: vec!["age,desc".into()],
        ..SearchMembersForm::default()
    };
    let page = search_members(&repo, PageLimits::default(), form).unwrap();

    assert_eq!(usernames(&page.items), vec![Some("member4")]);
    assert_eq!(page.total, 2);
    assert_eq!(page.total_pages(), 2);
}

#[test]
fn test_count_strategy_does_not_change_results() {
    let test_db = common::TestDb::new("test_count_strategy_does_not_change_results.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let base = MemberTeamQuery::new(SearchCondition::new().team_name("teamA"))
        .paginate(PageRequest::new(0, 5));
    let always = repo.query_member_teams(base.clone()).unwrap();
    let when_needed = repo
        .query_member_teams(base.count_strategy(CountStrategy::WhenNeeded))
        .unwrap();

    assert_eq!(always, when_needed);
    assert_eq!(always.total, 2);
}

#[test]
fn test_offset_past_i64_range_returns_empty_page() {
    let test_db = common::TestDb::new("test_offset_past_i64_range_returns_empty_page.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);
    let condition = SearchCondition::new();

    let counted = repo.search_page(&condition, usize::MAX, 10).unwrap();
    assert!(counted.items.is_empty());
    assert_eq!(counted.total, 4);
    assert!(!counted.has_next());

    let optimized = repo
        .search_page_optimized(&condition, usize::MAX, 10)
        .unwrap();
    assert_eq!(counted, optimized);
}

#[test]
fn test_oversized_limit_returns_every_row() {
    let test_db = common::TestDb::new("test_oversized_limit_returns_every_row.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let page = repo
        .search_page_optimized(&SearchCondition::new(), 1, usize::MAX)
        .unwrap();

    assert_eq!(
        usernames(&page.items),
        vec![Some("member2"), Some("member3"), Some("member4")]
    );
    assert_eq!(page.total, 4);
}

#[test]
fn test_search_service_with_huge_page_number() {
    let test_db = common::TestDb::new("test_search_service_with_huge_page_number.db");
    let repo = test_db.repo();
    common::seed_teams(&repo);

    let form = SearchMembersForm {
        page: Some(usize::MAX),
        per_page: Some(20),
        ..SearchMembersForm::default()
    };
    let page = search_members(&repo, PageLimits::default(), form).unwrap();

    assert!(page.items.is_empty());
    assert_eq!(page.total, 4);
}
