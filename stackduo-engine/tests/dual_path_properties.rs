// Property tests: over generated sites the SQL and pipeline paths agree,
// and each report keeps its ordering and size guarantees.

use proptest::prelude::*;
use std::collections::HashSet;

use stackduo_engine::{
    answer_heavy_users, average_answers, linked_questions, run_task, top_commented_questions,
    top_locations,
};
use stackduo_types::{Comment, Dataset, Post, PostLink, Task, User};

fn location() -> impl Strategy<Value = Option<String>> {
    prop::sample::select(vec![
        None,
        Some(""),
        Some(" "),
        Some("NYC"),
        Some("nyc"),
        Some("Berlin"),
        Some("None"),
        Some(" London "),
    ])
    .prop_map(|l| l.map(str::to_string))
}

fn display_name() -> impl Strategy<Value = String> {
    prop::sample::select(vec!["Ada", " ada ", "Bob", "CAROL", "dave"]).prop_map(str::to_string)
}

fn users() -> impl Strategy<Value = Vec<User>> {
    prop::collection::vec(
        (
            display_name(),
            location(),
            0i64..1000,
            0i64..50,
            0i64..50,
            any::<bool>(),
        ),
        0..12,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(
                |(i, (display_name, location, reputation, up_votes, down_votes, has_account))| {
                    let id = i as i64 + 1;
                    User {
                        id,
                        display_name,
                        location,
                        reputation,
                        up_votes,
                        down_votes,
                        // Shifted so account ids and user ids overlap but differ.
                        account_id: has_account.then_some(id + 1),
                    }
                },
            )
            .collect()
    })
}

fn posts() -> impl Strategy<Value = Vec<Post>> {
    prop::collection::vec(
        (
            prop::sample::select(vec![1i64, 1, 2, 2, 2, 3]),
            prop::option::of(0i64..14),
            prop::option::of(1i64..32),
            prop::option::of(prop::sample::select(vec!["a", "b", "B", "c"])),
            0i64..10,
            prop::option::of(0i64..500),
        ),
        0..30,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(
                |(i, (post_type_id, owner_user_id, parent_id, title, comment_count, view_count))| {
                    Post {
                        id: i as i64 + 1,
                        post_type_id,
                        parent_id,
                        owner_user_id,
                        title: title.map(str::to_string),
                        comment_count,
                        view_count,
                    }
                },
            )
            .collect()
    })
}

fn comments() -> impl Strategy<Value = Vec<Comment>> {
    prop::collection::vec((1i64..32, -5i64..20), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(post_id, score)| Comment {
                id: None,
                post_id,
                score,
            })
            .collect()
    })
}

fn post_links() -> impl Strategy<Value = Vec<PostLink>> {
    prop::collection::vec((1i64..32, 1i64..32), 0..40).prop_map(|rows| {
        rows.into_iter()
            .map(|(post_id, related_post_id)| PostLink {
                id: None,
                post_id,
                related_post_id,
            })
            .collect()
    })
}

fn dataset() -> impl Strategy<Value = Dataset> {
    (users(), posts(), comments(), post_links()).prop_map(|(users, posts, comments, post_links)| {
        Dataset {
            users,
            posts,
            comments,
            post_links,
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_paths_agree(site in dataset()) {
        for task in Task::ALL {
            let report = run_task(task, &site).expect("Failed to run task");
            prop_assert!(report.agrees, "{}: {:?}", task, report.mismatch);
        }
    }

    #[test]
    fn prop_top_locations_shape(site in dataset()) {
        let result = top_locations(&site.users, &site.posts).expect("Failed to run report");
        let rows = &result.sql;

        prop_assert!(rows.len() <= 10);
        prop_assert!(rows.iter().all(|r| !r.location.is_empty()));
        prop_assert!(rows.windows(2).all(|w| w[0].count >= w[1].count));

        let user_ids: HashSet<i64> = site.users.iter().map(|u| u.id).collect();
        let owned = site
            .posts
            .iter()
            .filter(|p| p.owner_user_id.is_some_and(|o| user_ids.contains(&o)))
            .count() as i64;
        prop_assert!(rows.iter().map(|r| r.count).sum::<i64>() <= owned);
    }

    #[test]
    fn prop_linked_questions_shape(site in dataset()) {
        let result = linked_questions(&site.posts, &site.post_links).expect("Failed to run report");

        let related: HashSet<i64> = site.post_links.iter().map(|l| l.related_post_id).collect();
        let linked_titles: HashSet<Option<String>> = site
            .posts
            .iter()
            .filter(|p| p.post_type_id == 1 && related.contains(&p.id))
            .map(|p| p.title.clone())
            .collect();

        prop_assert!(result.sql.iter().all(|r| linked_titles.contains(&r.title)));
        let ordered = result.sql.windows(2).all(|w| {
            w[0].num_links > w[1].num_links
                || (w[0].num_links == w[1].num_links && w[0].title <= w[1].title)
        });
        prop_assert!(ordered, "not ordered by links then title: {:?}", result.sql);
    }

    #[test]
    fn prop_top_commented_questions_shape(site in dataset()) {
        let result = top_commented_questions(&site.comments, &site.posts, &site.users)
            .expect("Failed to run report");

        prop_assert!(result.sql.len() <= 10);
        prop_assert!(result
            .sql
            .windows(2)
            .all(|w| w[0].comments_total_score >= w[1].comments_total_score));
    }

    #[test]
    fn prop_answer_heavy_users_shape(site in dataset()) {
        let result = answer_heavy_users(&site.posts, &site.users).expect("Failed to run report");

        prop_assert!(result.sql.len() <= 5);
        prop_assert!(result.sql.iter().all(|r| r.answers_number > r.questions_number));
        prop_assert!(result.sql.iter().all(|r| r.questions_number > 0));
        prop_assert!(result
            .sql
            .windows(2)
            .all(|w| w[0].answers_number >= w[1].answers_number));
    }

    #[test]
    fn prop_average_answers_shape(site in dataset()) {
        let result = average_answers(&site.posts, &site.users).expect("Failed to run report");
        let rows = &result.sql;

        prop_assert!(rows.len() <= 10);
        for row in rows {
            let scaled = row.average_answers_count * 10.0;
            prop_assert!((scaled - scaled.round()).abs() < 1e-9);
            if let Some(location) = &row.location {
                prop_assert_eq!(location, &location.to_lowercase());
                prop_assert_ne!(location.as_str(), "none");
            }
        }
        let ordered = rows.windows(2).all(|w| {
            w[0].average_answers_count > w[1].average_answers_count
                || (w[0].average_answers_count == w[1].average_answers_count
                    && w[0].account_id < w[1].account_id)
        });
        prop_assert!(ordered, "not ordered by average then account: {:?}", rows);
    }
}
