// Golden tests: every report over a small hand-checked site.
// Both paths must agree and match the expected table exactly.

use stackduo_engine::{
    answer_heavy_users, average_answers, linked_questions, run_task, top_commented_questions,
    top_locations,
};
use stackduo_types::{
    AnswerHeavyUser, AverageAnswers, CommentedQuestion, Dataset, LinkedQuestion, LocationCount,
    Post, PostLink, Task, User,
};

fn small_site() -> Dataset {
    Dataset::from_json(include_str!("fixtures/small_site.json")).expect("Failed to parse fixture")
}

#[test]
fn test_top_locations_golden() {
    let site = small_site();
    let result = top_locations(&site.users, &site.posts).expect("Failed to run report");
    result.verify(Task::TopLocations).expect("Paths disagree");

    // Berlin and London are both owned by several users; empty and null
    // locations never appear.
    assert_eq!(
        result.sql,
        vec![
            LocationCount { location: "Berlin".into(), count: 5 },
            LocationCount { location: "London".into(), count: 4 },
        ]
    );
}

#[test]
fn test_linked_questions_golden() {
    let site = small_site();
    let result = linked_questions(&site.posts, &site.post_links).expect("Failed to run report");
    result.verify(Task::LinkedQuestions).expect("Paths disagree");

    let expected: Vec<LinkedQuestion> = [
        ("How to parse JSON", 3),
        ("Borrow checker woes", 2),
        ("Error handling", 1),
        ("Lifetimes explained", 1),
    ]
    .into_iter()
    .map(|(title, num_links)| LinkedQuestion {
        title: Some(title.to_string()),
        num_links,
    })
    .collect();
    assert_eq!(result.sql, expected);
}

#[test]
fn test_top_commented_questions_golden() {
    let site = small_site();
    let result = top_commented_questions(&site.comments, &site.posts, &site.users)
        .expect("Failed to run report");
    result.verify(Task::TopCommentedQuestions).expect("Paths disagree");

    assert_eq!(
        result.sql,
        vec![
            CommentedQuestion {
                title: Some("Borrow checker woes".into()),
                comment_count: 1,
                view_count: Some(250),
                comments_total_score: 10,
                display_name: "Carol".into(),
                reputation: 300,
                location: Some("Berlin".into()),
            },
            CommentedQuestion {
                title: Some("How to parse JSON".into()),
                comment_count: 2,
                view_count: Some(100),
                comments_total_score: 7,
                display_name: "Alice".into(),
                reputation: 100,
                location: Some("London".into()),
            },
            CommentedQuestion {
                title: Some("Lifetimes explained".into()),
                comment_count: 3,
                view_count: Some(75),
                comments_total_score: 3,
                display_name: "Eve".into(),
                reputation: 75,
                location: Some("London".into()),
            },
            CommentedQuestion {
                title: Some("Async traits".into()),
                comment_count: 0,
                view_count: Some(40),
                comments_total_score: 1,
                display_name: "Bob".into(),
                reputation: 50,
                location: Some(String::new()),
            },
        ]
    );
}

#[test]
fn test_answer_heavy_users_golden() {
    let site = small_site();
    let result = answer_heavy_users(&site.posts, &site.users).expect("Failed to run report");
    result.verify(Task::AnswerHeavyUsers).expect("Paths disagree");

    // Dave answers twice but never asks, so the questions join drops him.
    assert_eq!(
        result.sql,
        vec![AnswerHeavyUser {
            display_name: "Bob".into(),
            questions_number: 1,
            answers_number: 3,
            location: Some(String::new()),
            reputation: 50,
            up_votes: 5,
            down_votes: 0,
        }]
    );
}

#[test]
fn test_average_answers_golden() {
    let site = small_site();
    let result = average_answers(&site.posts, &site.users).expect("Failed to run report");
    result.verify(Task::AverageAnswers).expect("Paths disagree");

    // Owners are matched on AccountId, so post owner 1 is reported as Bob.
    let expected = vec![
        AverageAnswers {
            account_id: 1.0,
            display_name: "bob".into(),
            location: Some(String::new()),
            average_answers_count: 3.0,
        },
        AverageAnswers {
            account_id: 3.0,
            display_name: "alice".into(),
            location: Some("london".into()),
            average_answers_count: 1.5,
        },
        AverageAnswers {
            account_id: 2.0,
            display_name: "carol".into(),
            location: Some("berlin".into()),
            average_answers_count: 1.0,
        },
        AverageAnswers {
            account_id: 5.0,
            display_name: "dave".into(),
            location: None,
            average_answers_count: 1.0,
        },
    ];
    assert_eq!(result.sql, expected);
}

#[test]
fn test_every_task_agrees_on_fixture() {
    let site = small_site();
    for task in Task::ALL {
        let report = run_task(task, &site).expect("Failed to run task");
        assert!(report.agrees, "{}: {:?}", task, report.mismatch);
    }
}

#[test]
fn test_documented_examples() {
    let users = vec![User {
        id: 1,
        display_name: "u".into(),
        location: Some("NYC".into()),
        ..Default::default()
    }];
    let posts = vec![Post {
        id: 10,
        post_type_id: 1,
        owner_user_id: Some(1),
        ..Default::default()
    }];
    let result = top_locations(&users, &posts).expect("Failed to run report");
    assert_eq!(result.sql, vec![LocationCount { location: "NYC".into(), count: 1 }]);
    assert_eq!(result.pipeline, result.sql);

    let posts = vec![Post {
        id: 5,
        post_type_id: 1,
        title: Some("A".into()),
        ..Default::default()
    }];
    let links = vec![
        PostLink { id: None, post_id: 6, related_post_id: 5 },
        PostLink { id: None, post_id: 7, related_post_id: 5 },
    ];
    let result = linked_questions(&posts, &links).expect("Failed to run report");
    assert_eq!(
        result.sql,
        vec![LinkedQuestion { title: Some("A".into()), num_links: 2 }]
    );
    assert_eq!(result.pipeline, result.sql);
}
