//! HTTP tests for publications, comments and the per-author counters

mod common;

use axum::http::StatusCode;
use chrono::{Days, Utc};
use common::spawn_app;
use serde_json::{Value, json};
use social::core::filters::DATE_FORMAT;
use uuid::Uuid;

mod publish_tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_sets_caller_as_author() {
        let app = spawn_app();
        let ada = app.member("ada").await;

        let response = app
            .post_as(&ada, "/posts")
            .json(&json!({ "title": "Hello", "content": "First post" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["author"], ada.id.to_string());
        assert_eq!(body["title"], "Hello");
        assert!(body["created"].is_string());
    }

    #[tokio::test]
    async fn test_publish_increments_publications_count() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        app.publish_many(&ada, 2).await;

        let detail: Value = app.get_as(&ada, &format!("/users/{}", ada.id)).await.json();
        assert_eq!(detail["publications_count"], 2);
        assert_eq!(detail["comments_count"], 0);
    }

    #[tokio::test]
    async fn test_publish_validates_lengths() {
        let app = spawn_app();
        let ada = app.member("ada").await;

        let response = app
            .post_as(&ada, "/posts")
            .json(&json!({ "title": "t".repeat(201), "content": "" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_publish_requires_token() {
        let app = spawn_app();
        let response = app
            .server
            .post("/posts")
            .json(&json!({ "title": "Hello", "content": "body" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}

mod listing_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        app.publish_many(&ada, 3).await;

        let body: Value = app.get_as(&ada, "/posts").await.json();
        let titles: Vec<&str> = body["results"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["title"].as_str().unwrap())
            .collect();
        assert_eq!(titles, vec!["post 2", "post 1", "post 0"]);
    }

    #[tokio::test]
    async fn test_filter_by_author() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        let bob = app.member("bob").await;
        app.publish_many(&ada, 2).await;
        app.publish_many(&bob, 3).await;

        let body: Value = app
            .get_as(&ada, "/posts")
            .add_query_param("author", bob.id)
            .await
            .json();
        assert_eq!(body["total_items"], 3);
        for publication in body["results"].as_array().unwrap() {
            assert_eq!(publication["author"], bob.id.to_string());
        }
    }

    #[tokio::test]
    async fn test_filter_by_date_range() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        app.publish_many(&ada, 2).await;

        let today = Utc::now().date_naive();
        let yesterday = today.checked_sub_days(Days::new(1)).unwrap();

        let body: Value = app
            .get_as(&ada, "/posts")
            .add_query_param("from_date", today.format(DATE_FORMAT).to_string())
            .add_query_param("to_date", today.format(DATE_FORMAT).to_string())
            .await
            .json();
        assert_eq!(body["total_items"], 2);

        let body: Value = app
            .get_as(&ada, "/posts")
            .add_query_param("to_date", yesterday.format(DATE_FORMAT).to_string())
            .await
            .json();
        assert_eq!(body["total_items"], 0);
    }

    #[tokio::test]
    async fn test_malformed_date_is_bad_request() {
        let app = spawn_app();
        let ada = app.member("ada").await;

        let response = app
            .get_as(&ada, "/posts")
            .add_query_param("from_date", "2024-01-31")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: Value = response.json();
        assert_eq!(body["code"], "INVALID_FILTER");
        assert_eq!(body["details"]["field"], "from_date");
    }
}

mod detail_tests {
    use super::*;

    #[tokio::test]
    async fn test_detail_has_author_and_three_newest_comments() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        let bob = app.member("bob").await;
        let posts = app.publish_many(&ada, 1).await;
        let post_id = posts[0]["id"].as_str().unwrap();

        for i in 0..5 {
            app.post_as(&bob, &format!("/posts/{}/comments", post_id))
                .json(&json!({ "content": format!("comment {}", i) }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let body: Value = app.get_as(&ada, &format!("/posts/{}", post_id)).await.json();
        assert_eq!(body["publication"]["id"], post_id);
        assert_eq!(body["author"]["username"], "ada");
        let comments: Vec<&str> = body["last_3_comments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["content"].as_str().unwrap())
            .collect();
        assert_eq!(comments, vec!["comment 4", "comment 3", "comment 2"]);
    }

    #[tokio::test]
    async fn test_detail_without_comments() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        let posts = app.publish_many(&ada, 1).await;
        let post_id = posts[0]["id"].as_str().unwrap();

        let body: Value = app.get_as(&ada, &format!("/posts/{}", post_id)).await.json();
        assert_eq!(body["last_3_comments"], json!([]));
    }

    #[tokio::test]
    async fn test_unknown_publication_is_not_found() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        let ghost = Uuid::new_v4();

        let response = app.get_as(&ada, &format!("/posts/{}", ghost)).await;
        response.assert_status(StatusCode::NOT_FOUND);
        let body: Value = response.json();
        assert_eq!(
            body["message"],
            format!("Publication with id={} does not exist.", ghost)
        );
    }
}

mod comment_tests {
    use super::*;

    #[tokio::test]
    async fn test_comment_increments_commenter_count() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        let bob = app.member("bob").await;
        let posts = app.publish_many(&ada, 1).await;
        let post_id = posts[0]["id"].as_str().unwrap();

        let response = app
            .post_as(&bob, &format!("/posts/{}/comments", post_id))
            .json(&json!({ "content": "Nice" }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: Value = response.json();
        assert_eq!(body["author"], bob.id.to_string());
        assert_eq!(body["publication"], post_id);

        let bob_detail: Value = app.get_as(&bob, &format!("/users/{}", bob.id)).await.json();
        assert_eq!(bob_detail["comments_count"], 1);
        let ada_detail: Value = app.get_as(&bob, &format!("/users/{}", ada.id)).await.json();
        assert_eq!(ada_detail["comments_count"], 0);
    }

    #[tokio::test]
    async fn test_comments_list_is_newest_first() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        let posts = app.publish_many(&ada, 1).await;
        let path = format!("/posts/{}/comments", posts[0]["id"].as_str().unwrap());

        for content in ["first", "second"] {
            app.post_as(&ada, &path)
                .json(&json!({ "content": content }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let body: Value = app.get_as(&ada, &path).await.json();
        assert_eq!(body["total_items"], 2);
        assert_eq!(body["results"][0]["content"], "second");
        assert_eq!(body["results"][1]["content"], "first");
    }

    #[tokio::test]
    async fn test_comment_on_unknown_publication_is_not_found() {
        let app = spawn_app();
        let ada = app.member("ada").await;

        let response = app
            .post_as(&ada, &format!("/posts/{}/comments", Uuid::new_v4()))
            .json(&json!({ "content": "hello?" }))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_blank_comment_rejected() {
        let app = spawn_app();
        let ada = app.member("ada").await;
        let posts = app.publish_many(&ada, 1).await;

        let response = app
            .post_as(&ada, &format!("/posts/{}/comments", posts[0]["id"].as_str().unwrap()))
            .json(&json!({ "content": "   " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
